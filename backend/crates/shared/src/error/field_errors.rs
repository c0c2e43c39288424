//! Field Errors - Field-scoped validation messages
//!
//! A `field -> [messages]` map. Every validation boundary (JSON endpoints,
//! HTML forms) reports problems through this type so the caller can show
//! each message next to the offending input.

use std::collections::BTreeMap;

use serde::Serialize;

/// フィールド単位の検証エラー
///
/// キーは入力フィールド名（camelCase、リクエストボディと同じ）。
/// 同じフィールドに複数のメッセージを持てます。
///
/// ## Examples
/// ```rust
/// use kernel::error::field_errors::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("amount", "Amount must be positive");
/// assert!(errors.contains("amount"));
/// assert_eq!(errors.first("amount"), Some("Amount must be positive"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// All messages recorded for `field`
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for `field` (what a form shows inline)
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    /// Iterate over `(field, messages)` in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(value)` when no errors were recorded, `Err(self)` otherwise
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

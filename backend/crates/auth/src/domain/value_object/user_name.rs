//! User Name Value Object
//!
//! ユーザー名は管理者アカウントの**ログイン識別子**。
//! サインイン、アカウント作成、ダッシュボードのユーザー一覧で使用される。
//!
//! ## 設計方針
//! - NFKC正規化 → 前後の空白除去 → 検証 の順で処理
//! - 大文字・小文字は区別する（入力どおりに保存・照合）
//! - 一意性はストアの UNIQUE 制約で保証する（事前チェックはしない）
//!
//! ## 不変条件
//! - 長さ: 3〜64文字（正規化後）
//! - 空白文字・制御文字を含まない

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too short (minimum: USER_NAME_MIN_LENGTH)
    TooShort { length: usize, min: usize },

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains whitespace in the middle
    ContainsWhitespace,

    /// User name contains a control character
    InvalidCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // 空も「短すぎる」として同じ文言で返す
            Self::Empty | Self::TooShort { .. } => write!(
                f,
                "Username must be at least {USER_NAME_MIN_LENGTH} characters"
            ),
            Self::TooLong { max, .. } => {
                write!(f, "Username must be at most {max} characters")
            }
            Self::ContainsWhitespace => {
                write!(f, "Username cannot contain whitespace")
            }
            Self::InvalidCharacter { position } => {
                write!(f, "Username contains an invalid character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
///
/// # Invariants
/// - Length between USER_NAME_MIN_LENGTH and USER_NAME_MAX_LENGTH
/// - No whitespace, no control characters
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = Self::normalize(input.as_ref());
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(normalized: &str) -> Result<(), UserNameError> {
        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if normalized.chars().any(char::is_whitespace) {
            return Err(UserNameError::ContainsWhitespace);
        }

        if let Some(position) = normalized.chars().position(char::is_control) {
            return Err(UserNameError::InvalidCharacter { position });
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_whitespace() {
            let name = UserName::new("  alice  ").unwrap();
            assert_eq!(name.as_str(), "alice");
        }

        #[test]
        fn test_case_preserved() {
            let name = UserName::new("Alice").unwrap();
            assert_eq!(name.as_str(), "Alice");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width 'Ａ' (U+FF21) normalizes to 'A'
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.as_str(), "Alice");
        }

        #[test]
        fn test_idempotent() {
            let first = UserName::new("  bob_123  ").unwrap();
            let second = UserName::new(first.as_str()).unwrap();
            assert_eq!(first, second);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(UserName::new("   "), Err(UserNameError::Empty)));
        }

        #[test]
        fn test_too_short() {
            let err = UserName::new("ab").unwrap_err();
            assert!(matches!(err, UserNameError::TooShort { length: 2, min: 3 }));
            assert_eq!(err.to_string(), "Username must be at least 3 characters");
        }

        #[test]
        fn test_minimum_length_ok() {
            assert!(UserName::new("bob").is_ok());
        }

        #[test]
        fn test_too_long() {
            let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
            assert!(matches!(
                UserName::new(long),
                Err(UserNameError::TooLong { .. })
            ));
        }

        #[test]
        fn test_inner_whitespace_fails() {
            assert!(matches!(
                UserName::new("ali ce"),
                Err(UserNameError::ContainsWhitespace)
            ));
        }

        #[test]
        fn test_control_character_fails() {
            assert!(matches!(
                UserName::new("ali\u{0000}ce"),
                Err(UserNameError::InvalidCharacter { position: 3 })
            ));
        }
    }

    mod serde_support {
        use super::*;

        #[test]
        fn test_deserialize_validates() {
            assert!(serde_json::from_str::<UserName>("\"alice\"").is_ok());
            assert!(serde_json::from_str::<UserName>("\"al\"").is_err());
        }
    }
}

//! Display Name Value Object
//!
//! ダッシュボードやセッション情報に表示される人間向けの名前。
//! 登録時のみ検証する（既存データはそのまま読み込む）。

use std::fmt;

/// Minimum length for display name (in characters)
pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;

/// Maximum length for display name (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Error returned when display name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    TooShort,
    TooLong,
}

impl fmt::Display for DisplayNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(
                f,
                "Name must be at least {DISPLAY_NAME_MIN_LENGTH} characters"
            ),
            Self::TooLong => write!(
                f,
                "Name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"
            ),
        }
    }
}

impl std::error::Error for DisplayNameError {}

/// Trimmed display name, 2-100 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        let trimmed = input.as_ref().trim();
        let length = trimmed.chars().count();

        if length < DISPLAY_NAME_MIN_LENGTH {
            return Err(DisplayNameError::TooShort);
        }
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        assert_eq!(DisplayName::new("  Bob  ").unwrap().as_str(), "Bob");
    }

    #[test]
    fn test_too_short() {
        let err = DisplayName::new(" B ").unwrap_err();
        assert_eq!(err.to_string(), "Name must be at least 2 characters");
    }

    #[test]
    fn test_too_long() {
        assert_eq!(
            DisplayName::new("x".repeat(101)),
            Err(DisplayNameError::TooLong)
        );
    }

    #[test]
    fn test_unicode_counts_chars() {
        assert!(DisplayName::new("မြ").is_ok());
    }
}

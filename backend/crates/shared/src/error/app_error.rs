//! Application Error - Unified error type for the application
//!
//! Defines the [`AppError`] struct.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::field_errors::FieldErrors;
use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `field_errors` - フィールド単位の検証エラー（オプション）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
///
/// // シンプルなエラー
/// let err = AppError::new(ErrorKind::Unauthorized, "Unauthorized");
/// assert_eq!(err.status_code(), 401);
///
/// // フィールドエラー付き
/// let mut errors = FieldErrors::new();
/// errors.add("amount", "Amount must be positive");
/// let err = AppError::validation(errors);
/// assert_eq!(err.status_code(), 400);
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// フィールド単位の検証エラー
    field_errors: Option<FieldErrors>,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - ユーザー向けメッセージ
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: None,
        }
    }

    /// 400 Bad Request with field errors (`"Validation failed"`)
    pub fn validation(errors: FieldErrors) -> Self {
        Self::new(ErrorKind::BadRequest, "Validation failed").with_field_errors(errors)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// フィールドエラーを設定
    #[inline]
    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = Some(errors);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// フィールドエラーを取得
    #[inline]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(errors) = &self.field_errors {
            builder.field("field_errors", errors);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(errors) = &self.field_errors {
            write!(f, " ({})", errors)?;
        }
        Ok(())
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::Conflict, "Username already taken");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "Username already taken");
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_internal_is_server_error() {
        let err = AppError::internal("Failed to load donations");
        assert_eq!(err.status_code(), 500);
        assert!(err.is_server_error());
        assert!(!AppError::new(ErrorKind::Conflict, "x").is_server_error());
    }

    #[test]
    fn test_validation_error() {
        let mut errors = FieldErrors::new();
        errors.add("currency", "Currency must be one of MMK, VND");

        let err = AppError::validation(errors);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Validation failed");
        assert!(err.field_errors().unwrap().contains("currency"));
    }

    #[test]
    fn test_display() {
        let err = AppError::internal("Failed to add donation");
        assert_eq!(err.to_string(), "[Internal Server Error] Failed to add donation");
    }
}

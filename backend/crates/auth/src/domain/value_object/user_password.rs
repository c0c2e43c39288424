//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! // Create from user input (account policy applies)
//! let raw = RawPassword::new("relief-2025".to_string()).unwrap();
//!
//! // Hash for storage
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//!
//! // Verify later
//! assert!(hashed.verify(&raw, None));
//! ```

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, enforcing the account policy
    ///
    /// - 6 to 128 characters
    /// - not whitespace only
    /// - no control characters
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    /// Wrap a sign-in attempt (no policy, only normalization)
    pub fn for_sign_in(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// User-facing message for a registration password policy failure
pub fn policy_message(err: &PasswordPolicyError) -> String {
    match err {
        PasswordPolicyError::TooShort { min, .. } => {
            format!("Password must be at least {min} characters")
        }
        PasswordPolicyError::EmptyOrWhitespace => format!(
            "Password must be at least {} characters",
            platform::password::MIN_PASSWORD_LENGTH
        ),
        other => other.to_string(),
    }
}

// ============================================================================
// User Password (Hashed, Safe to store)
// ============================================================================

/// Stored password hash (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    /// Restore from the database column
    pub fn from_db(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

/// Burn one verification's worth of CPU for an unknown user
pub fn verify_against_dummy(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
    platform::password::verify_dummy(raw.inner(), pepper)
}

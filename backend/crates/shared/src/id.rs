//! Common ID Types
//!
//! Type-safe wrappers around database-assigned integer identifiers.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Identifiers are assigned by the store (auto-increment), so there is no
/// `new()`; an `Id` only ever comes from a persisted row or a request path.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id = UserId::from_raw(42);
/// assert_eq!(id.get(), 42);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw database identifier
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Last `n` decimal digits (or the whole number when shorter)
    ///
    /// ```
    /// use kernel::id::DonationId;
    /// assert_eq!(DonationId::from_raw(1234).tail_digits(3), "234");
    /// assert_eq!(DonationId::from_raw(7).tail_digits(3), "7");
    /// ```
    pub fn tail_digits(&self, n: usize) -> String {
        let digits = self.value.to_string();
        let start = digits.len().saturating_sub(n);
        digits[start..].to_string()
    }
}

// Manual impls: derives would put bounds on the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    pub struct User;

    /// Marker for Donation (transaction) IDs
    pub struct Donation;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type DonationId = Id<markers::Donation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_raw() {
        let id = DonationId::from_raw(17);
        assert_eq!(id.get(), 17);
        assert_eq!(i64::from(id), 17);
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_tail_digits() {
        assert_eq!(DonationId::from_raw(1).tail_digits(3), "1");
        assert_eq!(DonationId::from_raw(100).tail_digits(3), "100");
        assert_eq!(DonationId::from_raw(98765).tail_digits(3), "765");
    }

    #[test]
    fn test_serde_is_plain_integer() {
        let id = UserId::from_raw(5);
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
        let back: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ordering() {
        assert!(DonationId::from_raw(2) > DonationId::from_raw(1));
    }
}

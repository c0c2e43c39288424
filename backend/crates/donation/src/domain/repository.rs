//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::DonationId;

use crate::domain::entities::{Donation, NewDonation};
use crate::domain::value_objects::{Currency, PaymentMethod};
use crate::error::DonationResult;

/// Donation repository trait
///
/// There is no update or delete: stored donations are immutable.
#[trait_variant::make(DonationRepository: Send)]
pub trait LocalDonationRepository {
    /// Store a validated donation; the store assigns id and `created_at`
    async fn create(&self, donation: &NewDonation) -> DonationResult<Donation>;

    async fn find_by_id(&self, id: DonationId) -> DonationResult<Option<Donation>>;

    /// Donations ordered by `date_time` desc, then id desc
    async fn list(&self, offset: i64, limit: i64) -> DonationResult<Vec<Donation>>;

    /// Total number of donations
    async fn count(&self) -> DonationResult<i64>;

    /// Sum of amounts, optionally restricted to one currency and/or to
    /// donations dated at or after `since`; zero when nothing matches
    async fn sum(
        &self,
        currency: Option<Currency>,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<f64>;

    /// Number of donations per method (methods without donations omitted)
    async fn count_by_method(&self) -> DonationResult<Vec<(PaymentMethod, i64)>>;

    /// Most recently recorded donations (`created_at` desc, then id desc)
    async fn recent_created(&self, limit: i64) -> DonationResult<Vec<Donation>>;
}

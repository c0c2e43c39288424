//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL repository, kept in process memory.
//! Used by tests and by local runs without a database.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use kernel::id::DonationId;

use crate::domain::entities::{Donation, NewDonation};
use crate::domain::repository::DonationRepository;
use crate::domain::value_objects::{Currency, PaymentMethod};
use crate::error::{DonationError, DonationResult};

/// In-memory donation repository
#[derive(Clone, Default)]
pub struct InMemoryDonationRepository {
    donations: Arc<Mutex<Vec<Donation>>>,
}

impl InMemoryDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DonationResult<std::sync::MutexGuard<'_, Vec<Donation>>> {
        self.donations
            .lock()
            .map_err(|_| DonationError::Internal("donation store lock poisoned".to_string()))
    }
}

impl DonationRepository for InMemoryDonationRepository {
    async fn create(&self, donation: &NewDonation) -> DonationResult<Donation> {
        let mut donations = self.lock()?;

        let next_id = donations
            .iter()
            .map(|d| d.donation_id.get())
            .max()
            .unwrap_or(0)
            + 1;
        let created = Donation {
            donation_id: DonationId::from_raw(next_id),
            donor_name: donation.donor_name.clone(),
            amount: donation.amount,
            currency: donation.currency,
            method: donation.method,
            date_time: donation.date_time,
            created_at: Utc::now(),
        };
        donations.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: DonationId) -> DonationResult<Option<Donation>> {
        let donations = self.lock()?;
        Ok(donations.iter().find(|d| d.donation_id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> DonationResult<Vec<Donation>> {
        let mut donations = self.lock()?.clone();
        donations.sort_by(|a, b| {
            b.date_time
                .cmp(&a.date_time)
                .then(b.donation_id.cmp(&a.donation_id))
        });

        Ok(donations
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> DonationResult<i64> {
        Ok(self.lock()?.len() as i64)
    }

    async fn sum(
        &self,
        currency: Option<Currency>,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<f64> {
        let donations = self.lock()?;
        Ok(donations
            .iter()
            .filter(|d| currency.is_none_or(|c| d.currency == c))
            .filter(|d| since.is_none_or(|s| d.date_time >= s))
            .map(|d| d.amount)
            .sum())
    }

    async fn count_by_method(&self) -> DonationResult<Vec<(PaymentMethod, i64)>> {
        let donations = self.lock()?;
        Ok(PaymentMethod::ALL
            .into_iter()
            .map(|method| {
                let count = donations.iter().filter(|d| d.method == method).count() as i64;
                (method, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    async fn recent_created(&self, limit: i64) -> DonationResult<Vec<Donation>> {
        let mut donations = self.lock()?.clone();
        donations.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.donation_id.cmp(&a.donation_id))
        });
        donations.truncate(limit.max(0) as usize);

        Ok(donations)
    }
}

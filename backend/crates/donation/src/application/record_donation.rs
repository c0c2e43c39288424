//! Record Donation Use Case
//!
//! Validates a submission and stores it.

use std::sync::Arc;

use crate::domain::entities::{Donation, NewDonation};
use crate::domain::repository::DonationRepository;
use crate::domain::validation::{DonationInput, validate_donation};
use crate::error::{DonationError, DonationResult};

/// Record donation use case
pub struct RecordDonationUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> RecordDonationUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Run the validator without storing anything
    pub fn check(&self, input: &DonationInput) -> DonationResult<NewDonation> {
        validate_donation(input).map_err(DonationError::Validation)
    }

    pub async fn execute(&self, input: &DonationInput) -> DonationResult<Donation> {
        let donation = self.check(input)?;

        self.repo.create(&donation).await.map_err(|e| match e {
            DonationError::Database(source) => DonationError::RecordFailed(source),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Currency;
    use crate::infra::memory::InMemoryDonationRepository;

    fn input(currency: &str, method: &str) -> DonationInput {
        DonationInput {
            donor_name: Some("Daw Mya".into()),
            amount: Some(100.0.into()),
            currency: Some(currency.into()),
            method: Some(method.into()),
            date_time: Some("2025-04-01T10:00".into()),
        }
    }

    #[tokio::test]
    async fn test_execute_stores_donation() {
        let repo = Arc::new(InMemoryDonationRepository::new());
        let use_case = RecordDonationUseCase::new(repo.clone());

        let donation = use_case.execute(&input("MMK", "KPay")).await.unwrap();
        assert_eq!(donation.currency, Currency::MMK);
        assert_eq!(donation.donor_name.as_deref(), Some("Daw Mya"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_not_stored() {
        let repo = Arc::new(InMemoryDonationRepository::new());
        let use_case = RecordDonationUseCase::new(repo.clone());

        let err = use_case.execute(&input("VND", "KPay")).await.unwrap_err();
        assert!(matches!(err, DonationError::Validation(ref e) if e.contains("currency")));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_check_never_stores() {
        let repo = Arc::new(InMemoryDonationRepository::new());
        let use_case = RecordDonationUseCase::new(repo.clone());

        assert!(use_case.check(&input("MMK", "KPay")).is_ok());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}

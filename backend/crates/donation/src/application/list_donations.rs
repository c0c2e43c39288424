//! List Donations Use Case
//!
//! Paginated admin listing and single-donation lookup.

use std::sync::Arc;

use kernel::id::DonationId;

use crate::domain::entities::{Donation, DonationPage};
use crate::domain::repository::DonationRepository;
use crate::domain::value_objects::PageRequest;
use crate::error::{DonationError, DonationResult};

/// List donations use case
pub struct ListDonationsUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
}

impl<R> ListDonationsUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// One page, newest event first
    ///
    /// The rows and the total are two reads; an insert in between can make
    /// them disagree by one.
    pub async fn page(&self, request: PageRequest) -> DonationResult<DonationPage> {
        let items = self.repo.list(request.offset(), request.limit()).await?;
        let total = self.repo.count().await?;

        Ok(DonationPage {
            items,
            total,
            page: request.page(),
            page_size: request.size(),
            total_pages: request.total_pages(total),
        })
    }

    pub async fn get(&self, id: DonationId) -> DonationResult<Donation> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DonationError::NotFound)
    }

    /// Most recently recorded donations (admin dashboard)
    pub async fn recently_recorded(&self, limit: u32) -> DonationResult<Vec<Donation>> {
        self.repo.recent_created(limit as i64).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewDonation;
    use crate::domain::value_objects::{Currency, PaymentMethod};
    use crate::infra::memory::InMemoryDonationRepository;
    use chrono::{Duration, TimeZone, Utc};

    async fn seeded(n: i64) -> Arc<InMemoryDonationRepository> {
        let repo = InMemoryDonationRepository::new();
        let base = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        for i in 0..n {
            repo.create(&NewDonation {
                donor_name: None,
                amount: (i + 1) as f64,
                currency: Currency::MMK,
                method: PaymentMethod::Cash,
                date_time: base + Duration::hours(i),
            })
            .await
            .unwrap();
        }
        Arc::new(repo)
    }

    #[tokio::test]
    async fn test_pages_skip_previous_rows() {
        let use_case = ListDonationsUseCase::new(seeded(23).await);

        let first = use_case.page(PageRequest::new(1, 10)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 23);
        assert_eq!(first.total_pages, 3);
        // Newest event first
        assert_eq!(first.items[0].donation_id.get(), 23);

        let third = use_case.page(PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(third.items.len(), 3);
        assert_eq!(third.items[0].donation_id.get(), 3);
    }

    #[tokio::test]
    async fn test_skip_plus_returned_never_exceeds_total() {
        let use_case = ListDonationsUseCase::new(seeded(17).await);

        for page in 1..=5 {
            for size in [1, 4, 10, 20] {
                let request = PageRequest::new(page, size);
                let result = use_case.page(request).await.unwrap();
                let returned = result.items.len() as i64;
                assert!(returned <= size as i64);
                if request.offset() <= result.total {
                    assert!(request.offset() + returned <= result.total);
                } else {
                    assert_eq!(returned, 0);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let use_case = ListDonationsUseCase::new(seeded(3).await);
        let id = DonationId::from_raw(2);

        let first = use_case.get(id).await.unwrap();
        let second = use_case.get(id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let use_case = ListDonationsUseCase::new(seeded(1).await);
        let err = use_case.get(DonationId::from_raw(99)).await.unwrap_err();
        assert!(matches!(err, DonationError::NotFound));
    }

    #[tokio::test]
    async fn test_recently_recorded_limit() {
        let use_case = ListDonationsUseCase::new(seeded(8).await);
        let recent = use_case.recently_recorded(5).await.unwrap();
        assert_eq!(recent.len(), 5);
    }
}

//! Donation Statistics Use Case
//!
//! Builds the public statistics snapshot: totals per currency, today's
//! totals, counts per method and the latest donations.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::application::config::DonationConfig;
use crate::domain::entities::{DonationStats, PublicDonation};
use crate::domain::repository::DonationRepository;
use crate::domain::value_objects::{Currency, PaymentMethod};
use crate::error::DonationResult;

/// Donation statistics use case
pub struct DonationStatsUseCase<R>
where
    R: DonationRepository,
{
    repo: Arc<R>,
    config: Arc<DonationConfig>,
}

impl<R> DonationStatsUseCase<R>
where
    R: DonationRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<DonationConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, now: DateTime<Utc>) -> DonationResult<DonationStats> {
        let today = start_of_day(now, self.config.stats_utc_offset_minutes);

        let total_count = self.repo.count().await?;
        let total_mmk = self.repo.sum(Some(Currency::MMK), None).await?;
        let total_vnd = self.repo.sum(Some(Currency::VND), None).await?;
        let today_mmk = self.repo.sum(Some(Currency::MMK), Some(today)).await?;
        let today_vnd = self.repo.sum(Some(Currency::VND), Some(today)).await?;

        let mut by_method: BTreeMap<PaymentMethod, i64> =
            PaymentMethod::ALL.into_iter().map(|m| (m, 0)).collect();
        by_method.extend(self.repo.count_by_method().await?);

        let recent = self
            .repo
            .list(0, self.config.recent_public as i64)
            .await?
            .iter()
            .map(PublicDonation::from)
            .collect();

        Ok(DonationStats {
            total_count,
            total_mmk,
            total_vnd,
            today_mmk,
            today_vnd,
            by_method,
            recent,
            today_start: today,
        })
    }
}

/// Midnight of `now`'s calendar day at the given UTC offset, as UTC
pub fn start_of_day(now: DateTime<Utc>, utc_offset_minutes: i32) -> DateTime<Utc> {
    let offset = TimeDelta::minutes(utc_offset_minutes as i64);
    let local_midnight = (now.naive_utc() + offset).date().and_time(NaiveTime::MIN);
    (local_midnight - offset).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewDonation;
    use crate::infra::memory::InMemoryDonationRepository;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    async fn add(
        repo: &InMemoryDonationRepository,
        amount: f64,
        currency: Currency,
        method: PaymentMethod,
        date_time: DateTime<Utc>,
    ) {
        repo.create(&NewDonation {
            donor_name: Some("Named Donor".into()),
            amount,
            currency,
            method,
            date_time,
        })
        .await
        .unwrap();
    }

    #[test]
    fn test_start_of_day_utc() {
        assert_eq!(start_of_day(at(2025, 4, 1, 15, 30), 0), at(2025, 4, 1, 0, 0));
    }

    #[test]
    fn test_start_of_day_with_offset() {
        // 20:00 UTC is already the next day in Yangon (+06:30)
        assert_eq!(start_of_day(at(2025, 4, 1, 20, 0), 390), at(2025, 4, 1, 17, 30));
        assert_eq!(start_of_day(at(2025, 4, 1, 10, 0), 390), at(2025, 3, 31, 17, 30));
        assert_eq!(start_of_day(at(2025, 4, 1, 2, 0), -300), at(2025, 3, 31, 5, 0));
    }

    #[tokio::test]
    async fn test_snapshot() {
        let repo = InMemoryDonationRepository::new();
        let now = at(2025, 4, 2, 12, 0);
        add(&repo, 100.0, Currency::MMK, PaymentMethod::KPay, at(2025, 4, 2, 9, 0)).await;
        add(&repo, 50.0, Currency::MMK, PaymentMethod::Cash, at(2025, 4, 1, 23, 59)).await;
        add(&repo, 7000.0, Currency::VND, PaymentMethod::BIDV, at(2025, 4, 2, 0, 0)).await;

        let use_case = DonationStatsUseCase::new(Arc::new(repo), Arc::new(DonationConfig::default()));
        let stats = use_case.execute(now).await.unwrap();

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.total_mmk, 150.0);
        assert_eq!(stats.total_vnd, 7000.0);
        // Yesterday's 23:59 donation is excluded, midnight is included
        assert_eq!(stats.today_mmk, 100.0);
        assert_eq!(stats.today_vnd, 7000.0);
        assert_eq!(stats.by_method[&PaymentMethod::KPay], 1);
        assert_eq!(stats.by_method[&PaymentMethod::Other], 0);
        assert_eq!(stats.recent.len(), 3);
        assert_eq!(stats.recent[0].label, "Donor-1");
    }

    #[tokio::test]
    async fn test_currency_sums_add_up() {
        let repo = InMemoryDonationRepository::new();
        let day = at(2025, 4, 1, 8, 0);
        for (i, amount) in [12.5, 99.0, 0.25, 1000.0, 3.75].into_iter().enumerate() {
            let (currency, method) = if i % 2 == 0 {
                (Currency::MMK, PaymentMethod::KPay)
            } else {
                (Currency::VND, PaymentMethod::Other)
            };
            add(&repo, amount, currency, method, day).await;
        }

        let mmk = repo.sum(Some(Currency::MMK), None).await.unwrap();
        let vnd = repo.sum(Some(Currency::VND), None).await.unwrap();
        let all = repo.sum(None, None).await.unwrap();
        assert!((mmk + vnd - all).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recent_never_shows_names() {
        let repo = InMemoryDonationRepository::new();
        add(&repo, 1.0, Currency::MMK, PaymentMethod::Cash, at(2025, 4, 1, 8, 0)).await;

        let use_case = DonationStatsUseCase::new(Arc::new(repo), Arc::new(DonationConfig::default()));
        let stats = use_case.execute(at(2025, 4, 1, 9, 0)).await.unwrap();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("Named Donor"));
    }
}

//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::DonationId;
use sqlx::PgPool;

use crate::domain::entities::{Donation, NewDonation};
use crate::domain::repository::DonationRepository;
use crate::domain::value_objects::{Currency, PaymentMethod};
use crate::error::{DonationError, DonationResult};

/// PostgreSQL-backed donation repository
#[derive(Clone)]
pub struct PgDonationRepository {
    pool: PgPool,
}

impl PgDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Donation Repository Implementation
// ============================================================================

impl DonationRepository for PgDonationRepository {
    async fn create(&self, donation: &NewDonation) -> DonationResult<Donation> {
        let row = sqlx::query_as::<_, DonationRow>(
            r#"
            INSERT INTO transactions (donor_name, amount, currency, method, date_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                donor_name,
                amount,
                currency,
                method,
                date_time,
                created_at
            "#,
        )
        .bind(donation.donor_name.as_deref())
        .bind(donation.amount)
        .bind(donation.currency.as_str())
        .bind(donation.method.as_str())
        .bind(donation.date_time)
        .fetch_one(&self.pool)
        .await?;

        let donation = row.into_donation()?;

        tracing::info!(
            donation_id = %donation.donation_id,
            currency = %donation.currency,
            method = %donation.method,
            "Donation recorded"
        );

        Ok(donation)
    }

    async fn find_by_id(&self, id: DonationId) -> DonationResult<Option<Donation>> {
        let row = sqlx::query_as::<_, DonationRow>(
            r#"
            SELECT
                id,
                donor_name,
                amount,
                currency,
                method,
                date_time,
                created_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(DonationRow::into_donation).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> DonationResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(
            r#"
            SELECT
                id,
                donor_name,
                amount,
                currency,
                method,
                date_time,
                created_at
            FROM transactions
            ORDER BY date_time DESC, id DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DonationRow::into_donation).collect()
    }

    async fn count(&self) -> DonationResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn sum(
        &self,
        currency: Option<Currency>,
        since: Option<DateTime<Utc>>,
    ) -> DonationResult<f64> {
        let sum = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT COALESCE(SUM(amount), 0)::DOUBLE PRECISION
            FROM transactions
            WHERE ($1::TEXT IS NULL OR currency = $1)
              AND ($2::TIMESTAMPTZ IS NULL OR date_time >= $2)
            "#,
        )
        .bind(currency.map(|c| c.as_str()))
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }

    async fn count_by_method(&self) -> DonationResult<Vec<(PaymentMethod, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT method, COUNT(*)
            FROM transactions
            GROUP BY method
            ORDER BY method
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(method, count)| Ok((parse_method(&method)?, count)))
            .collect()
    }

    async fn recent_created(&self, limit: i64) -> DonationResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(
            r#"
            SELECT
                id,
                donor_name,
                amount,
                currency,
                method,
                date_time,
                created_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DonationRow::into_donation).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct DonationRow {
    id: i64,
    donor_name: Option<String>,
    amount: f64,
    currency: String,
    method: String,
    date_time: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_donation(self) -> DonationResult<Donation> {
        let currency = self
            .currency
            .parse::<Currency>()
            .map_err(|_| DonationError::Internal(format!("Unknown currency: {}", self.currency)))?;

        Ok(Donation {
            donation_id: DonationId::from_raw(self.id),
            donor_name: self.donor_name,
            amount: self.amount,
            currency,
            method: parse_method(&self.method)?,
            date_time: self.date_time,
            created_at: self.created_at,
        })
    }
}

fn parse_method(raw: &str) -> DonationResult<PaymentMethod> {
    raw.parse::<PaymentMethod>()
        .map_err(|_| DonationError::Internal(format!("Unknown payment method: {}", raw)))
}

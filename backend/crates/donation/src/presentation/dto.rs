//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Donation, DonationPage};
use crate::domain::value_objects::{Currency, PaymentMethod};

/// Request body of `POST /api/admin/donations` and `/validate`
pub use crate::domain::validation::DonationInput as DonationRequest;

/// Stored donation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub id: i64,
    pub donor_name: Option<String>,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub date_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&Donation> for DonationResponse {
    fn from(donation: &Donation) -> Self {
        Self {
            id: donation.donation_id.get(),
            donor_name: donation.donor_name.clone(),
            amount: donation.amount,
            currency: donation.currency,
            method: donation.method,
            date_time: donation.date_time,
            created_at: donation.created_at,
        }
    }
}

/// Create donation response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationResponse {
    pub message: String,
    pub donation: DonationResponse,
}

/// Pre-check result (failures go out as `400 {message, errors}`)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDonationResponse {
    pub valid: bool,
}

/// Listing query: `?page=N`
///
/// Kept as text so `?page=abc` falls back to page 1 instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// One page of the admin listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPageResponse {
    pub items: Vec<DonationResponse>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

impl From<&DonationPage> for DonationPageResponse {
    fn from(page: &DonationPage) -> Self {
        Self {
            items: page.items.iter().map(DonationResponse::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

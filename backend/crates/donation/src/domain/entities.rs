//! Domain Entities

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::id::DonationId;
use serde::Serialize;

use crate::domain::value_objects::{Currency, PaymentMethod};

/// Donation - a stored, immutable record
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub donation_id: DonationId,
    pub donor_name: Option<String>,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
    /// When the donation happened
    pub date_time: DateTime<Utc>,
    /// When it was recorded
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// Name shown to administrators: the donor name, or `Anonymous-<last 3 id digits>`
    pub fn admin_label(&self) -> String {
        match self.donor_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Anonymous-{}", self.donation_id.tail_digits(3)),
        }
    }

    /// Name shown publicly: always `Donor-<last 3 id digits>`
    ///
    /// Derived from the id, so it leaks insertion order.
    pub fn public_label(&self) -> String {
        format!("Donor-{}", self.donation_id.tail_digits(3))
    }

    pub fn formatted_amount(&self) -> String {
        self.currency.format_amount(self.amount)
    }
}

/// Validated donation waiting to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    pub donor_name: Option<String>,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub date_time: DateTime<Utc>,
}

/// One page of the admin listing
#[derive(Debug, Clone)]
pub struct DonationPage {
    pub items: Vec<Donation>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
}

/// Recent donation as the public sees it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDonation {
    pub id: DonationId,
    pub label: String,
    pub amount: f64,
    pub currency: Currency,
    pub method: PaymentMethod,
    pub date_time: DateTime<Utc>,
}

impl From<&Donation> for PublicDonation {
    fn from(donation: &Donation) -> Self {
        Self {
            id: donation.donation_id,
            label: donation.public_label(),
            amount: donation.amount,
            currency: donation.currency,
            method: donation.method,
            date_time: donation.date_time,
        }
    }
}

/// Statistics snapshot for the home page and `/api/stats`
///
/// Assembled from several independent reads; a concurrent insert may show
/// up in some figures and not yet in others.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total_count: i64,
    pub total_mmk: f64,
    pub total_vnd: f64,
    pub today_mmk: f64,
    pub today_vnd: f64,
    /// Every method is present, zero when unused
    pub by_method: BTreeMap<PaymentMethod, i64>,
    pub recent: Vec<PublicDonation>,
    /// Start of "today" the figures above were computed against
    pub today_start: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn donation(id: i64, donor_name: Option<&str>) -> Donation {
        let at = Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap();
        Donation {
            donation_id: DonationId::from_raw(id),
            donor_name: donor_name.map(str::to_string),
            amount: 100.0,
            currency: Currency::MMK,
            method: PaymentMethod::KPay,
            date_time: at,
            created_at: at,
        }
    }

    #[test]
    fn test_admin_label() {
        assert_eq!(donation(1234, Some("Aung")).admin_label(), "Aung");
        assert_eq!(donation(1234, None).admin_label(), "Anonymous-234");
        assert_eq!(donation(7, Some("  ")).admin_label(), "Anonymous-7");
    }

    #[test]
    fn test_public_label_hides_name() {
        assert_eq!(donation(1234, Some("Aung")).public_label(), "Donor-234");
        assert_eq!(donation(7, None).public_label(), "Donor-7");
        assert_eq!(donation(1000, None).public_label(), "Donor-000");
    }

    #[test]
    fn test_stats_by_method_serializes_names() {
        let mut by_method = BTreeMap::new();
        by_method.insert(PaymentMethod::KPay, 2);
        let json = serde_json::to_value(&by_method).unwrap();
        assert_eq!(json["KPay"], 2);
    }
}

//! Domain Value Objects
//!
//! Immutable value types for the donation domain.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Currency a donation was received in
///
/// Amounts in different currencies are summed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Currency {
    #[display("MMK")]
    MMK,
    #[display("VND")]
    VND,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::MMK, Currency::VND];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::MMK => "MMK",
            Currency::VND => "VND",
        }
    }

    /// Suffix used when an amount is shown to people
    pub fn suffix(&self) -> &'static str {
        match self {
            Currency::MMK => "Ks",
            Currency::VND => "₫",
        }
    }

    /// `1234.5` → `"1234.50 Ks"`
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{amount:.2} {}", self.suffix())
    }
}

impl FromStr for Currency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MMK" => Ok(Currency::MMK),
            "VND" => Ok(Currency::VND),
            _ => Err(()),
        }
    }
}

/// How a donation was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[display("KPay")]
    KPay,
    #[display("BIDV")]
    BIDV,
    #[display("Cash")]
    Cash,
    #[display("Other")]
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::KPay,
        PaymentMethod::BIDV,
        PaymentMethod::Cash,
        PaymentMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::KPay => "KPay",
            PaymentMethod::BIDV => "BIDV",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Other => "Other",
        }
    }

    /// The only currency this method can carry, if it is restricted
    ///
    /// KPay is a Myanmar wallet (MMK), BIDV a Vietnamese bank (VND).
    pub fn required_currency(&self) -> Option<Currency> {
        match self {
            PaymentMethod::KPay => Some(Currency::MMK),
            PaymentMethod::BIDV => Some(Currency::VND),
            PaymentMethod::Cash | PaymentMethod::Other => None,
        }
    }

    pub fn accepts(&self, currency: Currency) -> bool {
        self.required_currency().is_none_or(|c| c == currency)
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KPay" => Ok(PaymentMethod::KPay),
            "BIDV" => Ok(PaymentMethod::BIDV),
            "Cash" => Ok(PaymentMethod::Cash),
            "Other" => Ok(PaymentMethod::Other),
            _ => Err(()),
        }
    }
}

/// Page of a listing, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Page numbers below 1 become 1; a zero size becomes 1
    pub fn new(page: i64, size: u32) -> Self {
        let page = page.clamp(1, u32::MAX as i64) as u32;
        Self {
            page,
            size: size.max(1),
        }
    }

    /// From a raw `?page=` value; missing or unparsable means page 1
    pub fn from_query(raw: Option<&str>, size: u32) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Self::new(page, size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip: `(page - 1) * size`
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.size as i64
    }

    pub fn limit(&self) -> i64 {
        self.size as i64
    }

    /// `ceil(total / size)`
    pub fn total_pages(&self, total: i64) -> i64 {
        let size = self.size as i64;
        (total.max(0) + size - 1) / size
    }
}

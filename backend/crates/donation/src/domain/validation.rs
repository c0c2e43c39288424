//! Donation Validator
//!
//! One pure function, [`validate_donation`], decides whether a submission
//! can be stored. The JSON API, the pre-check endpoint and the HTML form
//! all call it, so they can never disagree.
//!
//! Field checks (amount, currency, method, dateTime) run together and
//! report every offending field; the method/currency pairing is checked
//! only once those pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kernel::error::field_errors::FieldErrors;
use serde::Deserialize;

use crate::domain::entities::NewDonation;
use crate::domain::value_objects::{Currency, PaymentMethod};

pub const REQUIRED: &str = "Required";
pub const AMOUNT_NOT_NUMBER: &str = "Amount must be a number";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
pub const INVALID_CURRENCY: &str = "Currency must be one of MMK, VND";
pub const INVALID_METHOD: &str = "Method must be one of KPay, BIDV, Cash, Other";
pub const INVALID_DATE: &str = "Invalid date format";
pub const DONOR_NAME_NOT_TEXT: &str = "Donor name must be text";
pub const CURRENCY_METHOD_MISMATCH: &str =
    "Currency must match payment method (KPay uses MMK, BIDV uses VND)";

/// `datetime-local` style inputs, read as UTC
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Raw donation submission
///
/// Every field is optional and loosely typed here so that a missing or
/// wrongly-typed field becomes a field error instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationInput {
    #[serde(default)]
    pub donor_name: Option<TextInput>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub currency: Option<TextInput>,
    #[serde(default)]
    pub method: Option<TextInput>,
    #[serde(default)]
    pub date_time: Option<TextInput>,
}

/// A field expected to hold text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    /// Numbers, booleans, arrays, objects
    Other(serde_json::Value),
}

impl TextInput {
    /// The text, or `None` for a non-string JSON value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextInput::Text(text) => Some(text),
            TextInput::Other(_) => None,
        }
    }
}

impl From<String> for TextInput {
    fn from(value: String) -> Self {
        TextInput::Text(value)
    }
}

impl From<&str> for TextInput {
    fn from(value: &str) -> Self {
        TextInput::Text(value.to_string())
    }
}

/// Amount as submitted: a JSON number, or text from a form field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
    /// Anything else JSON can carry (booleans, arrays, ...)
    Other(serde_json::Value),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

/// Validate and normalize a submission
///
/// ## Examples
/// ```rust
/// use donation::domain::validation::{DonationInput, validate_donation};
///
/// let input = DonationInput {
///     amount: Some(100.0.into()),
///     currency: Some("MMK".into()),
///     method: Some("KPay".into()),
///     date_time: Some("2025-04-01T10:00".into()),
///     ..Default::default()
/// };
/// assert!(validate_donation(&input).is_ok());
/// ```
pub fn validate_donation(input: &DonationInput) -> Result<NewDonation, FieldErrors> {
    let mut errors = FieldErrors::new();

    let amount = check(&mut errors, "amount", parse_amount(input.amount.as_ref()));
    let currency = check(
        &mut errors,
        "currency",
        parse_choice::<Currency>(input.currency.as_ref(), INVALID_CURRENCY),
    );
    let method = check(
        &mut errors,
        "method",
        parse_choice::<PaymentMethod>(input.method.as_ref(), INVALID_METHOD),
    );
    let date_time = check(
        &mut errors,
        "dateTime",
        text_field(input.date_time.as_ref(), INVALID_DATE)
            .and_then(|raw| parse_date_time(raw).ok_or(INVALID_DATE)),
    );
    let donor_name = check(
        &mut errors,
        "donorName",
        match input.donor_name.as_ref() {
            None => Ok(None),
            Some(name) => name
                .as_text()
                .map(|text| non_blank(Some(text)).map(str::to_string))
                .ok_or(DONOR_NAME_NOT_TEXT),
        },
    );

    let (Some(amount), Some(currency), Some(method), Some(date_time), Some(donor_name)) =
        (amount, currency, method, date_time, donor_name)
    else {
        return Err(errors);
    };

    if !method.accepts(currency) {
        errors.add("currency", CURRENCY_METHOD_MISMATCH);
    }

    errors.into_result(NewDonation {
        donor_name,
        amount,
        currency,
        method,
        date_time,
    })
}

/// Parse a submitted date/time into an absolute UTC timestamp
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (UTC) and `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_amount(raw: Option<&AmountInput>) -> Result<f64, &'static str> {
    let value = match raw {
        None => return Err(REQUIRED),
        Some(AmountInput::Number(n)) => *n,
        Some(AmountInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(REQUIRED);
            }
            text.parse::<f64>().map_err(|_| AMOUNT_NOT_NUMBER)?
        }
        Some(AmountInput::Other(_)) => return Err(AMOUNT_NOT_NUMBER),
    };

    if !value.is_finite() {
        return Err(AMOUNT_NOT_NUMBER);
    }
    if value <= 0.0 {
        return Err(AMOUNT_NOT_POSITIVE);
    }
    Ok(value)
}

fn parse_choice<T: std::str::FromStr>(
    raw: Option<&TextInput>,
    invalid: &'static str,
) -> Result<T, &'static str> {
    text_field(raw, invalid)?.parse::<T>().map_err(|_| invalid)
}

/// Trimmed text of a required field; a non-string value fails as `wrong_type`
fn text_field<'a>(
    raw: Option<&'a TextInput>,
    wrong_type: &'static str,
) -> Result<&'a str, &'static str> {
    let raw = raw.ok_or(REQUIRED)?;
    let text = raw.as_text().ok_or(wrong_type)?;
    non_blank(Some(text)).ok_or(REQUIRED)
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn check<T>(
    errors: &mut FieldErrors,
    field: &str,
    result: Result<T, &'static str>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

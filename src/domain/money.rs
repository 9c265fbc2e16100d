//! Monetary amounts for fares and earnings.
//!
//! All sums go through [`Decimal`] so that totals over many rides never drift
//! the way binary floating point would. Amounts are currency-agnostic; the
//! riyal formatting helpers exist only for display.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Fare or earnings amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Saudi Riyal symbol used in on-screen formatting.
pub const SAR_SYMBOL: &str = "﷼";

/// Why a raw fare value could not be taken at face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareIssue {
    /// The value was absent or `null`.
    Missing,
    /// The value was not a number or a numeric string.
    NotNumeric,
    /// The value parsed but was below zero.
    Negative,
}

impl FareIssue {
    /// Short human-readable reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotNumeric => "not numeric",
            Self::Negative => "negative",
        }
    }
}

/// Parse a raw JSON fare value into an exact amount.
///
/// Numbers and numeric strings are accepted. Callers treat every `Err` as a
/// zero fare; the issue is only reported so ingestion can log it.
pub fn parse_fare(value: Option<&Value>) -> Result<Amount, FareIssue> {
    let amount = match value {
        None | Some(Value::Null) => return Err(FareIssue::Missing),
        Some(Value::Number(n)) => decimal_from_text(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(FareIssue::Missing),
        Some(Value::String(s)) => decimal_from_text(s.trim()),
        Some(_) => None,
    }
    .ok_or(FareIssue::NotNumeric)?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FareIssue::Negative);
    }
    Ok(amount.normalize())
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn rounded(amount: Amount, decimals: u32) -> Amount {
    amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with the riyal symbol, e.g. `﷼ 25`.
#[must_use]
pub fn format_sar(amount: Amount, decimals: u32) -> String {
    let prec = decimals as usize;
    format!("{SAR_SYMBOL} {:.prec$}", rounded(amount, decimals))
}

/// Format an amount with a plain `SAR` prefix for text and documents.
#[must_use]
pub fn format_sar_text(amount: Amount, decimals: u32) -> String {
    let prec = decimals as usize;
    format!("SAR {:.prec$}", rounded(amount, decimals))
}

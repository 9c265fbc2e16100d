//! Ledger evaluation settings: the evaluator's timezone and amount display.

use chrono::FixedOffset;
use serde::Deserialize;

/// Largest number of fraction digits shown for amounts.
pub const MAX_CURRENCY_DECIMALS: u32 = 4;

/// Ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Fixed UTC offset for day, week, and month boundaries, e.g. `+03:00`.
    ///
    /// When unset, the machine's local timezone is used.
    pub utc_offset: Option<String>,
    /// Fraction digits when displaying amounts (default: 0).
    pub currency_decimals: u32,
}

impl LedgerConfig {
    /// The configured offset, or `None` for the machine's local zone.
    ///
    /// Returns `Err` with the raw text when the offset is malformed.
    pub fn offset(&self) -> Result<Option<FixedOffset>, String> {
        match self.utc_offset.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_utc_offset(raw).map(Some).ok_or_else(|| raw.to_string()),
        }
    }
}

/// Parse `Z`, `UTC`, `+03`, `+0300`, or `+03:00` style offsets.
#[must_use]
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_offset_forms() {
        let riyadh = FixedOffset::east_opt(3 * 3600);
        assert_eq!(parse_utc_offset("+03:00"), riyadh);
        assert_eq!(parse_utc_offset("+0300"), riyadh);
        assert_eq!(parse_utc_offset("+03"), riyadh);
        assert_eq!(parse_utc_offset("-05:30"), FixedOffset::west_opt(5 * 3600 + 30 * 60));
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
    }

    #[test]
    fn rejects_malformed_offsets() {
        assert_eq!(parse_utc_offset("03:00"), None);
        assert_eq!(parse_utc_offset("+3:0"), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
        assert_eq!(parse_utc_offset("+ab:cd"), None);
        assert_eq!(parse_utc_offset(""), None);
    }

    #[test]
    fn unset_offset_means_local() {
        assert_eq!(LedgerConfig::default().offset(), Ok(None));
        let cfg = LedgerConfig {
            utc_offset: Some("Asia/Riyadh".into()),
            ..Default::default()
        };
        assert_eq!(cfg.offset(), Err("Asia/Riyadh".to_string()));
    }
}

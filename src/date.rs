//! Loose `YYYY.MM` date handling.
//!
//! Dates are stored as free text. Most rows hold a clean `YYYY.MM`, but legacy rows carry extra
//! text around it (`arXiv(v2) 2023.10`, `2023.11(v2)`), so reads go through a lenient extractor
//! while user-supplied filters go through the strict form.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static YYYY_MM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(20\d{2})\.(\d{2})").unwrap());
static STRICT_YYYY_MM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(20\d{2})\.(\d{2})$").unwrap());

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8,
}

impl YearMonth {
    /// Find the first `20YY.MM` token anywhere in `value`.
    ///
    /// Only the first token is considered: `2023.13 2024.01` is rejected rather than falling
    /// through to the second date.
    pub fn extract(value: &str) -> Option<Self> {
        let caps = YYYY_MM_RE.captures(value)?;
        Self::from_parts(caps.get(1)?.as_str(), caps.get(2)?.as_str())
    }

    /// Accept `value` only if, once trimmed, it is exactly `YYYY.MM` with a real month.
    pub fn parse_strict(value: &str) -> Option<Self> {
        let caps = STRICT_YYYY_MM_RE.captures(value.trim())?;
        Self::from_parts(caps.get(1)?.as_str(), caps.get(2)?.as_str())
    }

    fn from_parts(year: &str, month: &str) -> Option<Self> {
        let year: u16 = year.parse().ok()?;
        let month: u8 = month.parse().ok()?;
        (1..=12).contains(&month).then_some(YearMonth { year, month })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}.{:02}", self.year, self.month)
    }
}

/// Canonical `YYYY.MM` for `value`, if one can be found.
pub fn normalize(value: &str) -> Option<String> {
    YearMonth::extract(value).map(|ym| ym.to_string())
}

/// Comparable key for sorting and range filters. `None` means the date is missing or invalid.
pub fn date_key(value: &str) -> Option<YearMonth> {
    YearMonth::extract(value)
}

pub fn is_strict(value: &str) -> bool {
    YearMonth::parse_strict(value).is_some()
}

/// Order two optional keys newest first, with missing keys after every valid one.
pub fn newest_first(a: Option<YearMonth>, b: Option<YearMonth>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_clean_dates() {
        assert_eq!(normalize("2024.02").as_deref(), Some("2024.02"));
        assert_eq!(
            date_key("2024.02"),
            Some(YearMonth {
                year: 2024,
                month: 2
            })
        );
    }

    #[test]
    fn extracts_from_legacy_strings() {
        assert_eq!(normalize("arXiv(v2) 2023.10").as_deref(), Some("2023.10"));
        assert_eq!(normalize("2023.11(v2)").as_deref(), Some("2023.11"));
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(normalize("").is_none());
        assert!(normalize("not-a-date").is_none());
        assert!(normalize("2023.13").is_none());
        assert!(normalize("2023.00").is_none());
        assert!(normalize("1999.05").is_none());
    }

    #[test]
    fn strict_form_rejects_surrounding_text() {
        assert!(is_strict("2024.01"));
        assert!(is_strict("  2024.01 "));
        assert!(!is_strict("2024.1"));
        assert!(!is_strict("2024.13"));
        assert!(!is_strict("2024-01"));
        assert!(!is_strict("arXiv(v1) 2024.01"));
        assert!(!is_strict("2024.01(v2)"));
    }

    #[test]
    fn newest_first_puts_missing_last() {
        let mut keys = vec![None, date_key("2023.01"), date_key("2024.12")];
        keys.sort_by(|a, b| newest_first(*a, *b));
        assert_eq!(keys, vec![date_key("2024.12"), date_key("2023.01"), None]);
    }

    #[test]
    fn normalized_dates_pass_strict_check() {
        proptest::proptest!(|(year in 2000u16..=2099, month in 1u8..=12, lead in "[a-zA-Z() ]{0,8}", tail in "[a-zA-Z() ]{0,8}")| {
            let raw = format!("{lead}{year:04}.{month:02}{tail}");
            let norm = normalize(&raw).expect("should extract");
            proptest::prop_assert!(is_strict(&norm));
            proptest::prop_assert_eq!(date_key(&norm), Some(YearMonth { year, month }));
        })
    }

    #[test]
    fn out_of_range_months_never_extract() {
        proptest::proptest!(|(year in 2000u16..=2099, month in 13u8..=99)| {
            let raw = format!("{year:04}.{month:02}");
            proptest::prop_assert!(normalize(&raw).is_none());
            proptest::prop_assert!(!is_strict(&raw));
        })
    }
}

//! Deterministic pseudo-random display metrics.
//!
//! Each metric is a pure function of (property id, metric salt): the same
//! listing always shows the same risk badge, yield, and share pricing
//! without a backing column. These are advisory demo figures, not computed
//! from real financial inputs.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

const RISK_LEVELS: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

const BUILT_YEAR_MIN: i64 = 1950;
const BUILT_YEAR_MAX: i64 = 2025;

const MOVE_IN_DAYS_SALT: &str = "days";
const MOVE_IN_DAYS_MIN: i64 = 90;
const MOVE_IN_DAYS_MAX: i64 = 824;

const OCCUPANT_SALT: &str = "occupant";
const OCCUPANT_MIN: i64 = 0;
const OCCUPANT_MAX: i64 = 43;

const AVAILABLE_SHARES_SALT: &str = "availableshares";
const AVAILABLE_SHARES_MIN: i64 = 20;
const AVAILABLE_SHARES_MAX: i64 = 48;

const YIELD_SALT: &str = "yield";
const YIELD_MIN: i64 = 3;
const YIELD_MAX: i64 = 12;

const ROI_SALT: &str = "roi";
const ROI_MIN: i64 = 5;
const ROI_MAX: i64 = 15;

/// 32-bit signed rolling hash over the UTF-16 code units of `input`,
/// `hash = hash * 31 + unit` with two's-complement wraparound.
#[must_use]
pub fn string_hash(input: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}

fn hash_magnitude(id: &str, salt: &str) -> i64 {
    let mut hash: i32 = 0;
    for unit in id.encode_utf16().chain(salt.encode_utf16()) {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    // Widen before abs: i32::MIN has no i32 absolute value.
    i64::from(hash).abs()
}

/// Derive an integer in `[min, max]` inclusive from (id, salt). Total over
/// all string inputs, including the empty id.
#[must_use]
pub fn derive(id: &str, salt: &str, min: i64, max: i64) -> i64 {
    debug_assert!(min <= max);
    min + hash_magnitude(id, salt) % (max - min + 1)
}

#[must_use]
pub fn risk_rating(property_id: &str) -> RiskLevel {
    let index = usize::try_from(hash_magnitude(property_id, "") % 3).unwrap_or(0);
    RISK_LEVELS[index]
}

/// Dollar value in [$1.00, $99.99], two decimal places.
#[must_use]
pub fn price_per_share(property_id: &str) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let cents = (hash_magnitude(property_id, "") % 9900) as f64;
    cents / 100.0 + 1.0
}

#[must_use]
pub fn built_year(property_id: &str) -> i64 {
    derive(property_id, "", BUILT_YEAR_MIN, BUILT_YEAR_MAX)
}

#[must_use]
pub fn days_since_move_in(property_id: &str) -> i64 {
    derive(property_id, MOVE_IN_DAYS_SALT, MOVE_IN_DAYS_MIN, MOVE_IN_DAYS_MAX)
}

#[must_use]
pub fn occupant_share_percent(property_id: &str) -> i64 {
    derive(property_id, OCCUPANT_SALT, OCCUPANT_MIN, OCCUPANT_MAX)
}

#[must_use]
pub fn available_shares_percent(property_id: &str) -> i64 {
    derive(
        property_id,
        AVAILABLE_SHARES_SALT,
        AVAILABLE_SHARES_MIN,
        AVAILABLE_SHARES_MAX,
    )
}

#[must_use]
pub fn annual_yield_percent(property_id: &str) -> i64 {
    derive(property_id, YIELD_SALT, YIELD_MIN, YIELD_MAX)
}

#[must_use]
pub fn roi_percent(property_id: &str) -> i64 {
    derive(property_id, ROI_SALT, ROI_MIN, ROI_MAX)
}

/// The full metric set for one listing, as served by the analytics endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalytics {
    pub property_id: String,
    pub risk_rating: RiskLevel,
    pub price_per_share: f64,
    pub annual_yield_percent: i64,
    pub roi_percent: i64,
    pub occupant_share_percent: i64,
    pub available_shares_percent: i64,
    pub built_year: i64,
    pub days_since_move_in: i64,
}

impl PropertyAnalytics {
    #[must_use]
    pub fn for_property(property_id: &str) -> Self {
        Self {
            property_id: property_id.to_string(),
            risk_rating: risk_rating(property_id),
            price_per_share: price_per_share(property_id),
            annual_yield_percent: annual_yield_percent(property_id),
            roi_percent: roi_percent(property_id),
            occupant_share_percent: occupant_share_percent(property_id),
            available_shares_percent: available_shares_percent(property_id),
            built_year: built_year(property_id),
            days_since_move_in: days_since_move_in(property_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_string_hash_wraps_without_panicking() {
        // Long inputs overflow 32 bits many times over; the result must
        // stay the two's-complement wraparound value, not panic.
        let long = "x".repeat(10_000);
        let first = string_hash(&long);
        assert_eq!(first, string_hash(&long));
    }

    #[test]
    fn test_derive_known_value() {
        // hash("a") = 97; 97 % 76 = 21; 1950 + 21 = 1971
        assert_eq!(derive("a", "", 1950, 2025), 1971);
    }

    #[test]
    fn test_derive_is_deterministic() {
        for id in ["", "123", "prop-42", "ünïcode", "a-much-longer-identifier"] {
            assert_eq!(derive(id, "occupant", 0, 43), derive(id, "occupant", 0, 43));
            assert_eq!(risk_rating(id), risk_rating(id));
            assert!((price_per_share(id) - price_per_share(id)).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_derive_stays_in_range() {
        for id in ["", "1", "123", "abc", "550e8400-e29b-41d4-a716-446655440000"] {
            assert!((0..=43).contains(&occupant_share_percent(id)));
            assert!((20..=48).contains(&available_shares_percent(id)));
            assert!((3..=12).contains(&annual_yield_percent(id)));
            assert!((5..=15).contains(&roi_percent(id)));
            assert!((1950..=2025).contains(&built_year(id)));
            assert!((90..=824).contains(&days_since_move_in(id)));
            let share = price_per_share(id);
            assert!((1.0..100.0).contains(&share));
        }
    }

    #[test]
    fn test_risk_levels_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(RiskLevel::High).unwrap(),
            serde_json::json!("high")
        );
        assert_eq!(
            serde_json::to_value(RiskLevel::Medium).unwrap(),
            serde_json::json!("medium")
        );
        assert_eq!(
            serde_json::to_value(RiskLevel::Low).unwrap(),
            serde_json::json!("low")
        );
    }

    #[test]
    fn test_empty_id_is_valid() {
        // hash("" + "") = 0 -> every metric collapses to its range minimum.
        assert_eq!(built_year(""), 1950);
        assert_eq!(risk_rating(""), RiskLevel::High);
    }

    #[test]
    fn test_salts_decouple_metrics() {
        // Different salts hash differently for the same id; the ranges
        // overlap, so compare the raw derivations over a wide range.
        let a = derive("123", "occupant", 0, 1_000_000);
        let b = derive("123", "availableshares", 0, 1_000_000);
        assert_ne!(a, b);
    }
}

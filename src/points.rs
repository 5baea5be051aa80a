// 🎯 Points Engine - Receipt → loyalty points
// Seven additive contributions, always evaluated in the same order.
// Pure function of the receipt: no state, no errors, no I/O.

use crate::receipt::{Item, Receipt};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

// ============================================================================
// RULE CONSTANTS
// ============================================================================

pub const ROUND_DOLLAR_POINTS: i64 = 50;
pub const QUARTER_MULTIPLE_POINTS: i64 = 25;
pub const POINTS_PER_ITEM_PAIR: i64 = 5;
pub const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
pub const ODD_DAY_POINTS: i64 = 6;
pub const AFTERNOON_POINTS: i64 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Afternoon window is [14:00, 16:00)
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Per-rule contributions behind a score, in evaluation order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer_name: i64,
    pub round_dollar_total: i64,
    pub quarter_multiple_total: i64,
    pub item_pairs: i64,
    pub item_descriptions: i64,
    pub odd_purchase_day: i64,
    pub afternoon_purchase: i64,
}

impl PointsBreakdown {
    /// Sum of every contribution, clamped to the i64 range
    pub fn total(&self) -> i64 {
        self.entries()
            .iter()
            .fold(0, |sum, (_, points)| sum.saturating_add(*points))
    }

    /// Contributions labelled by rule, in evaluation order
    pub fn entries(&self) -> [(&'static str, i64); 7] {
        [
            ("retailer_name", self.retailer_name),
            ("round_dollar_total", self.round_dollar_total),
            ("quarter_multiple_total", self.quarter_multiple_total),
            ("item_pairs", self.item_pairs),
            ("item_descriptions", self.item_descriptions),
            ("odd_purchase_day", self.odd_purchase_day),
            ("afternoon_purchase", self.afternoon_purchase),
        ]
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Compute the points awarded for a receipt
pub fn score(receipt: &Receipt) -> i64 {
    breakdown(receipt).total()
}

/// Evaluate every rule and keep the individual contributions
pub fn breakdown(receipt: &Receipt) -> PointsBreakdown {
    let result = PointsBreakdown {
        retailer_name: retailer_name_points(&receipt.retailer_name),
        round_dollar_total: round_dollar_points(receipt.total),
        quarter_multiple_total: quarter_multiple_points(receipt.total),
        item_pairs: item_pair_points(&receipt.items),
        item_descriptions: receipt
            .items
            .iter()
            .map(item_description_points)
            .fold(0, i64::saturating_add),
        odd_purchase_day: odd_day_points(&receipt.purchase_date),
        afternoon_purchase: afternoon_points(&receipt.purchase_time),
    };

    tracing::debug!(
        retailer = %receipt.retailer_name,
        points = result.total(),
        "scored receipt"
    );

    result
}

// ============================================================================
// RULES
// ============================================================================

/// One point per ASCII letter or digit in the retailer name
pub fn retailer_name_points(retailer_name: &str) -> i64 {
    retailer_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as i64
}

/// Total has no cents. Uses float remainder, not decimal arithmetic.
pub fn round_dollar_points(total: f64) -> i64 {
    if total % 1.0 == 0.0 {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// Total is an exact multiple of 0.25 under float remainder
pub fn quarter_multiple_points(total: f64) -> i64 {
    if total % 0.25 == 0.0 {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// 5 points for every two items; an odd item out earns nothing
pub fn item_pair_points(items: &[Item]) -> i64 {
    (items.len() / 2) as i64 * POINTS_PER_ITEM_PAIR
}

/// ceil(price * 0.2) when the trimmed description length is a multiple of 3.
///
/// Length is counted in UTF-8 bytes, and an empty description (length 0)
/// qualifies. Negative prices yield negative points. Huge prices saturate
/// at the i64 bounds.
pub fn item_description_points(item: &Item) -> i64 {
    let trimmed_len = item.short_description.trim().len();

    if trimmed_len % 3 == 0 {
        (item.price * DESCRIPTION_PRICE_MULTIPLIER).ceil() as i64
    } else {
        0
    }
}

/// 6 points when the purchase date parses and its day is odd
pub fn odd_day_points(purchase_date: &str) -> i64 {
    match parse_purchase_date(purchase_date) {
        Some(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

/// 10 points when the purchase time parses and falls in [14:00, 16:00)
pub fn afternoon_points(purchase_time: &str) -> i64 {
    match parse_purchase_time(purchase_time) {
        Some(time) if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&time.hour()) => {
            AFTERNOON_POINTS
        }
        _ => 0,
    }
}

// ============================================================================
// STRICT DATE / TIME PARSING
// ============================================================================

/// Exactly `YYYY-MM-DD`, then a real calendar date.
///
/// chrono alone tolerates one-digit fields, signs and padding.
pub fn parse_purchase_date(purchase_date: &str) -> Option<NaiveDate> {
    let bytes = purchase_date.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(purchase_date, DATE_FORMAT).ok()
}

/// `H:MM` or `HH:MM` on a 24-hour clock. Minutes always take two digits.
pub fn parse_purchase_time(purchase_time: &str) -> Option<NaiveTime> {
    let (hour, minute) = purchase_time.split_once(':')?;

    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

// ============================================================================
// TESTS
// ============================================================================

// 🧾 Receipt Model - What a caller submits
// Receipts are values: built once at intake, never mutated afterwards

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque receipt identifier (UUID v4 string when generated here)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Generate a fresh, unique identifier
    pub fn generate() -> Self {
        ReceiptId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        ReceiptId(value)
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        ReceiptId(value.to_string())
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A purchase receipt as submitted by a caller
///
/// Date and time stay opaque strings here. Whether they parse only
/// matters to the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Retailer name as printed on the receipt
    #[serde(rename = "retailer", alias = "retailerName")]
    pub retailer_name: String,

    /// Purchase date (YYYY-MM-DD)
    pub purchase_date: String,

    /// Purchase time (HH:MM, 24-hour)
    pub purchase_time: String,

    /// Line items, may be empty
    pub items: Vec<Item>,

    /// Total amount paid
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: f64,
}

/// One line entry on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,

    #[serde(deserialize_with = "deserialize_amount")]
    pub price: f64,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: f64) -> Self {
        Item {
            short_description: short_description.into(),
            price,
        }
    }
}

impl Receipt {
    /// Parse a receipt from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// MONEY DECODING
// ============================================================================

/// Amounts arrive either as JSON numbers (35.35) or decimal strings ("35.35")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => n,
        RawAmount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid amount {:?}: {}", s, e)))?,
    };

    if !value.is_finite() {
        return Err(D::Error::custom(format!("amount must be finite, got {}", value)));
    }

    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================

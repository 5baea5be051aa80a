// ⚙️ Receipt Processor - Intake, lookup, and points queries
// Glue between a ReceiptStore and the points engine

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{ReceiptError, Result};
use crate::points::{self, PointsBreakdown};
use crate::receipt::{Receipt, ReceiptId};
use crate::store::{MemoryReceiptStore, ReceiptStore};

#[derive(Clone)]
pub struct ReceiptProcessor {
    store: Arc<dyn ReceiptStore>,
}

impl ReceiptProcessor {
    /// Create a processor over an injected store
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        ReceiptProcessor { store }
    }

    /// Processor backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryReceiptStore::new()))
    }

    /// Store a receipt under a freshly generated id and return that id
    pub fn intake(&self, receipt: Receipt) -> Result<ReceiptId> {
        let id = ReceiptId::generate();
        let item_count = receipt.items.len();

        self.store.put(id.clone(), receipt)?;
        info!(id = %id, items = item_count, "receipt stored");

        Ok(id)
    }

    /// Parse a JSON receipt and store it
    pub fn intake_json(&self, json: &str) -> Result<ReceiptId> {
        let receipt = Receipt::from_json(json)?;
        self.intake(receipt)
    }

    /// Fetch a stored receipt
    pub fn lookup(&self, id: &ReceiptId) -> Result<Receipt> {
        match self.store.get(id)? {
            Some(receipt) => Ok(receipt),
            None => {
                warn!(id = %id, "receipt not found");
                Err(ReceiptError::NotFound(id.clone()))
            }
        }
    }

    /// Points for a stored receipt
    pub fn points(&self, id: &ReceiptId) -> Result<i64> {
        let receipt = self.lookup(id)?;
        Ok(points::score(&receipt))
    }

    /// Per-rule points for a stored receipt
    pub fn breakdown(&self, id: &ReceiptId) -> Result<PointsBreakdown> {
        let receipt = self.lookup(id)?;
        Ok(points::breakdown(&receipt))
    }

    /// Number of receipts held by the underlying store
    pub fn receipt_count(&self) -> Result<usize> {
        self.store.len()
    }
}

impl Default for ReceiptProcessor {
    fn default() -> Self {
        Self::in_memory()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;

    fn corner_market_receipt() -> Receipt {
        Receipt {
            retailer_name: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", 2.25); 4],
            total: 9.00,
        }
    }

    /// Store that fails every call
    struct BrokenStore;

    impl ReceiptStore for BrokenStore {
        fn put(&self, _id: ReceiptId, _receipt: Receipt) -> Result<()> {
            Err(ReceiptError::Storage("disk on fire".to_string()))
        }

        fn get(&self, _id: &ReceiptId) -> Result<Option<Receipt>> {
            Err(ReceiptError::Storage("disk on fire".to_string()))
        }

        fn len(&self) -> Result<usize> {
            Err(ReceiptError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_intake_then_lookup_round_trip() {
        let processor = ReceiptProcessor::in_memory();
        let receipt = corner_market_receipt();

        let id = processor.intake(receipt.clone()).unwrap();

        assert_eq!(processor.lookup(&id).unwrap(), receipt);
        assert_eq!(processor.receipt_count().unwrap(), 1);
    }

    #[test]
    fn test_intake_assigns_fresh_ids() {
        let processor = ReceiptProcessor::in_memory();

        let first = processor.intake(corner_market_receipt()).unwrap();
        let second = processor.intake(corner_market_receipt()).unwrap();

        assert_ne!(first, second);
        assert_eq!(processor.receipt_count().unwrap(), 2);
    }

    #[test]
    fn test_points_for_stored_receipt() {
        let processor = ReceiptProcessor::in_memory();
        let id = processor.intake(corner_market_receipt()).unwrap();

        assert_eq!(processor.points(&id).unwrap(), 109);
        assert_eq!(processor.breakdown(&id).unwrap().total(), 109);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let processor = ReceiptProcessor::in_memory();
        let id = ReceiptId::from("does-not-exist");

        assert!(matches!(processor.lookup(&id), Err(ReceiptError::NotFound(_))));
        assert!(matches!(processor.points(&id), Err(ReceiptError::NotFound(_))));
    }

    #[test]
    fn test_intake_json() {
        let processor = ReceiptProcessor::in_memory();
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [
                {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
                {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
                {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
                {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
                {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
            ],
            "total": "35.35"
        }"#;

        let id = processor.intake_json(json).unwrap();
        assert_eq!(processor.points(&id).unwrap(), 28);
    }

    #[test]
    fn test_intake_json_rejects_bad_shape() {
        let processor = ReceiptProcessor::in_memory();

        let result = processor.intake_json(r#"{"retailer": "Target"}"#);

        assert!(matches!(result, Err(ReceiptError::InvalidReceipt(_))));
        assert_eq!(processor.receipt_count().unwrap(), 0);
    }

    #[test]
    fn test_storage_errors_propagate() {
        let processor = ReceiptProcessor::new(Arc::new(BrokenStore));

        assert!(matches!(
            processor.intake(corner_market_receipt()),
            Err(ReceiptError::Storage(_))
        ));
        assert!(matches!(
            processor.points(&ReceiptId::from("x")),
            Err(ReceiptError::Storage(_))
        ));
    }
}

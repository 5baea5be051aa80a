// 🗄️ Receipt Store - Where submitted receipts live
// The processor only sees the trait, so tests and the server can plug in any backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{ReceiptError, Result};
use crate::receipt::{Receipt, ReceiptId};

/// Minimal storage capability for receipts
pub trait ReceiptStore: Send + Sync {
    /// Store a receipt under the given id, replacing any previous value
    fn put(&self, id: ReceiptId, receipt: Receipt) -> Result<()>;

    /// Fetch a receipt by id
    fn get(&self, id: &ReceiptId) -> Result<Option<Receipt>>;

    /// Number of stored receipts
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory store, lost on restart
pub struct MemoryReceiptStore {
    receipts: RwLock<HashMap<ReceiptId, Receipt>>,
}

impl MemoryReceiptStore {
    pub fn new() -> Self {
        MemoryReceiptStore {
            receipts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> ReceiptError {
    ReceiptError::Storage("receipt store lock poisoned".to_string())
}

impl ReceiptStore for MemoryReceiptStore {
    fn put(&self, id: ReceiptId, receipt: Receipt) -> Result<()> {
        let mut receipts = self.receipts.write().map_err(poisoned)?;
        receipts.insert(id, receipt);
        Ok(())
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<Receipt>> {
        let receipts = self.receipts.read().map_err(poisoned)?;
        Ok(receipts.get(id).cloned())
    }

    fn len(&self) -> Result<usize> {
        let receipts = self.receipts.read().map_err(poisoned)?;
        Ok(receipts.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::Item;
    use std::sync::Arc;

    fn sample_receipt(retailer: &str) -> Receipt {
        Receipt {
            retailer_name: retailer.to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![Item::new("Gatorade", 2.25)],
            total: 2.25,
        }
    }

    #[test]
    fn test_put_then_get() {
        let store = MemoryReceiptStore::new();
        let id = ReceiptId::from("abc");

        store.put(id.clone(), sample_receipt("Target")).unwrap();

        assert_eq!(store.get(&id).unwrap(), Some(sample_receipt("Target")));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_unknown_id() {
        let store = MemoryReceiptStore::new();

        assert_eq!(store.get(&ReceiptId::from("missing")).unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = MemoryReceiptStore::new();
        let id = ReceiptId::from("abc");

        store.put(id.clone(), sample_receipt("Target")).unwrap();
        store.put(id.clone(), sample_receipt("Walgreens")).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(store.get(&id).unwrap().unwrap().retailer_name, "Walgreens");
    }

    #[test]
    fn test_concurrent_puts() {
        let store = Arc::new(MemoryReceiptStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .put(ReceiptId::from(format!("id-{}", i)), sample_receipt("Target"))
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 8);
    }
}

// Receipt Points - Core Library
// Receipt model, points engine, and storage shared by the scoring CLI and the HTTP server

pub mod config;
pub mod error;
pub mod points;
pub mod processor;
pub mod receipt;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::ReceiptError;
pub use points::{breakdown, score, PointsBreakdown};
pub use processor::ReceiptProcessor;
pub use receipt::{Item, Receipt, ReceiptId};
pub use store::{MemoryReceiptStore, ReceiptStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

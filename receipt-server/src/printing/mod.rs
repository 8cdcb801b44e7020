//! Receipt printing module
//!
//! - Counter: durable wrap-around receipt numbering (peek/commit)
//! - Renderer: task and summary receipts as ESC/POS instruction sequences
//! - Service: peek → render → emit → commit orchestration

pub mod counter;
pub mod renderer;
pub mod service;
pub mod wrap;

pub use counter::{ReceiptCounter, StorageError, StorageResult};
pub use renderer::ReceiptRenderer;
pub use service::{BatchOutcome, PrintFailure, PrintService, PrintServiceError};
pub use wrap::wrap;

//! Task Receipt Server
//!
//! Pulls task records from an external workspace database, renders them as
//! receipts on a networked ESC/POS thermal printer and tracks per-task
//! print/done state back in the external store.
//!
//! # Module structure
//!
//! ```text
//! receipt-server/src/
//! ├── core/       # Configuration, state, HTTP server
//! ├── api/        # HTTP routes and handlers
//! ├── printing/   # Receipt counter, renderer, print orchestration
//! ├── taskstore/  # Workspace-database client, sort and eligibility
//! └── utils/      # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod printing;
pub mod taskstore;
pub mod utils;

// Re-export common types
pub use core::{Config, ConfigError, Server, ServerState};
pub use printing::{BatchOutcome, PrintService, ReceiptCounter, ReceiptRenderer};
pub use taskstore::{Task, TaskStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

//! # receipt-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building (alignment, emphasis, sizing, QR codes, cut)
//! - Network printing (TCP port 9100) with bounded timeouts
//!
//! Business logic (WHAT to print) stays in application code: receipt layout
//! and task selection live in `receipt-server`.
//!
//! ## Example
//!
//! ```ignore
//! use receipt_printer::{Align, EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(48);
//! builder.align(Align::Center);
//! builder.double_size();
//! builder.line("Groceries");
//! builder.reset_size();
//! builder.rule();
//! builder.align(Align::Left);
//! builder.line("Buy milk");
//! builder.cut();
//!
//! // Send to network printer
//! let printer = NetworkPrinter::new("192.168.1.100", 9100);
//! printer.print(&builder.build()).await?;
//! ```

mod error;
mod escpos;
mod printer;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use escpos::{Align, EscPosBuilder};
pub use printer::{NetworkPrinter, Printer};

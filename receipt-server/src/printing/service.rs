//! Print orchestration
//!
//! Sequences counter-peek → render → device-emit → counter-commit per task.
//! The counter is only committed after the device confirms the whole job
//! (including the cut), so a failed emit leaves the reserved number in place
//! and the next attempt reuses it: at-least-once, gap-free numbering.

use chrono::Local;
use receipt_printer::{PrintError, Printer};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use super::counter::{ReceiptCounter, StorageError};
use super::renderer::ReceiptRenderer;
use crate::taskstore::Task;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error("Counter error: {0}")]
    Counter(#[from] StorageError),

    #[error("Device error: {0}")]
    Device(#[from] PrintError),
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

impl From<PrintServiceError> for AppError {
    fn from(err: PrintServiceError) -> Self {
        match err {
            PrintServiceError::Counter(e) => AppError::Storage(e.to_string()),
            PrintServiceError::Device(e) => AppError::Printer(e.to_string()),
        }
    }
}

/// One failed item in a batch print
#[derive(Debug, Serialize)]
pub struct PrintFailure {
    pub id: String,
    pub error: String,
}

/// Result of a batch print: partial failures do not abort the batch
///
/// The batch loop itself lives in the API layer, which prints and marks
/// each task in turn and collects per-item failures here.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<PrintFailure>,
}

impl BatchOutcome {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Print orchestrator
///
/// Owns the counter, the renderer and the device sink. Every print sequence
/// runs under one async mutex: the printer is a shared serial-like resource,
/// and unserialized peeks could hand out duplicate numbers. Cross-process
/// access to the same counter database is unsupported.
pub struct PrintService<P: Printer> {
    counter: ReceiptCounter,
    renderer: ReceiptRenderer,
    printer: P,
    reset_at: u64,
    gate: tokio::sync::Mutex<()>,
}

impl<P: Printer> PrintService<P> {
    pub fn new(counter: ReceiptCounter, renderer: ReceiptRenderer, printer: P, reset_at: u64) -> Self {
        Self {
            counter,
            renderer,
            printer,
            reset_at: reset_at.max(1),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Print one task receipt and return the receipt number it consumed
    ///
    /// The counter is committed only after the device confirms the emit; any
    /// earlier failure leaves it untouched. Marking the task printed in the
    /// external store is the caller's step.
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub async fn print_task(&self, task: &Task) -> PrintServiceResult<u64> {
        let _guard = self.gate.lock().await;

        let number = self.counter.peek_next(self.reset_at)?;
        let data = self
            .renderer
            .render_task(task, number, Local::now().naive_local());

        self.printer.print(&data).await?;

        // Device confirmed: commit the number. A storage failure here leaves
        // the receipt physically printed but unconfirmed; that inconsistency
        // is logged, not surfaced as a print failure.
        if !self.counter.commit(number) {
            error!(number, task_id = %task.id, "Receipt printed but number not committed");
        }

        info!(number, "Task receipt printed");
        Ok(number)
    }

    /// Print the todo summary receipt; consumes no receipt number
    #[instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub async fn print_summary(&self, tasks: &[Task]) -> PrintServiceResult<()> {
        let _guard = self.gate.lock().await;

        let data = self
            .renderer
            .render_summary(tasks, Local::now().naive_local());
        self.printer.print(&data).await?;

        info!("Summary receipt printed");
        Ok(())
    }

    /// Check whether the device sink is reachable
    pub async fn printer_online(&self) -> bool {
        self.printer.is_online().await
    }

    /// Peek the next receipt number without consuming it
    pub fn peek_next_number(&self) -> PrintServiceResult<u64> {
        Ok(self.counter.peek_next(self.reset_at)?)
    }
}

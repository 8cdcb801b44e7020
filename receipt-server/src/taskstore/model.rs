//! Task record as seen by the print subsystem

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One printable work item from the workspace database
///
/// Read-only to this service except for the `printed`/`done` flags, which
/// are flipped through [`crate::taskstore::TaskStore`] after a successful or
/// requested action. `id` is stable and acts as the idempotency key for
/// those updates.
///
/// Absent dates are `None`, distinct from an empty string, so placeholder
/// and sort logic can tell "no date" apart from bad data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque external page id
    pub id: String,
    /// Resolved project name (may be empty)
    pub project: String,
    /// Free-form priority: high / medium / low / optional / anything else
    pub priority: String,
    pub title: String,
    pub planned_start: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// May be empty
    pub description: String,
    pub printed: bool,
    pub done: bool,
}

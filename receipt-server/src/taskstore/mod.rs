//! Task sync adapter
//!
//! Client for the external workspace database plus the sort/eligibility
//! contract that determines physical print order.

pub mod cache;
pub mod client;
pub mod model;
pub mod parse;
pub mod sort;

pub use cache::ProjectCache;
pub use client::{TaskStore, TaskStoreError, TaskStoreResult};
pub use model::Task;
pub use sort::{is_print_eligible, is_summary_eligible, priority_rank, sort_tasks};

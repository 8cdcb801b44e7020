//! API route module
//!
//! # Structure
//!
//! - [`health`] - liveness and printer reachability
//! - [`tasks`] - task listing, printing and state updates

pub mod health;
pub mod tasks;

use axum::Router;

use crate::core::ServerState;

/// Assemble the full application router
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1", tasks::router())
}

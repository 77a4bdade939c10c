//! # storehub-api
//!
//! HTTP API layer for StoreHub built on Axum.
//!
//! Every catalog resource is served by the same generic controller,
//! parameterized over the entity and DTO types. Also provides extractors,
//! request logging, error mapping, and the server runner.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::{AppState, ShutdownSignal};

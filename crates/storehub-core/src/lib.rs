//! # storehub-core
//!
//! Core crate for StoreHub. Contains the entity capability traits, the
//! generic repository contract, configuration schemas, query types
//! (filters, sorting, paging, specifications) and the unified error system.
//!
//! This crate has **no** internal dependencies on other StoreHub crates.

pub mod cancel;
pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use cancel::{CancellationToken, cancellable};
pub use error::{AppError, ErrorKind};
pub use result::AppResult;

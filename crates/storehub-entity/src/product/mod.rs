//! Product domain.

pub mod model;

pub use model::Product;

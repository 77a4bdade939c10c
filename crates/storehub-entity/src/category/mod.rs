//! Category domain.

pub mod model;

pub use model::Category;

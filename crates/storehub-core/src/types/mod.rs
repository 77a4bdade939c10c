//! Query types used across the StoreHub workspace.

pub mod filter;
pub mod pagination;
pub mod sorting;
pub mod specification;

pub use filter::{FilterField, FilterOp, FilterValue};
pub use pagination::PageRequest;
pub use sorting::{SortDirection, SortField};
pub use specification::Specification;

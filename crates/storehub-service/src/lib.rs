//! # storehub-service
//!
//! Service layer for StoreHub. A single generic pipeline, [`CrudService`],
//! handles every entity: it validates input, maps DTOs to entities and
//! back, and applies the entity's deletion strategy.
//!
//! Services follow constructor injection: the repository is provided at
//! construction time as an `Arc<dyn Repository<E>>`.

pub mod catalog;
pub mod crud;
pub mod dto;
pub mod registry;

pub use catalog::build_catalog;
pub use crud::{CrudService, DeletionStrategy, LogicalDeleteService, PhysicalDeleteService};
pub use registry::ServiceRegistry;

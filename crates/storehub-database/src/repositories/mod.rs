//! Repository implementations shared by every StoreHub entity.

pub mod memory;
pub mod postgres;
pub mod provider;
pub mod tables;

pub use memory::InMemoryRepository;
pub use postgres::{PgEntity, PgRepository};
pub use provider::{RepositoryProvider, StoreHealth};

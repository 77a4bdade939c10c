//! # storehub-database
//!
//! PostgreSQL connection management, bundled migrations, and the generic
//! repository implementations (PostgreSQL and in-memory) used by every
//! StoreHub entity.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    InMemoryRepository, PgEntity, PgRepository, RepositoryProvider, StoreHealth,
};

//! Backing-store selection.

use std::any::{Any, TypeId};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use sqlx::{Encode, Postgres, Type};
use tracing::{info, warn};

use storehub_core::config::{DatabaseConfig, DatabaseProvider};
use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::Repository;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

use super::memory::InMemoryRepository;
use super::postgres::{PgEntity, PgRepository};

/// Outcome of [`RepositoryProvider::health_check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHealth {
    /// Whether the store answered.
    pub reachable: bool,
    /// Round-trip time, for stores reached over the network.
    pub latency: Option<Duration>,
    /// Why the store is considered down.
    pub error: Option<String>,
}

impl StoreHealth {
    fn reachable(latency: Option<Duration>) -> Self {
        Self {
            reachable: true,
            latency,
            error: None,
        }
    }

    fn unreachable(error: String) -> Self {
        Self {
            reachable: false,
            latency: None,
            error: Some(error),
        }
    }
}

/// Hands out repositories for the configured backing store.
#[derive(Clone)]
pub enum RepositoryProvider {
    /// PostgreSQL through a shared connection pool.
    Postgres(DatabasePool),
    /// Process-local maps, one per entity type, created on first use.
    Memory(Arc<DashMap<TypeId, Arc<dyn Any + Send + Sync>>>),
}

impl RepositoryProvider {
    /// Build the provider named by `config.provider`.
    ///
    /// For PostgreSQL this connects the pool and, when enabled, applies
    /// the bundled migrations.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::Postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories");
                Ok(Self::memory())
            }
        }
    }

    /// An empty in-memory provider.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(DashMap::new()))
    }

    /// Which backing store this provider serves.
    pub fn kind(&self) -> DatabaseProvider {
        match self {
            Self::Postgres(_) => DatabaseProvider::Postgres,
            Self::Memory(_) => DatabaseProvider::Memory,
        }
    }

    /// Repository for entity type `E`.
    ///
    /// In-memory repositories are shared: every call for the same `E`
    /// returns a handle to the same store.
    pub fn repository<E>(&self) -> AppResult<Arc<dyn Repository<E>>>
    where
        E: PgEntity,
        E::Key: for<'q> Encode<'q, Postgres> + Type<Postgres>,
    {
        match self {
            Self::Postgres(pool) => Ok(Arc::new(PgRepository::<E>::new(pool.pool().clone()))),
            Self::Memory(stores) => {
                let store = stores
                    .entry(TypeId::of::<E>())
                    .or_insert_with(|| {
                        Arc::new(InMemoryRepository::<E>::new()) as Arc<dyn Any + Send + Sync>
                    })
                    .clone();
                let repository = store.downcast::<InMemoryRepository<E>>().map_err(|_| {
                    AppError::internal(format!("In-memory store for {} has the wrong type", E::NAME))
                })?;
                Ok(repository)
            }
        }
    }

    /// Check the backing store. Failures are folded into the result so
    /// callers can report a degraded store instead of erroring.
    pub async fn health_check(&self) -> StoreHealth {
        match self {
            Self::Postgres(pool) => match pool.ping().await {
                Ok(latency) => StoreHealth::reachable(Some(latency)),
                Err(e) => {
                    warn!(error = %e, "Catalog store health check failed");
                    StoreHealth::unreachable(e.message)
                }
            },
            Self::Memory(_) => StoreHealth::reachable(None),
        }
    }

    /// Release backing-store resources.
    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storehub_core::cancel::CancellationToken;
    use storehub_entity::{Category, Product};

    #[tokio::test]
    async fn test_memory_repositories_are_shared_per_entity() {
        let provider = RepositoryProvider::memory();
        let cancel = CancellationToken::new();

        let first = provider.repository::<Category>().unwrap();
        let second = provider.repository::<Category>().unwrap();
        first.add(&mut Category::default(), &cancel).await.unwrap();

        assert_eq!(second.list(&cancel).await.unwrap().len(), 1);
        let products = provider.repository::<Product>().unwrap();
        assert!(products.list(&cancel).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let config = DatabaseConfig {
            provider: DatabaseProvider::Memory,
            ..DatabaseConfig::default()
        };
        let provider = RepositoryProvider::from_config(&config).await.unwrap();
        assert_eq!(provider.kind(), DatabaseProvider::Memory);
        let health = provider.health_check().await;
        assert!(health.reachable);
        assert_eq!(health.latency, None);
    }

    #[tokio::test]
    async fn test_unreachable_postgres_reports_degraded() {
        let provider = RepositoryProvider::Postgres(crate::connection::tests::unreachable_pool());
        assert_eq!(provider.kind(), DatabaseProvider::Postgres);

        let health = provider.health_check().await;
        assert!(!health.reachable);
        assert!(health.error.is_some());
    }
}

//! Per-entity service wiring.
//!
//! Each entity type is bound to exactly one service, and therefore to
//! exactly one deletion strategy. Lookups are keyed by the entity's
//! `TypeId` and resolved once at startup.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::{Dto, Entity, MapFrom, Repository, SoftDelete};

use crate::crud::{CrudService, DeletionStrategy, LogicalDeleteService, PhysicalDeleteService};

struct Registration {
    entity: &'static str,
    strategy: DeletionStrategy,
    /// Holds an `Arc<dyn CrudService<E, D>>`.
    service: Box<dyn Any + Send + Sync>,
}

/// Maps entity types to their CRUD service.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Registration>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` as the handler for entity `E`.
    pub fn register<E, D>(&mut self, service: Arc<dyn CrudService<E, D>>) -> AppResult<()>
    where
        E: Entity,
        D: Dto<Key = E::Key>,
    {
        let key = TypeId::of::<E>();
        if let Some(existing) = self.services.get(&key) {
            return Err(AppError::configuration(format!(
                "{} already has a {} delete service registered",
                E::NAME,
                existing.strategy
            )));
        }

        let strategy = service.deletion();
        info!(entity = E::NAME, strategy = %strategy, "Registered CRUD service");
        self.services.insert(
            key,
            Registration {
                entity: E::NAME,
                strategy,
                service: Box::new(service),
            },
        );
        Ok(())
    }

    /// Register a [`LogicalDeleteService`] for `E` over `repository`.
    pub fn register_logical<E, D>(&mut self, repository: Arc<dyn Repository<E>>) -> AppResult<()>
    where
        E: SoftDelete + MapFrom<D>,
        D: Dto<Key = E::Key> + MapFrom<E>,
    {
        self.register::<E, D>(Arc::new(LogicalDeleteService::<E, D>::new(repository)))
    }

    /// Register a [`PhysicalDeleteService`] for `E` over `repository`.
    pub fn register_physical<E, D>(&mut self, repository: Arc<dyn Repository<E>>) -> AppResult<()>
    where
        E: Entity + MapFrom<D>,
        D: Dto<Key = E::Key> + MapFrom<E>,
    {
        self.register::<E, D>(Arc::new(PhysicalDeleteService::<E, D>::new(repository)))
    }

    /// The service registered for `E`, exchanging `D`.
    pub fn resolve<E, D>(&self) -> AppResult<Arc<dyn CrudService<E, D>>>
    where
        E: Entity,
        D: Dto<Key = E::Key>,
    {
        let registration = self.services.get(&TypeId::of::<E>()).ok_or_else(|| {
            AppError::configuration(format!("No CRUD service registered for {}", E::NAME))
        })?;

        registration
            .service
            .downcast_ref::<Arc<dyn CrudService<E, D>>>()
            .cloned()
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "{} service does not exchange {}",
                    registration.entity,
                    type_name::<D>()
                ))
            })
    }

    /// The deletion strategy bound to `E`, if registered.
    pub fn strategy_of<E: Entity>(&self) -> Option<DeletionStrategy> {
        self.services.get(&TypeId::of::<E>()).map(|r| r.strategy)
    }

    /// Number of registered entity types.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.services.values().map(|r| (r.entity, r.strategy)))
            .finish()
    }
}

//! CRUD with hard deletion.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use storehub_core::cancel::CancellationToken;
use storehub_core::result::AppResult;
use storehub_core::traits::{Dto, Entity, MapFrom, Repository};
use storehub_core::types::specification::Specification;

use super::{
    CrudService, DeletionStrategy, add_with, apply_update, list_with, not_found, unsupported,
    validate_update,
};

/// Service for entities whose rows are removed on delete.
pub struct PhysicalDeleteService<E: Entity, D> {
    repository: Arc<dyn Repository<E>>,
    _dto: PhantomData<fn() -> D>,
}

impl<E: Entity, D> PhysicalDeleteService<E, D> {
    /// Creates a new physical-delete service.
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self {
            repository,
            _dto: PhantomData,
        }
    }

    async fn find(&self, id: &E::Key, cancel: &CancellationToken) -> AppResult<E> {
        self.repository
            .get_by_id(id, cancel)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }
}

#[async_trait]
impl<E, D> CrudService<E, D> for PhysicalDeleteService<E, D>
where
    E: Entity + MapFrom<D>,
    D: Dto<Key = E::Key> + MapFrom<E>,
{
    fn deletion(&self) -> DeletionStrategy {
        DeletionStrategy::Physical
    }

    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<D>> {
        debug!(entity = E::NAME, "Listing records");
        list_with(self.repository.as_ref(), &Specification::new(), cancel).await
    }

    async fn list_matching(
        &self,
        spec: &Specification<E>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<D>> {
        debug!(entity = E::NAME, filters = spec.filters().len(), "Listing records");
        list_with(self.repository.as_ref(), spec, cancel).await
    }

    async fn get_by_id(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<D> {
        debug!(entity = E::NAME, id = %id, "Fetching record");
        let entity = self.find(&id, cancel).await?;
        Ok(D::map_from(&entity))
    }

    async fn add(&self, dto: Option<D>, cancel: &CancellationToken) -> AppResult<D> {
        add_with(self.repository.as_ref(), dto, cancel).await
    }

    async fn update(
        &self,
        id: E::Key,
        dto: Option<D>,
        cancel: &CancellationToken,
    ) -> AppResult<D> {
        let entity = self.find(&id, cancel).await?;
        let dto = validate_update::<E, D>(&id, dto)?;
        apply_update(self.repository.as_ref(), entity, dto, cancel).await
    }

    async fn delete_logical(
        &self,
        _id: E::Key,
        _cancel: &CancellationToken,
    ) -> AppResult<E::Key> {
        Err(unsupported::<E>(DeletionStrategy::Logical))
    }

    async fn delete_physical(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<E::Key> {
        let entity = self.find(&id, cancel).await?;
        self.repository.delete(&entity, cancel).await?;

        info!(entity = E::NAME, id = %id, "Record physically deleted");
        Ok(id)
    }
}

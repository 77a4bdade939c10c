//! CRUD with soft deletion.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use storehub_core::cancel::CancellationToken;
use storehub_core::result::AppResult;
use storehub_core::traits::{Dto, MapFrom, Repository, SoftDelete};
use storehub_core::types::specification::Specification;

use super::{
    CrudService, DeletionStrategy, add_with, apply_update, list_with, not_found, unsupported,
    validate_update,
};

/// Service for entities that are deleted by setting their deletion flag.
///
/// Flagged records disappear from `list`, `get_by_id` and `update`, but
/// stay in storage and remain visible through `list_matching`.
pub struct LogicalDeleteService<E: SoftDelete, D> {
    repository: Arc<dyn Repository<E>>,
    _dto: PhantomData<fn() -> D>,
}

impl<E: SoftDelete, D> LogicalDeleteService<E, D> {
    /// Creates a new logical-delete service.
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self {
            repository,
            _dto: PhantomData,
        }
    }

    /// Fetch a record that has not been flagged as deleted.
    async fn find_live(&self, id: &E::Key, cancel: &CancellationToken) -> AppResult<E> {
        match self.repository.get_by_id(id, cancel).await? {
            Some(entity) if !entity.is_deleted() => Ok(entity),
            _ => Err(not_found::<E>(id)),
        }
    }
}

#[async_trait]
impl<E, D> CrudService<E, D> for LogicalDeleteService<E, D>
where
    E: SoftDelete + MapFrom<D>,
    D: Dto<Key = E::Key> + MapFrom<E>,
{
    fn deletion(&self) -> DeletionStrategy {
        DeletionStrategy::Logical
    }

    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<D>> {
        debug!(entity = E::NAME, "Listing live records");
        list_with(self.repository.as_ref(), &Specification::not_deleted(), cancel).await
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
        let entity = self.find_live(&id, cancel).await?;
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
        let entity = self.find_live(&id, cancel).await?;
        let dto = validate_update::<E, D>(&id, dto)?;
        apply_update(self.repository.as_ref(), entity, dto, cancel).await
    }

    /// Flags the record. Deleting an already flagged record succeeds
    /// without writing.
    async fn delete_logical(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<E::Key> {
        let mut entity = self
            .repository
            .get_by_id(&id, cancel)
            .await?
            .ok_or_else(|| not_found::<E>(&id))?;

        if entity.is_deleted() {
            debug!(entity = E::NAME, id = %id, "Record already deleted");
            return Ok(id);
        }

        entity.mark_deleted();
        self.repository.update(&entity, cancel).await?;

        info!(entity = E::NAME, id = %id, "Record logically deleted");
        Ok(id)
    }

    async fn delete_physical(
        &self,
        _id: E::Key,
        _cancel: &CancellationToken,
    ) -> AppResult<E::Key> {
        Err(unsupported::<E>(DeletionStrategy::Physical))
    }
}

//! The generic CRUD pipeline.
//!
//! [`CrudService`] is the contract the HTTP layer talks to. Two
//! implementations exist and differ only in how records are deleted:
//! [`LogicalDeleteService`] flags them, [`PhysicalDeleteService`] removes
//! them. Invoking the other strategy's delete fails with `Unsupported`.

pub mod logical;
pub mod physical;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use storehub_core::cancel::CancellationToken;
use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::mapper::map_all;
use storehub_core::traits::{Dto, Entity, EntityKey, MapFrom, Repository};
use storehub_core::types::specification::Specification;

pub use logical::LogicalDeleteService;
pub use physical::PhysicalDeleteService;

/// How an entity type is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletionStrategy {
    /// Flag the record and keep the row.
    Logical,
    /// Remove the row.
    Physical,
}

impl std::fmt::Display for DeletionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logical => write!(f, "logical"),
            Self::Physical => write!(f, "physical"),
        }
    }
}

/// CRUD operations for entity `E`, exchanged with clients as `D`.
///
/// `D::Key = E::Key` is enforced at compile time, so a DTO can never carry
/// an identifier of a different type than its entity.
#[async_trait]
pub trait CrudService<E, D>: Send + Sync + 'static
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    /// The deletion strategy this service applies.
    fn deletion(&self) -> DeletionStrategy;

    /// Every visible record.
    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<D>>;

    /// Records matching `spec`. No implicit filtering is added.
    async fn list_matching(
        &self,
        spec: &Specification<E>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<D>>;

    /// A single record.
    async fn get_by_id(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<D>;

    /// Create a record from `dto` and return it with its assigned id.
    async fn add(&self, dto: Option<D>, cancel: &CancellationToken) -> AppResult<D>;

    /// Overwrite the record `id` with the fields of `dto`.
    async fn update(&self, id: E::Key, dto: Option<D>, cancel: &CancellationToken)
    -> AppResult<D>;

    /// Flag the record `id` as deleted.
    async fn delete_logical(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<E::Key>;

    /// Remove the record `id` from storage.
    async fn delete_physical(&self, id: E::Key, cancel: &CancellationToken)
    -> AppResult<E::Key>;

    /// Delete the record `id` with this service's own strategy.
    async fn delete(&self, id: E::Key, cancel: &CancellationToken) -> AppResult<E::Key> {
        match self.deletion() {
            DeletionStrategy::Logical => self.delete_logical(id, cancel).await,
            DeletionStrategy::Physical => self.delete_physical(id, cancel).await,
        }
    }
}

pub(crate) fn not_found<E: Entity>(id: &E::Key) -> AppError {
    AppError::not_found(format!("{} with ID: {id} not found", E::NAME))
}

pub(crate) fn unsupported<E: Entity>(requested: DeletionStrategy) -> AppError {
    AppError::unsupported(format!(
        "{} does not support {requested} deletion",
        E::NAME
    ))
}

pub(crate) async fn list_with<E, D>(
    repository: &dyn Repository<E>,
    spec: &Specification<E>,
    cancel: &CancellationToken,
) -> AppResult<Vec<D>>
where
    E: Entity,
    D: Dto + MapFrom<E>,
{
    let entities = repository.list_matching(spec, cancel).await?;
    Ok(map_all(&entities))
}

pub(crate) async fn add_with<E, D>(
    repository: &dyn Repository<E>,
    dto: Option<D>,
    cancel: &CancellationToken,
) -> AppResult<D>
where
    E: Entity + MapFrom<D>,
    D: Dto<Key = E::Key> + MapFrom<E>,
{
    let dto = dto.ok_or_else(|| {
        AppError::invalid_argument(format!("{} payload must not be null", E::NAME))
    })?;

    let mut entity = E::map_from(&dto);
    entity.validate()?;
    repository.add(&mut entity, cancel).await?;

    info!(entity = E::NAME, id = %entity.id(), "Record created");
    Ok(D::map_from(&entity))
}

/// Check an update payload against the route identifier.
pub(crate) fn validate_update<E, D>(id: &E::Key, dto: Option<D>) -> AppResult<D>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let dto = dto.ok_or_else(|| {
        AppError::invalid_argument(format!("{} payload must not be null", E::NAME))
    })?;

    let Some(dto_id) = dto.id() else {
        return Err(AppError::format_mismatch(format!(
            "{} payload must carry an identifier of type {}",
            E::NAME,
            <E::Key as EntityKey>::TYPE_NAME
        )));
    };

    if dto_id != *id {
        return Err(AppError::identifier_mismatch(format!(
            "{} ID mismatch: route has {id}, payload has {dto_id}",
            E::NAME
        )));
    }

    Ok(dto)
}

pub(crate) async fn apply_update<E, D>(
    repository: &dyn Repository<E>,
    mut entity: E,
    mut dto: D,
    cancel: &CancellationToken,
) -> AppResult<D>
where
    E: Entity + MapFrom<D>,
    D: Dto<Key = E::Key> + MapFrom<E>,
{
    entity.map_onto(&dto);
    entity.validate()?;
    repository.update(&entity, cancel).await?;

    info!(entity = E::NAME, id = %entity.id(), "Record updated");
    dto.map_onto(&entity);
    Ok(dto)
}

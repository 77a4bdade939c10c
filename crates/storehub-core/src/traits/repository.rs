//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::cancel::CancellationToken;
use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::specification::Specification;

/// Generic persistence gateway.
///
/// One implementation serves every entity type; entity-specific storage
/// details (table name, columns) are supplied by the entity's own
/// capability impls. Every call observes the caller's cancellation token.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync + 'static {
    /// Fetch every record, including logically deleted ones.
    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<E>>;

    /// Fetch the records matching `spec`.
    async fn list_matching(
        &self,
        spec: &Specification<E>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<E>>;

    /// Find a record by its primary key.
    async fn get_by_id(&self, id: &E::Key, cancel: &CancellationToken) -> AppResult<Option<E>>;

    /// Persist a new record, assigning an identifier when it has none.
    async fn add(&self, entity: &mut E, cancel: &CancellationToken) -> AppResult<()>;

    /// Persist changes to an existing record.
    async fn update(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()>;

    /// Remove a record from the store.
    async fn delete(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()>;
}

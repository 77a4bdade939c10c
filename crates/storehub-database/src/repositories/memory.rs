//! In-memory repository backed by a concurrent hash map.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use storehub_core::cancel::{CancellationToken, cancellable};
use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::{Entity, EntityKey, Repository};
use storehub_core::types::specification::Specification;

/// Process-local store for one entity type.
///
/// Records keep their insertion order, so unsorted listings are stable.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    records: DashMap<E::Key, (u64, E)>,
    sequence: AtomicU64,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of stored records, including logically deleted ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn snapshot(&self) -> Vec<E> {
        let mut rows: Vec<(u64, E)> = self.records.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, record)| record).collect()
    }

    fn not_found(id: &E::Key) -> AppError {
        AppError::not_found(format!("{} with ID: {id} not found", E::NAME))
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn list(&self, cancel: &CancellationToken) -> AppResult<Vec<E>> {
        cancellable(cancel, async { Ok(self.snapshot()) }).await
    }

    async fn list_matching(
        &self,
        spec: &Specification<E>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<E>> {
        cancellable(cancel, async { spec.evaluate(self.snapshot()) }).await
    }

    async fn get_by_id(&self, id: &E::Key, cancel: &CancellationToken) -> AppResult<Option<E>> {
        cancellable(cancel, async {
            Ok(self.records.get(id).map(|r| r.value().1.clone()))
        })
        .await
    }

    async fn add(&self, entity: &mut E, cancel: &CancellationToken) -> AppResult<()> {
        cancellable(cancel, async {
            if entity.id().is_unset() {
                entity.set_id(E::Key::generate());
            }

            match self.records.entry(entity.id()) {
                Entry::Occupied(_) => Err(AppError::conflict(format!(
                    "{} with the same ID already exists",
                    E::NAME
                ))),
                Entry::Vacant(slot) => {
                    let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
                    slot.insert((seq, entity.clone()));
                    Ok(())
                }
            }
        })
        .await
    }

    async fn update(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()> {
        cancellable(cancel, async {
            let id = entity.id();
            let mut row = self.records.get_mut(&id).ok_or_else(|| Self::not_found(&id))?;
            row.1 = entity.clone();
            Ok(())
        })
        .await
    }

    async fn delete(&self, entity: &E, cancel: &CancellationToken) -> AppResult<()> {
        cancellable(cancel, async {
            let id = entity.id();
            self.records
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| Self::not_found(&id))
        })
        .await
    }
}

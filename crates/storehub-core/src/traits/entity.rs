//! Capabilities that persisted records and their client-facing projections
//! expose to the generic CRUD pipeline.
//!
//! Identifier and deletion-flag access go through these traits, so pairing
//! a DTO with an entity of a different key type is a compile error rather
//! than a runtime lookup failure.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::result::AppResult;

/// A primary-key type usable by the generic pipeline.
pub trait EntityKey:
    Copy
    + Eq
    + Hash
    + Debug
    + Display
    + FromStr
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Name of the key type, used in format-mismatch diagnostics.
    const TYPE_NAME: &'static str;

    /// Produce a fresh, globally unique key.
    fn generate() -> Self;

    /// Whether the key still holds its "not yet assigned" value.
    fn is_unset(&self) -> bool;
}

impl EntityKey for Uuid {
    const TYPE_NAME: &'static str = "UUID";

    fn generate() -> Self {
        Uuid::new_v4()
    }

    fn is_unset(&self) -> bool {
        self.is_nil()
    }
}

/// A record owned by the persistence layer.
pub trait Entity: Clone + Debug + Serialize + Send + Sync + 'static {
    /// Primary-key type.
    type Key: EntityKey;

    /// Singular, human-readable entity name (e.g. `"Product"`).
    const NAME: &'static str;

    /// The record's identifier.
    fn id(&self) -> Self::Key;

    /// Overwrite the identifier. Only the repository calls this, on insert.
    fn set_id(&mut self, id: Self::Key);

    /// Domain rules a record must satisfy before it is written.
    ///
    /// Called by the services on create and update; a violation is an
    /// `InvalidArgument`. Accepts everything unless overridden.
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Entities that are deleted by flagging instead of removing the row.
pub trait SoftDelete: Entity {
    /// Column / field carrying the flag.
    const DELETED_FIELD: &'static str = "is_deleted";

    /// Whether the record has been logically deleted.
    fn is_deleted(&self) -> bool;

    /// Flag the record as logically deleted.
    fn mark_deleted(&mut self);
}

/// A client-facing projection of an entity.
pub trait Dto: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type carried by the DTO.
    type Key: EntityKey;

    /// Identifier carried by the DTO, if the client supplied one.
    fn id(&self) -> Option<Self::Key>;
}

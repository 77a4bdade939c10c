//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::{Entity, SoftDelete};

/// A product grouping. Deleted logically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether the category has been logically deleted.
    pub is_deleted: bool,
}

impl Entity for Category {
    type Key = Uuid;
    const NAME: &'static str = "Category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_argument("Category name must not be blank"));
        }
        Ok(())
    }
}

impl SoftDelete for Category {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

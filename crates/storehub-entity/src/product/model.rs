//! Product entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::{Entity, SoftDelete};

/// A sellable catalog item. Deleted logically.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit cost.
    pub cost: f64,
    /// Owning category, if any.
    pub category_id: Option<Uuid>,
    /// Whether the product has been logically deleted.
    pub is_deleted: bool,
}

impl Entity for Product {
    type Key = Uuid;
    const NAME: &'static str = "Product";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_argument("Product name must not be blank"));
        }
        if self.cost.is_nan() || self.cost <= 0.0 {
            return Err(AppError::invalid_argument(format!(
                "Product cost must be positive, got {}",
                self.cost
            )));
        }
        Ok(())
    }
}

impl SoftDelete for Product {
    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn mark_deleted(&mut self) {
        self.is_deleted = true;
    }
}

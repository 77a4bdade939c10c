//! Category DTO.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storehub_core::traits::{Dto, MapFrom};
use storehub_entity::Category;

/// Category as exchanged with clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDto {
    pub id: Option<Uuid>,
    pub name: String,
    pub is_deleted: bool,
}

impl Dto for CategoryDto {
    type Key = Uuid;

    fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl MapFrom<Category> for CategoryDto {
    fn map_from(source: &Category) -> Self {
        Self {
            id: Some(source.id),
            name: source.name.clone(),
            is_deleted: source.is_deleted,
        }
    }

    fn map_onto(&mut self, source: &Category) {
        *self = Self::map_from(source);
    }
}

impl MapFrom<CategoryDto> for Category {
    fn map_from(source: &CategoryDto) -> Self {
        Category {
            id: source.id.unwrap_or_default(),
            name: source.name.clone(),
            is_deleted: false,
        }
    }

    fn map_onto(&mut self, source: &CategoryDto) {
        self.name.clone_from(&source.name);
    }
}

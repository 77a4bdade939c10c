//! Product DTO.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storehub_core::traits::{Dto, MapFrom};
use storehub_entity::Product;

/// Product as exchanged with clients.
///
/// `is_deleted` is reported but never written back to the entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDto {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub category_id: Option<Uuid>,
    pub is_deleted: bool,
}

impl Dto for ProductDto {
    type Key = Uuid;

    fn id(&self) -> Option<Uuid> {
        self.id
    }
}

impl MapFrom<Product> for ProductDto {
    fn map_from(source: &Product) -> Self {
        Self {
            id: Some(source.id),
            name: source.name.clone(),
            description: source.description.clone(),
            cost: source.cost,
            category_id: source.category_id,
            is_deleted: source.is_deleted,
        }
    }

    fn map_onto(&mut self, source: &Product) {
        *self = Self::map_from(source);
    }
}

impl MapFrom<ProductDto> for Product {
    fn map_from(source: &ProductDto) -> Self {
        let mut product = Product {
            id: source.id.unwrap_or_default(),
            ..Product::default()
        };
        product.map_onto(source);
        product
    }

    fn map_onto(&mut self, source: &ProductDto) {
        self.name.clone_from(&source.name);
        self.description.clone_from(&source.description);
        self.cost = source.cost;
        self.category_id = source.category_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deleted_flag_is_output_only() {
        let dto = ProductDto {
            id: Some(Uuid::new_v4()),
            name: "Tea".into(),
            is_deleted: true,
            ..ProductDto::default()
        };
        let product = Product::map_from(&dto);
        assert!(!product.is_deleted);
        assert_eq!(Some(product.id), dto.id);

        let mut existing = Product {
            is_deleted: true,
            ..product.clone()
        };
        existing.map_onto(&ProductDto::default());
        assert!(existing.is_deleted);
        assert_eq!(existing.id, product.id);
    }

    #[test]
    fn test_partial_body_uses_defaults() {
        let dto: ProductDto = serde_json::from_str(r#"{"name":"Tea","cost":2.5}"#).unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(dto.cost, 2.5);
        assert_eq!(dto.category_id, None);
    }
}

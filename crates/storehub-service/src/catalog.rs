//! Wiring for the catalog entities.

use tracing::info;

use storehub_core::result::AppResult;
use storehub_database::RepositoryProvider;
use storehub_entity::{Category, InstagramPost, Product};

use crate::dto::{CategoryDto, InstagramPostDto, ProductDto};
use crate::registry::ServiceRegistry;

/// Register a service for every catalog entity.
///
/// Products and categories are deleted logically, Instagram posts
/// physically.
pub fn build_catalog(provider: &RepositoryProvider) -> AppResult<ServiceRegistry> {
    let mut registry = ServiceRegistry::new();

    registry.register_logical::<Product, ProductDto>(provider.repository()?)?;
    registry.register_logical::<Category, CategoryDto>(provider.repository()?)?;
    registry.register_physical::<InstagramPost, InstagramPostDto>(provider.repository()?)?;

    info!(services = registry.len(), provider = %provider.kind(), "Catalog wired");
    Ok(registry)
}

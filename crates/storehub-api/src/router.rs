//! Route definitions for the StoreHub HTTP API.
//!
//! Every resource is mounted under `/api`. Resource routers carry their
//! own [`CrudState`]; the health endpoint uses [`AppState`].

use axum::Router;
use axum::routing::get;

use storehub_core::result::AppResult;
use storehub_core::traits::{Dto, Entity};
use storehub_entity::{Category, InstagramPost, Product};
use storehub_service::dto::{CategoryDto, InstagramPostDto, ProductDto};

use crate::handlers;
use crate::state::{AppState, CrudState};

/// Build the `/api` routes.
///
/// Fails when a resource has no service registered.
pub fn build_router(state: AppState) -> AppResult<Router> {
    let api_routes = Router::new()
        .nest("/products", resource::<Product, ProductDto>(&state)?)
        .nest("/categories", resource::<Category, CategoryDto>(&state)?)
        .nest(
            "/instagram-posts",
            resource::<InstagramPost, InstagramPostDto>(&state)?,
        )
        .route("/health", get(handlers::health::health));

    Ok(Router::new().nest("/api", api_routes).with_state(state))
}

fn resource<E, D>(state: &AppState) -> AppResult<Router<AppState>>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let service = state.services.resolve::<E, D>()?;
    Ok(handlers::crud::routes(CrudState::new(
        service,
        state.shutdown.clone(),
    )))
}

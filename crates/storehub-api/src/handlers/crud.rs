//! Generic CRUD controller.
//!
//! One set of handlers serves every resource. Each handler binds its
//! parameters, calls exactly one service operation, and returns the
//! result as JSON.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;

use storehub_core::traits::{Dto, Entity};
use storehub_core::types::specification::Specification;

use crate::error::ApiError;
use crate::extractors::{DtoBody, EntityId, RequestCancellation};
use crate::state::CrudState;

/// Routes for one resource, relative to its mount point.
///
/// - `GET /` lists live records
/// - `GET /All` lists every stored record
/// - `GET /{id}`, `PUT /{id}`, `DELETE /{id}` act on one record
/// - `POST /` creates a record
pub fn routes<E, D, S>(state: CrudState<E, D>) -> Router<S>
where
    E: Entity,
    D: Dto<Key = E::Key>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list::<E, D>).post(add::<E, D>))
        .route("/All", get(list_all::<E, D>))
        .route(
            "/{id}",
            get(get_by_id::<E, D>)
                .put(update::<E, D>)
                .delete(delete::<E, D>),
        )
        .with_state(state)
}

/// GET /api/{resource}
pub async fn list<E, D>(
    State(state): State<CrudState<E, D>>,
    cancel: RequestCancellation,
) -> Result<Json<Vec<D>>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let items = state.service.list(cancel.token()).await?;
    Ok(Json(items))
}

/// GET /api/{resource}/All
pub async fn list_all<E, D>(
    State(state): State<CrudState<E, D>>,
    cancel: RequestCancellation,
) -> Result<Json<Vec<D>>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let items = state
        .service
        .list_matching(&Specification::new(), cancel.token())
        .await?;
    Ok(Json(items))
}

/// GET /api/{resource}/{id}
pub async fn get_by_id<E, D>(
    State(state): State<CrudState<E, D>>,
    EntityId(id): EntityId<E::Key>,
    cancel: RequestCancellation,
) -> Result<Json<D>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let item = state.service.get_by_id(id, cancel.token()).await?;
    Ok(Json(item))
}

/// POST /api/{resource}
pub async fn add<E, D>(
    State(state): State<CrudState<E, D>>,
    cancel: RequestCancellation,
    DtoBody(dto): DtoBody<D>,
) -> Result<Json<D>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let created = state.service.add(dto, cancel.token()).await?;
    Ok(Json(created))
}

/// PUT /api/{resource}/{id}
pub async fn update<E, D>(
    State(state): State<CrudState<E, D>>,
    EntityId(id): EntityId<E::Key>,
    cancel: RequestCancellation,
    DtoBody(dto): DtoBody<D>,
) -> Result<Json<D>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let updated = state.service.update(id, dto, cancel.token()).await?;
    Ok(Json(updated))
}

/// DELETE /api/{resource}/{id}
pub async fn delete<E, D>(
    State(state): State<CrudState<E, D>>,
    EntityId(id): EntityId<E::Key>,
    cancel: RequestCancellation,
) -> Result<Json<E::Key>, ApiError>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    let deleted = state.service.delete(id, cancel.token()).await?;
    Ok(Json(deleted))
}

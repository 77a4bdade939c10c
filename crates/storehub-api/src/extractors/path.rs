//! Typed entity identifier from the `{id}` path segment.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use storehub_core::error::AppError;
use storehub_core::traits::EntityKey;

use crate::error::ApiError;

/// An entity key parsed from the route.
#[derive(Debug, Clone, Copy)]
pub struct EntityId<K>(pub K);

impl<S, K> FromRequestParts<S> for EntityId<K>
where
    S: Send + Sync,
    K: EntityKey,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::invalid_argument(format!("Missing identifier: {e}")))?;

        raw.parse::<K>().map(EntityId).map_err(|_| {
            AppError::invalid_argument(format!("Invalid {} identifier: '{raw}'", K::TYPE_NAME))
                .into()
        })
    }
}

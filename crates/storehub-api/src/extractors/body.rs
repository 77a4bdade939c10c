//! JSON body extractor for DTO payloads.
//!
//! Unlike `axum::Json`, an empty body or a literal `null` is accepted and
//! yields `None`, leaving the "payload is required" decision to the
//! service. An `id` that is present but not a valid key is reported as a
//! format mismatch rather than a generic parse failure.

use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use serde_json::Value;

use storehub_core::error::AppError;
use storehub_core::result::AppResult;
use storehub_core::traits::{Dto, EntityKey};

use crate::error::ApiError;

/// Optional DTO parsed from the request body.
#[derive(Debug, Clone)]
pub struct DtoBody<D>(pub Option<D>);

impl<S, D> FromRequest<S> for DtoBody<D>
where
    S: Send + Sync,
    D: Dto,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_argument(format!("Failed to read request body: {e}")))?;

        Ok(DtoBody(parse_dto(&bytes)?))
    }
}

/// Decode a DTO payload.
pub fn parse_dto<D: Dto>(bytes: &[u8]) -> AppResult<Option<D>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::invalid_argument(format!("Malformed JSON body: {e}")))?;
    if value.is_null() {
        return Ok(None);
    }

    if let Some(id) = value.get("id").filter(|id| !id.is_null()) {
        if serde_json::from_value::<D::Key>(id.clone()).is_err() {
            return Err(AppError::format_mismatch(format!(
                "Identifier {id} is not a valid {}",
                <D::Key as EntityKey>::TYPE_NAME
            )));
        }
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| AppError::invalid_argument(format!("Invalid request body: {e}")))
}

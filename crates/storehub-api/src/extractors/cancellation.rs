//! Request-scoped cancellation token.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use tokio_util::sync::DropGuard;

use storehub_core::cancel::CancellationToken;

use crate::state::ShutdownSignal;

/// Cancellation token for the current request.
///
/// Cancelled when the server shuts down, or when this value is dropped,
/// which happens when the handler future finishes or the client goes away.
#[derive(Debug)]
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    /// The token to pass down to services.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<S> FromRequestParts<S> for RequestCancellation
where
    ShutdownSignal: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = ShutdownSignal::from_ref(state).child();
        let guard = token.clone().drop_guard();
        Ok(Self {
            token,
            _guard: guard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_token_follows_shutdown_and_drop() {
        let shutdown = ShutdownSignal::new();
        let (mut parts, _) = Request::new(()).into_parts();

        let first = RequestCancellation::from_request_parts(&mut parts, &shutdown)
            .await
            .unwrap();
        let observed = first.token().clone();
        assert!(!observed.is_cancelled());
        drop(first);
        assert!(observed.is_cancelled());

        let second = RequestCancellation::from_request_parts(&mut parts, &shutdown)
            .await
            .unwrap();
        shutdown.trigger();
        assert!(second.token().is_cancelled());
    }
}

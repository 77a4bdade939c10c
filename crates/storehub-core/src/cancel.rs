//! Request-scoped cancellation.

use std::future::Future;

pub use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::result::AppResult;

/// Drive `operation` to completion unless `token` fires first.
///
/// When the token is cancelled the operation future is dropped, which
/// aborts any in-flight I/O it owns, and a `Cancelled` error is returned.
pub async fn cancellable<T, F>(token: &CancellationToken, operation: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    if token.is_cancelled() {
        return Err(AppError::cancelled("Operation cancelled before it started"));
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::cancelled("Operation cancelled")),
        result = operation => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let value = cancellable(&token, async { Ok(7) }).await.expect("value");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_fails_fast_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let err = cancellable(&token, async { Ok(()) }).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_aborts_pending_operation() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move { child.cancel() });

        let err = cancellable(&token, std::future::pending::<AppResult<()>>())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cancelled);
    }
}

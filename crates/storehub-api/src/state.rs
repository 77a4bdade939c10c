//! Application state shared across handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use storehub_core::cancel::CancellationToken;
use storehub_core::config::AppConfig;
use storehub_core::traits::{Dto, Entity};
use storehub_database::RepositoryProvider;
use storehub_service::{CrudService, ServiceRegistry};

/// Application state containing all shared dependencies.
///
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Backing store (PostgreSQL or in-memory)
    pub provider: RepositoryProvider,
    /// Per-entity CRUD services
    pub services: Arc<ServiceRegistry>,
    /// Server-wide cancellation
    pub shutdown: ShutdownSignal,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

/// Root cancellation token, cancelled when the server shuts down.
///
/// Each request works on a child of this token.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal(CancellationToken);

impl ShutdownSignal {
    /// Creates a new, untriggered signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled together with this signal.
    pub fn child(&self) -> CancellationToken {
        self.0.child_token()
    }

    /// Cancel every request token derived from this signal.
    pub fn trigger(&self) {
        self.0.cancel();
    }

    /// Whether shutdown has started.
    pub fn is_triggered(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Wait until shutdown is triggered.
    pub async fn triggered(&self) {
        self.0.cancelled().await;
    }
}

impl FromRef<AppState> for ShutdownSignal {
    fn from_ref(state: &AppState) -> Self {
        state.shutdown.clone()
    }
}

/// State for the routes of one resource.
pub struct CrudState<E, D>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    /// Service handling the resource.
    pub service: Arc<dyn CrudService<E, D>>,
    /// Server-wide cancellation.
    pub shutdown: ShutdownSignal,
}

impl<E, D> CrudState<E, D>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    /// Creates the state for one resource.
    pub fn new(service: Arc<dyn CrudService<E, D>>, shutdown: ShutdownSignal) -> Self {
        Self { service, shutdown }
    }
}

impl<E, D> Clone for CrudState<E, D>
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<E, D> FromRef<CrudState<E, D>> for ShutdownSignal
where
    E: Entity,
    D: Dto<Key = E::Key>,
{
    fn from_ref(state: &CrudState<E, D>) -> Self {
        state.shutdown.clone()
    }
}

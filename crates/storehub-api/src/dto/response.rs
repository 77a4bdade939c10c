//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when the backing store answers, `"degraded"` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Backing store in use.
    pub provider: String,
    /// Store connectivity.
    pub database: String,
    /// `SELECT 1` round trip, PostgreSQL only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
    /// Reason the store is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}

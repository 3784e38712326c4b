//! Response body of `GET /health`.

use serde::Serialize;

/// Overall service status plus one entry per dependency.
///
/// `status` is `"healthy"` when every check passes and `"degraded"` otherwise;
/// the handler answers 503 in the degraded case.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Dependencies the basket API cannot serve without.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// Basket store (Redis, or the in-memory store in development), probed with PING.
    pub store: CheckStatus,
}

/// Outcome of a single dependency probe: `"ok"` or `"error"`.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

//! Response DTOs for the sharenv API
//!
//! Only the health endpoint answers with JSON; everything else is shell text.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server is answering
    pub status: String,
    /// Variables directory being served
    pub vars_dir: String,
}

impl HealthResponse {
    pub fn ok(vars_dir: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            vars_dir: vars_dir.into(),
        }
    }
}

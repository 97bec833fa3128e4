//! Response types for the lotto API.

use serde::Serialize;

/// Liveness response for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Outcome message for `GET /api/update`.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
}

/// API error response, matching the `{"error": "<reason>"}` wire contract.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

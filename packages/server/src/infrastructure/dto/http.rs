//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoomDto {
    /// Freshly minted room token
    pub room: String,
    /// Navigable path containing the token
    pub url: String,
}

/// Response of `GET /api/health`
///
/// Only aggregate counts are exposed; room tokens are never listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub rooms: usize,
    pub connections: usize,
    /// RFC 3339
    pub started_at: String,
}

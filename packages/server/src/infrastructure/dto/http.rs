//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One registered room in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Connection id of the host
    pub host: String,
    /// RFC 3339, UTC
    pub created_at: String,
}

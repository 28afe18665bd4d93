//! API request bodies

use serde::{Deserialize, Serialize};

/// Body of POST /timers/increment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementRequest {
    /// Seconds to add; negative values remove time
    pub seconds: i64,
}

/// Body of POST /timers/:id/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRequest {
    pub delta: i64,
}

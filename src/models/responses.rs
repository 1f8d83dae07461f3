use serde::{Deserialize, Serialize};
use crate::models::domain::{ScoredArea, TransitStop};

/// Response for the affordability endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityResponse {
    pub areas: Vec<ScoredArea>,
    pub profession: String,
}

/// Response for the transport endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportResponse {
    pub stops: Vec<TransitStop>,
}

/// Response for the suggestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggested: Vec<ScoredArea>,
    pub all: Vec<ScoredArea>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub listings: usize,
    pub stops: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

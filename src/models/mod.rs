// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, IncomeEntry, TransitStop, ScoredArea, ScoringWeights, RecommendationSettings};
pub use requests::{AffordabilityQuery, SuggestRequest, BedroomsParam, FlagParam};
pub use responses::{AffordabilityResponse, TransportResponse, SuggestResponse, HealthResponse, ErrorResponse};

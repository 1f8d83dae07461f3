// Core algorithm exports
pub mod advisor;
pub mod clustering;
pub mod distance;
pub mod error;
pub mod filters;
pub mod recommender;
pub mod scoring;
pub mod store;

pub use advisor::{Advisor, AffordabilityResult, SuggestionQuery, SuggestionResult};
pub use clustering::{FeaturePoint, KMeans, Partitioner};
pub use distance::{degree_distance, nearest_stop_distance_km, is_within_proximity, DEGREES_TO_KM};
pub use error::{EngineError, EngineResult};
pub use filters::{apply_filters, matches_filters, Amenity, AreaFilters, BedroomFilter};
pub use recommender::select_suggestions;
pub use scoring::{affordability_raw_score, normalize_scores, preference_raw_score, round2};
pub use store::{DatasetStore, IncomeTable};

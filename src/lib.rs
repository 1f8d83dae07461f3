//! Area Advisor - affordability scoring and neighbourhood recommendations
//!
//! This library scores residential listings against a user's income and
//! lifestyle preferences. It filters a read-only dataset snapshot, measures
//! distance to public transport, normalizes scores within each request and
//! groups candidates to pick a best-fit set of suggestions.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Advisor, AreaFilters, DatasetStore, EngineError, KMeans, Partitioner};
pub use models::{Listing, IncomeEntry, TransitStop, ScoredArea, ScoringWeights, RecommendationSettings};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let advisor = Advisor::default();
        let store = DatasetStore::default();
        let result = advisor.compute_affordability(&store, &AreaFilters::default(), "Teacher");
        assert!(result.areas.is_empty());
    }
}

use std::fmt;
use std::sync::Arc;

use crate::core::{
    clustering::{KMeans, Partitioner},
    distance::{is_within_proximity, nearest_stop_distance_km},
    error::{EngineError, EngineResult},
    filters::{apply_filters, AreaFilters},
    recommender::select_suggestions,
    scoring::{affordability_raw_score, normalize_scores, preference_raw_score, round2},
    store::DatasetStore,
};
use crate::models::{Listing, RecommendationSettings, ScoredArea, ScoringWeights, TransitStop};

/// Result of the affordability flow
#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityResult {
    pub areas: Vec<ScoredArea>,
    pub profession: String,
}

/// Inputs of the suggestion flow
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub filters: AreaFilters,
    pub income: f64,
    pub family_size: u32,
    pub max_proximity_km: f64,
}

/// Result of the suggestion flow
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionResult {
    pub suggested: Vec<ScoredArea>,
    pub all: Vec<ScoredArea>,
}

/// A filtered listing carried through scoring in one record
#[derive(Debug)]
struct Candidate<'a> {
    listing: &'a Listing,
    proximity_km: Option<f64>,
    raw_score: f64,
}

/// Normalize a candidate set and build the output records in order
fn into_scored_areas(candidates: Vec<Candidate<'_>>) -> Vec<ScoredArea> {
    let raw: Vec<f64> = candidates.iter().map(|c| c.raw_score).collect();

    candidates
        .into_iter()
        .zip(normalize_scores(&raw))
        .map(|(c, score)| ScoredArea::from_listing(c.listing, round2(score), c.proximity_km.map(round2)))
        .collect()
}

/// Scoring engine entry point
///
/// # Flows
/// 1. Affordability: filter, score by profession income, normalize
/// 2. Suggestions: filter, proximity ceiling, preference score, normalize,
///    then pick the best group of candidates
///
/// Holds no per-request state; every call recomputes from the snapshot.
#[derive(Clone)]
pub struct Advisor {
    weights: ScoringWeights,
    recommendation: RecommendationSettings,
    partitioner: Arc<dyn Partitioner>,
}

impl Advisor {
    pub fn new(
        weights: ScoringWeights,
        recommendation: RecommendationSettings,
        partitioner: Arc<dyn Partitioner>,
    ) -> Self {
        Self {
            weights,
            recommendation,
            partitioner,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            ScoringWeights::default(),
            RecommendationSettings::default(),
            Arc::new(KMeans::default()),
        )
    }

    /// Score filtered listings by how affordable they are on the
    /// profession's average income
    ///
    /// # Arguments
    /// * `store` - Dataset snapshot
    /// * `filters` - Listing criteria
    /// * `profession` - Looked up case-insensitively; unknown professions use
    ///   the mean income of the table
    pub fn compute_affordability(
        &self,
        store: &DatasetStore,
        filters: &AreaFilters,
        profession: &str,
    ) -> AffordabilityResult {
        let income = store.incomes().resolve(profession);

        let candidates: Vec<Candidate> = apply_filters(store.listings(), filters)
            .into_iter()
            .map(|listing| Candidate {
                listing,
                proximity_km: None,
                raw_score: affordability_raw_score(income, listing.price),
            })
            .collect();

        tracing::debug!(
            "Affordability: {} of {} listings passed filters (income {:.2})",
            candidates.len(),
            store.listings().len(),
            income
        );

        AffordabilityResult {
            areas: into_scored_areas(candidates),
            profession: profession.to_string(),
        }
    }

    /// All transit stops in dataset order
    pub fn compute_transport_stops(&self, store: &DatasetStore) -> Vec<TransitStop> {
        store.stops().to_vec()
    }

    /// Score candidates against the user's preferences and pick suggestions
    ///
    /// # Errors
    /// * `InvalidArgument` for non-finite income or proximity
    /// * `NoStopsAvailable` if a candidate needs a proximity and the transit
    ///   snapshot is empty
    pub fn compute_suggestions(
        &self,
        store: &DatasetStore,
        query: &SuggestionQuery,
    ) -> EngineResult<SuggestionResult> {
        if !query.income.is_finite() {
            return Err(EngineError::InvalidArgument(format!("invalid income: {}", query.income)));
        }
        if query.max_proximity_km.is_nan() {
            return Err(EngineError::InvalidArgument("invalid proximity: NaN".to_string()));
        }

        let filtered = apply_filters(store.listings(), &query.filters);
        let filtered_count = filtered.len();

        let mut candidates = Vec::with_capacity(filtered_count);
        for listing in filtered {
            let proximity_km = nearest_stop_distance_km(listing, store.stops())?;
            if !is_within_proximity(proximity_km, query.max_proximity_km) {
                continue;
            }

            let raw_score = preference_raw_score(
                listing,
                query.income,
                &query.filters.amenities,
                proximity_km,
                query.family_size,
                &self.weights,
            );

            candidates.push(Candidate {
                listing,
                proximity_km: Some(proximity_km),
                raw_score,
            });
        }

        tracing::debug!(
            "Suggestions: {} listings passed filters, {} within {} km",
            filtered_count,
            candidates.len(),
            query.max_proximity_km
        );

        let all = into_scored_areas(candidates);
        let suggested = select_suggestions(&all, self.partitioner.as_ref(), &self.recommendation);

        Ok(SuggestionResult { suggested, all })
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Advisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Advisor")
            .field("weights", &self.weights)
            .field("recommendation", &self.recommendation)
            .finish_non_exhaustive()
    }
}

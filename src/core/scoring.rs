use crate::core::filters::Amenity;
use crate::models::{Listing, ScoringWeights};

/// Raw affordability: income divided by price
///
/// Non-positive prices score zero.
#[inline]
pub fn affordability_raw_score(income: f64, price: f64) -> f64 {
    if price > 0.0 {
        income / price
    } else {
        0.0
    }
}

/// Raw preference score for a candidate
///
/// ```text
/// raw = income / price
///     + amenity_bonus      per requested amenity the listing has
///     - proximity_penalty  * proximity_km
///     + family_bonus       if family_size > threshold and the area has a school
/// ```
pub fn preference_raw_score(
    listing: &Listing,
    income: f64,
    amenities: &[Amenity],
    proximity_km: f64,
    family_size: u32,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = affordability_raw_score(income, listing.price);

    let satisfied = amenities.iter().filter(|a| a.is_available(listing)).count();
    score += weights.amenity_bonus * satisfied as f64;

    score -= weights.proximity_penalty * proximity_km;

    if family_size > weights.family_size_threshold && listing.school {
        score += weights.family_bonus;
    }

    score
}

/// Normalize raw scores by the maximum of the set
///
/// When the maximum is not positive every score becomes zero. Results are
/// clamped to `[0, 1]`, so raw scores driven negative by the proximity
/// penalty come out as zero.
pub fn normalize_scores(raw_scores: &[f64]) -> Vec<f64> {
    let max_score = raw_scores.iter().copied().fold(0.0_f64, f64::max);

    raw_scores
        .iter()
        .map(|&score| {
            if max_score > 0.0 {
                (score / max_score).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Round to two decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_listing(price: f64, school: bool, park: bool) -> Listing {
        Listing {
            location: "Test".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            price,
            property_type: "Apartment".to_string(),
            bedrooms: 2,
            school,
            park,
            supermarket: false,
            furnished: false,
            pet_friendly: false,
            new_listing: false,
            family_friendly: false,
        }
    }

    #[test]
    fn test_affordability_raw_score() {
        assert_eq!(affordability_raw_score(100000.0, 100000.0), 1.0);
        assert_eq!(affordability_raw_score(100000.0, 200000.0), 0.5);
        assert_eq!(affordability_raw_score(100000.0, 0.0), 0.0);
    }

    #[test]
    fn test_normalize_scores() {
        assert_eq!(normalize_scores(&[1.0, 0.5]), vec![1.0, 0.5]);
        assert_eq!(normalize_scores(&[2.0, 1.0]), vec![1.0, 0.5]);
        assert!(normalize_scores(&[]).is_empty());
    }

    #[test]
    fn test_normalize_degenerate_sets() {
        assert_eq!(normalize_scores(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(normalize_scores(&[-0.2, -0.1]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_clamps_negative_scores() {
        let normalized = normalize_scores(&[0.5, -0.1]);
        assert_eq!(normalized, vec![1.0, 0.0]);
    }

    #[test]
    fn test_preference_amenity_bonus() {
        let weights = ScoringWeights::default();
        let listing = create_listing(100000.0, true, true);

        let none = preference_raw_score(&listing, 100000.0, &[], 0.0, 1, &weights);
        let both = preference_raw_score(
            &listing,
            100000.0,
            &[Amenity::School, Amenity::Park, Amenity::Supermarket],
            0.0,
            1,
            &weights,
        );

        assert_eq!(none, 1.0);
        assert!((both - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_preference_proximity_penalty() {
        let weights = ScoringWeights::default();
        let listing = create_listing(100000.0, false, false);

        let score = preference_raw_score(&listing, 100000.0, &[], 5.0, 1, &weights);
        assert!((score - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_preference_family_bonus() {
        let weights = ScoringWeights::default();
        let with_school = create_listing(100000.0, true, false);
        let without_school = create_listing(100000.0, false, false);

        let small_family = preference_raw_score(&with_school, 100000.0, &[], 0.0, 4, &weights);
        let large_family = preference_raw_score(&with_school, 100000.0, &[], 0.0, 5, &weights);
        let no_school = preference_raw_score(&without_school, 100000.0, &[], 0.0, 5, &weights);

        assert_eq!(small_family, 1.0);
        assert!((large_family - 1.05).abs() < 1e-12);
        assert_eq!(no_school, 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(0.333333), 0.33);
    }
}

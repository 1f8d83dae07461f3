use crate::core::clustering::{FeaturePoint, Partitioner};
use crate::models::{RecommendationSettings, ScoredArea};

/// Sort by score descending; ties keep their input order
fn rank_by_score(areas: &mut [ScoredArea]) {
    areas.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Mean score per group label, `None` for groups with no members
fn group_mean_scores(areas: &[ScoredArea], labels: &[usize], groups: usize) -> Vec<Option<f64>> {
    let mut sums = vec![0.0_f64; groups];
    let mut counts = vec![0_usize; groups];

    for (area, &label) in areas.iter().zip(labels) {
        if label < groups {
            sums[label] += area.score;
            counts[label] += 1;
        }
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum / count as f64))
        .collect()
}

/// Pick the ranked suggestion list from a scored candidate set
///
/// Small sets skip clustering and are ranked directly. Larger sets are
/// grouped over `(price, score)` and the members of the group with the highest
/// mean score are ranked. Both paths cap the result at `max_suggestions`.
pub fn select_suggestions(
    areas: &[ScoredArea],
    partitioner: &dyn Partitioner,
    settings: &RecommendationSettings,
) -> Vec<ScoredArea> {
    if areas.len() < settings.min_candidates_for_clustering {
        let mut suggested = areas.to_vec();
        rank_by_score(&mut suggested);
        suggested.truncate(settings.max_suggestions);
        return suggested;
    }

    let groups = settings.cluster_count.min(areas.len()).max(1);
    let points: Vec<FeaturePoint> = areas.iter().map(|a| [a.price, a.score]).collect();
    let labels = partitioner.partition(&points, groups);

    let means = group_mean_scores(areas, &labels, groups);
    let best_group = means
        .iter()
        .enumerate()
        .filter_map(|(label, mean)| mean.map(|m| (label, m)))
        .fold(None, |best: Option<(usize, f64)>, cur| match best {
            Some(b) if b.1 >= cur.1 => Some(b),
            _ => Some(cur),
        })
        .map(|(label, _)| label);

    let Some(best_group) = best_group else {
        tracing::warn!("Partitioner produced no usable groups for {} candidates", areas.len());
        return Vec::new();
    };

    tracing::debug!(
        "Selected group {} of {} (mean scores: {:?})",
        best_group,
        groups,
        means
    );

    let mut suggested: Vec<ScoredArea> = areas
        .iter()
        .zip(&labels)
        .filter(|(_, label)| **label == best_group)
        .map(|(area, _)| area.clone())
        .collect();

    rank_by_score(&mut suggested);
    suggested.truncate(settings.max_suggestions);
    suggested
}

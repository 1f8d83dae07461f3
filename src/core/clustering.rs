//! Unsupervised grouping of candidates
//!
//! The recommender only needs group labels, so the algorithm sits behind the
//! narrow [`Partitioner`] trait and can be swapped (or stubbed in tests).

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A 2-D feature vector, `[price, score]` in the recommendation flow
pub type FeaturePoint = [f64; 2];

/// Assigns each point to one of `k` groups
pub trait Partitioner: Send + Sync {
    /// Return one label in `0..k` per input point
    fn partition(&self, points: &[FeaturePoint], k: usize) -> Vec<usize>;
}

/// Lloyd's k-means with k-means++ seeding, Hartigan refinement and
/// multiple restarts
///
/// Uses raw Euclidean distance, no feature scaling. Every call reseeds from
/// `seed` and works on the points in sorted order, so the same set of points
/// gets the same grouping whatever order it arrives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    pub n_init: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_init: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug)]
struct Run {
    labels: Vec<usize>,
    inertia: f64,
}

#[inline]
fn squared_distance(a: &FeaturePoint, b: &FeaturePoint) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Index and squared distance of the closest centroid
#[inline]
fn closest_centroid(point: &FeaturePoint, centroids: &[FeaturePoint]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx, squared_distance(point, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

/// Relative improvement below which a single-point move is ignored
const MOVE_EPSILON: f64 = 1e-12;

#[inline]
fn mean(sum: &FeaturePoint, count: usize) -> FeaturePoint {
    [sum[0] / count as f64, sum[1] / count as f64]
}

/// Per-group coordinate sums and member counts
fn group_totals(points: &[FeaturePoint], labels: &[usize], k: usize) -> (Vec<FeaturePoint>, Vec<usize>) {
    let mut sums = vec![[0.0_f64; 2]; k];
    let mut counts = vec![0_usize; k];
    for (&label, point) in labels.iter().zip(points) {
        sums[label][0] += point[0];
        sums[label][1] += point[1];
        counts[label] += 1;
    }
    (sums, counts)
}

/// Sum of squared distances from each point to its group mean
fn within_group_sum_of_squares(points: &[FeaturePoint], labels: &[usize], k: usize) -> f64 {
    let (sums, counts) = group_totals(points, labels, k);
    labels
        .iter()
        .zip(points)
        .map(|(&label, point)| squared_distance(point, &mean(&sums[label], counts[label])))
        .sum()
}

impl KMeans {
    pub fn new(n_init: usize, max_iterations: usize, seed: u64) -> Self {
        Self {
            n_init,
            max_iterations,
            seed,
            ..Default::default()
        }
    }

    /// k-means++ seeding: each new centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen one
    fn init_centroids(&self, points: &[FeaturePoint], k: usize, rng: &mut StdRng) -> Vec<FeaturePoint> {
        let mut centroids = Vec::with_capacity(k);
        centroids.push(points[rng.gen_range(0..points.len())]);

        while centroids.len() < k {
            let weights: Vec<f64> = points
                .iter()
                .map(|p| closest_centroid(p, &centroids).1)
                .collect();

            // All remaining points coincide with a centroid
            let next = match WeightedIndex::new(&weights) {
                Ok(dist) => dist.sample(rng),
                Err(_) => rng.gen_range(0..points.len()),
            };
            centroids.push(points[next]);
        }

        centroids
    }

    fn run_once(&self, points: &[FeaturePoint], k: usize, rng: &mut StdRng) -> Run {
        let mut centroids = self.init_centroids(points, k, rng);
        let mut labels = vec![0; points.len()];

        for _ in 0..self.max_iterations.max(1) {
            for (label, point) in labels.iter_mut().zip(points) {
                *label = closest_centroid(point, &centroids).0;
            }

            let (sums, counts) = group_totals(points, &labels, k);

            let mut shift = 0.0_f64;
            for (idx, centroid) in centroids.iter_mut().enumerate() {
                // Empty clusters keep their previous centroid
                if counts[idx] == 0 {
                    continue;
                }
                let updated = mean(&sums[idx], counts[idx]);
                shift = shift.max(squared_distance(centroid, &updated));
                *centroid = updated;
            }

            if shift <= self.tolerance * self.tolerance {
                break;
            }
        }

        for (label, point) in labels.iter_mut().zip(points) {
            *label = closest_centroid(point, &centroids).0;
        }
        self.refine(points, &mut labels, k);

        let inertia = within_group_sum_of_squares(points, &labels, k);
        Run { labels, inertia }
    }

    /// Hartigan single-point moves from a Lloyd fixed point
    ///
    /// A point changes group only when the move strictly lowers the total
    /// within-group sum of squares, so this never makes a run worse.
    fn refine(&self, points: &[FeaturePoint], labels: &mut [usize], k: usize) {
        let (mut sums, mut counts) = group_totals(points, labels, k);

        for _ in 0..self.max_iterations.max(1) {
            let mut moved = false;

            for (idx, point) in points.iter().enumerate() {
                let from = labels[idx];
                if counts[from] <= 1 {
                    continue;
                }

                let n_from = counts[from] as f64;
                let removal_gain =
                    n_from / (n_from - 1.0) * squared_distance(point, &mean(&sums[from], counts[from]));

                let mut best: Option<(usize, f64)> = None;
                for to in (0..k).filter(|&to| to != from) {
                    let cost = if counts[to] == 0 {
                        0.0
                    } else {
                        let n_to = counts[to] as f64;
                        n_to / (n_to + 1.0) * squared_distance(point, &mean(&sums[to], counts[to]))
                    };
                    if best.map_or(true, |(_, c)| cost < c) {
                        best = Some((to, cost));
                    }
                }

                let Some((to, cost)) = best else { continue };
                if removal_gain - cost <= MOVE_EPSILON * removal_gain {
                    continue;
                }

                sums[from][0] -= point[0];
                sums[from][1] -= point[1];
                counts[from] -= 1;
                sums[to][0] += point[0];
                sums[to][1] += point[1];
                counts[to] += 1;
                labels[idx] = to;
                moved = true;
            }

            if !moved {
                break;
            }
        }
    }
}

impl Partitioner for KMeans {
    fn partition(&self, points: &[FeaturePoint], k: usize) -> Vec<usize> {
        if points.is_empty() {
            return Vec::new();
        }
        let k = k.clamp(1, points.len());
        if k == 1 {
            return vec![0; points.len()];
        }

        // Cluster in (price, score) order so labels depend on the point
        // values only, never on their input positions
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| {
            points[a][0]
                .total_cmp(&points[b][0])
                .then_with(|| points[a][1].total_cmp(&points[b][1]))
        });
        let canonical: Vec<FeaturePoint> = order.iter().map(|&idx| points[idx]).collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best: Option<Run> = None;

        for _ in 0..self.n_init.max(1) {
            let run = self.run_once(&canonical, k, &mut rng);
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let Some(best) = best else {
            return vec![0; points.len()];
        };

        let mut labels = vec![0; points.len()];
        for (&idx, &label) in order.iter().zip(&best.labels) {
            labels[idx] = label;
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_blobs() -> Vec<FeaturePoint> {
        vec![
            [100.0, 0.9],
            [101.0, 0.8],
            [102.0, 0.85],
            [500.0, 0.5],
            [501.0, 0.4],
            [502.0, 0.45],
            [900.0, 0.1],
            [901.0, 0.2],
            [902.0, 0.15],
        ]
    }

    #[test]
    fn test_separates_blobs() {
        let labels = KMeans::default().partition(&three_blobs(), 3);

        assert_eq!(labels.len(), 9);
        for group in labels.chunks(3) {
            assert!(group.iter().all(|&l| l == group[0]));
        }
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[3], labels[6]);
        assert_ne!(labels[0], labels[6]);
    }

    #[test]
    fn test_deterministic() {
        let kmeans = KMeans::default();
        assert_eq!(kmeans.partition(&three_blobs(), 3), kmeans.partition(&three_blobs(), 3));
    }

    #[test]
    fn test_labels_in_range() {
        let points: Vec<FeaturePoint> = (0..20).map(|i| [i as f64 * 7.0 % 13.0, 0.5]).collect();
        let labels = KMeans::default().partition(&points, 3);
        assert!(labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn test_identical_points() {
        let points = vec![[1.0, 1.0]; 4];
        let labels = KMeans::default().partition(&points, 3);
        assert_eq!(labels.len(), 4);
        assert!(labels.iter().all(|&l| l < 3));
    }

    /// Price-dominated points with no clear gaps between groups
    fn overlapping() -> Vec<FeaturePoint> {
        vec![
            [180000.0, 0.36],
            [120000.0, 0.46],
            [220000.0, 0.3],
            [150000.0, 0.37],
            [60000.0, 0.98],
            [95000.0, 0.64],
            [65000.0, 0.9],
            [70000.0, 0.85],
            [55000.0, 1.0],
        ]
    }

    /// Exhaustive minimum over every labelling, small inputs only
    fn optimal_inertia(points: &[FeaturePoint], k: usize) -> f64 {
        let total = k.pow(points.len() as u32);
        (0..total)
            .map(|mut code| {
                let labels: Vec<usize> = (0..points.len())
                    .map(|_| {
                        let label = code % k;
                        code /= k;
                        label
                    })
                    .collect();
                within_group_sum_of_squares(points, &labels, k)
            })
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_reaches_optimum_on_overlapping_points() {
        let points = overlapping();
        let labels = KMeans::default().partition(&points, 3);

        let inertia = within_group_sum_of_squares(&points, &labels, 3);
        let optimum = optimal_inertia(&points, 3);
        assert!(
            inertia <= optimum * (1.0 + 1e-9),
            "inertia {} above optimum {}",
            inertia,
            optimum
        );
    }

    #[test]
    fn test_grouping_ignores_input_order() {
        let kmeans = KMeans::default();
        let points = overlapping();

        // Same grouping means same-label pairs agree, whatever the label ids
        let pairs = |points: &[FeaturePoint]| -> Vec<(u64, u64, bool)> {
            let labels = kmeans.partition(points, 3);
            let mut pairs = Vec::new();
            for i in 0..points.len() {
                for j in 0..points.len() {
                    pairs.push((
                        points[i][0].to_bits(),
                        points[j][0].to_bits(),
                        labels[i] == labels[j],
                    ));
                }
            }
            pairs.sort();
            pairs
        };

        let forward = pairs(&points);
        for shift in 1..points.len() {
            let mut rotated = points.clone();
            rotated.rotate_left(shift);
            assert_eq!(pairs(&rotated), forward, "rotation {} changed the grouping", shift);
        }
        let mut reversed = points.clone();
        reversed.reverse();
        assert_eq!(pairs(&reversed), forward);
    }

    #[test]
    fn test_refine_only_improves() {
        let points = overlapping();
        // Poor starting split of the cheap end
        let mut labels = vec![2, 2, 2, 2, 0, 1, 0, 1, 0];
        let before = within_group_sum_of_squares(&points, &labels, 3);

        KMeans::default().refine(&points, &mut labels, 3);

        assert!(within_group_sum_of_squares(&points, &labels, 3) <= before);
    }

    #[test]
    fn test_degenerate_k() {
        let kmeans = KMeans::default();
        assert!(kmeans.partition(&[], 3).is_empty());
        assert_eq!(kmeans.partition(&[[1.0, 0.5], [2.0, 0.5]], 1), vec![0, 0]);
        assert_eq!(kmeans.partition(&[[1.0, 0.5]], 3), vec![0]);
    }
}

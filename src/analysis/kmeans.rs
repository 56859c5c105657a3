use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::tfidf::SparseRow;

#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub seed: u64,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            seed: 42,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

fn squared_norm(row: &SparseRow) -> f64 {
    row.iter().map(|(_, w)| w * w).sum()
}

fn dot(row: &SparseRow, centroid: &[f64]) -> f64 {
    row.iter().map(|&(idx, w)| w * centroid[idx]).sum()
}

fn squared_distance(row: &SparseRow, row_norm: f64, centroid: &[f64], centroid_norm: f64) -> f64 {
    (row_norm - 2.0 * dot(row, centroid) + centroid_norm).max(0.0)
}

fn norms_of(centroids: &[Vec<f64>]) -> Vec<f64> {
    centroids
        .iter()
        .map(|c| c.iter().map(|v| v * v).sum())
        .collect()
}

fn densify(row: &SparseRow, n_features: usize) -> Vec<f64> {
    let mut dense = vec![0.0; n_features];
    for &(idx, w) in row {
        dense[idx] = w;
    }
    dense
}

impl KMeans {
    /// Returns one cluster label per row. Uses at most `rows.len()` clusters.
    pub fn fit_predict(&self, rows: &[SparseRow], n_features: usize) -> Vec<usize> {
        if rows.is_empty() {
            return Vec::new();
        }

        let k = self.n_clusters.clamp(1, rows.len());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let row_norms: Vec<f64> = rows.iter().map(squared_norm).collect();

        let mut centroids = Self::init_plus_plus(rows, &row_norms, n_features, k, &mut rng);
        let mut labels = vec![0; rows.len()];

        for iteration in 0..self.max_iter {
            let centroid_norms = norms_of(&centroids);

            for (i, row) in rows.iter().enumerate() {
                labels[i] = nearest(row, row_norms[i], &centroids, &centroid_norms);
            }

            let mut sums = vec![vec![0.0; n_features]; k];
            let mut sizes = vec![0usize; k];
            for (row, &label) in rows.iter().zip(&labels) {
                sizes[label] += 1;
                for &(idx, w) in row {
                    sums[label][idx] += w;
                }
            }

            let mut shift = 0.0;
            for (cluster, sum) in sums.into_iter().enumerate() {
                // Empty clusters keep their previous centroid.
                if sizes[cluster] == 0 {
                    continue;
                }
                #[allow(clippy::cast_precision_loss)]
                let size = sizes[cluster] as f64;
                let updated: Vec<f64> = sum.into_iter().map(|v| v / size).collect();
                shift += updated
                    .iter()
                    .zip(&centroids[cluster])
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>();
                centroids[cluster] = updated;
            }

            if shift <= self.tol {
                debug!("k-means converged after {} iterations", iteration + 1);
                break;
            }
        }

        let centroid_norms = norms_of(&centroids);
        rows.iter()
            .enumerate()
            .map(|(i, row)| nearest(row, row_norms[i], &centroids, &centroid_norms))
            .collect()
    }

    fn init_plus_plus(
        rows: &[SparseRow],
        row_norms: &[f64],
        n_features: usize,
        k: usize,
        rng: &mut StdRng,
    ) -> Vec<Vec<f64>> {
        let first = rng.gen_range(0..rows.len());
        let mut centroids = vec![densify(&rows[first], n_features)];
        let mut closest: Vec<f64> = rows
            .iter()
            .zip(row_norms)
            .map(|(row, &norm)| squared_distance(row, norm, &centroids[0], row_norms[first]))
            .collect();

        while centroids.len() < k {
            let total: f64 = closest.iter().sum();
            let pick = if total > 0.0 {
                let target = rng.gen::<f64>() * total;
                let mut acc = 0.0;
                closest
                    .iter()
                    .position(|&d| {
                        acc += d;
                        acc > target
                    })
                    .unwrap_or(rows.len() - 1)
            } else {
                rng.gen_range(0..rows.len())
            };

            let centroid = densify(&rows[pick], n_features);
            for (i, row) in rows.iter().enumerate() {
                let d = squared_distance(row, row_norms[i], &centroid, row_norms[pick]);
                if d < closest[i] {
                    closest[i] = d;
                }
            }
            centroids.push(centroid);
        }

        centroids
    }
}

fn nearest(
    row: &SparseRow,
    row_norm: f64,
    centroids: &[Vec<f64>],
    centroid_norms: &[f64],
) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (cluster, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(row, row_norm, centroid, centroid_norms[cluster]);
        if d < best_distance {
            best = cluster;
            best_distance = d;
        }
    }
    best
}

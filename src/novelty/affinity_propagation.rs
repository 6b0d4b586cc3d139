use crate::classifiers::matrix::squared_distance;
use crate::core::error::{ActiveLearningError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Exemplar clustering by message passing between points.
///
/// Similarities are negative squared Euclidean distances; every point's
/// self-similarity is `preference`, so lower preferences yield fewer
/// exemplars. `damping` weighs the previous message against the new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffinityPropagation {
    damping: f64,
    preference: f64,
    max_iter: usize,
    convergence_iter: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Sorted indices (into the clustered rows) of the exemplars.
    pub exemplars: Vec<usize>,
    /// Per-row position in `exemplars`; empty when no exemplar emerged.
    pub labels: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

impl AffinityPropagation {
    pub fn new(damping: f64, preference: f64) -> Result<Self> {
        if !(0.5..1.0).contains(&damping) {
            return Err(ActiveLearningError::configuration(format!(
                "damping must be in [0.5, 1), got {damping}"
            )));
        }
        if !preference.is_finite() {
            return Err(ActiveLearningError::configuration(
                "preference must be finite",
            ));
        }
        Ok(Self {
            damping,
            preference,
            max_iter: 200,
            convergence_iter: 15,
        })
    }

    pub fn fit(&self, x: &[Vec<f64>]) -> Result<Clustering> {
        let n = x.len();
        if n == 0 {
            return Err(ActiveLearningError::configuration(
                "cannot cluster an empty set",
            ));
        }

        let mut s = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    s[i * n + j] = -squared_distance(&x[i], &x[j]);
                }
            }
        }

        if n == 1 {
            return Ok(Clustering {
                exemplars: vec![0],
                labels: vec![0],
                iterations: 0,
                converged: true,
            });
        }
        if let Some(sim) = uniform_similarity(&s, n) {
            let exemplars: Vec<usize> = if self.preference > sim {
                (0..n).collect()
            } else {
                vec![0]
            };
            let labels = if exemplars.len() == n {
                (0..n).collect()
            } else {
                vec![0; n]
            };
            return Ok(Clustering {
                exemplars,
                labels,
                iterations: 0,
                converged: true,
            });
        }

        for i in 0..n {
            s[i * n + i] = self.preference;
        }
        // tiny deterministic jitter so symmetric layouts do not oscillate
        let mut rng = StdRng::seed_from_u64(0);
        for v in s.iter_mut() {
            let noise: f64 = rng.random_range(-1.0..1.0);
            *v += (f64::EPSILON * *v + f64::MIN_POSITIVE * 100.0) * noise;
        }

        let d = self.damping;
        let mut r = vec![0.0; n * n];
        let mut a = vec![0.0; n * n];
        let mut history = vec![vec![false; self.convergence_iter]; n];
        let mut converged = false;
        let mut iterations = 0;
        let mut tmp = vec![0.0; n * n];

        for it in 0..self.max_iter {
            iterations = it + 1;

            // responsibilities
            for i in 0..n {
                let row = i * n;
                let (mut best, mut first, mut second) = (0, f64::NEG_INFINITY, f64::NEG_INFINITY);
                for k in 0..n {
                    let v = a[row + k] + s[row + k];
                    if v > first {
                        second = first;
                        first = v;
                        best = k;
                    } else if v > second {
                        second = v;
                    }
                }
                for k in 0..n {
                    let m = if k == best { second } else { first };
                    let new = s[row + k] - m;
                    r[row + k] = d * r[row + k] + (1.0 - d) * new;
                }
            }

            // availabilities
            for k in 0..n {
                let mut col = 0.0;
                for i in 0..n {
                    let v = r[i * n + k];
                    col += if i == k { v } else { v.max(0.0) };
                }
                for i in 0..n {
                    let v = r[i * n + k];
                    let rp = if i == k { v } else { v.max(0.0) };
                    let avail = col - rp;
                    tmp[i * n + k] = if i == k { avail } else { avail.min(0.0) };
                }
            }
            for (av, new) in a.iter_mut().zip(&tmp) {
                *av = d * *av + (1.0 - d) * new;
            }

            let slot = it % self.convergence_iter;
            let mut exemplar_count = 0;
            for (k, h) in history.iter_mut().enumerate() {
                let e = a[k * n + k] + r[k * n + k] > 0.0;
                h[slot] = e;
                if e {
                    exemplar_count += 1;
                }
            }

            if it >= self.convergence_iter {
                let stable = history.iter().all(|h| {
                    let on = h.iter().filter(|&&b| b).count();
                    on == 0 || on == self.convergence_iter
                });
                if stable && exemplar_count > 0 {
                    converged = true;
                    break;
                }
            }
        }

        let mut centers: Vec<usize> = (0..n)
            .filter(|&k| a[k * n + k] + r[k * n + k] > 0.0)
            .collect();
        if centers.is_empty() {
            log::warn!("affinity propagation found no exemplars after {iterations} iterations");
            return Ok(Clustering {
                exemplars: Vec::new(),
                labels: Vec::new(),
                iterations,
                converged,
            });
        }
        if !converged {
            log::warn!("affinity propagation did not converge in {iterations} iterations");
        }

        let assignment = assign(&s, n, &centers);
        for (c, center) in centers.iter_mut().enumerate() {
            let members: Vec<usize> = (0..n).filter(|&i| assignment[i] == c).collect();
            let mut best = members[0];
            let mut best_sum = f64::NEG_INFINITY;
            for &j in &members {
                let total: f64 = members.iter().map(|&i| s[i * n + j]).sum();
                if total > best_sum {
                    best_sum = total;
                    best = j;
                }
            }
            *center = best;
        }

        let assignment = assign(&s, n, &centers);
        let mut exemplars: Vec<usize> = assignment.iter().map(|&c| centers[c]).collect();
        exemplars.sort_unstable();
        exemplars.dedup();
        let labels = assignment
            .iter()
            .map(|&c| exemplars.binary_search(&centers[c]).unwrap_or(0))
            .collect();

        Ok(Clustering {
            exemplars,
            labels,
            iterations,
            converged,
        })
    }
}

/// Nearest exemplar (by similarity) for each row; exemplars own themselves.
fn assign(s: &[f64], n: usize, centers: &[usize]) -> Vec<usize> {
    (0..n)
        .map(|i| {
            if let Some(c) = centers.iter().position(|&k| k == i) {
                return c;
            }
            let mut best = 0;
            for (c, &k) in centers.iter().enumerate() {
                if s[i * n + k] > s[i * n + centers[best]] {
                    best = c;
                }
            }
            best
        })
        .collect()
}

/// The shared off-diagonal similarity when every pair is equally similar.
fn uniform_similarity(s: &[f64], n: usize) -> Option<f64> {
    let first = s[1];
    for i in 0..n {
        for j in 0..n {
            if i != j && s[i * n + j] != first {
                return None;
            }
        }
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_groups() -> Vec<Vec<f64>> {
        let mut x = Vec::new();
        for &(cx, cy) in &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)] {
            for i in 0..5 {
                let d = i as f64 * 0.1;
                x.push(vec![cx + d, cy - d]);
            }
        }
        x
    }

    #[test]
    fn damping_outside_range_is_rejected() {
        assert!(AffinityPropagation::new(0.3, -10.0).is_err());
        assert!(AffinityPropagation::new(1.0, -10.0).is_err());
        assert!(AffinityPropagation::new(0.5, -10.0).is_ok());
    }

    #[test]
    fn finds_one_exemplar_per_group() {
        let x = three_groups();
        let ap = AffinityPropagation::new(0.75, -5.0).unwrap();
        let c = ap.fit(&x).unwrap();
        assert_eq!(c.exemplars.len(), 3);
        assert_eq!(c.labels.len(), x.len());
        // every exemplar belongs to a different group of five
        let groups: Vec<usize> = c.exemplars.iter().map(|&e| e / 5).collect();
        assert_eq!(groups, vec![0, 1, 2]);
        // members of a group share a label
        for g in 0..3 {
            let l = c.labels[g * 5];
            assert!((g * 5..g * 5 + 5).all(|i| c.labels[i] == l));
        }
    }

    #[test]
    fn very_low_preference_merges_groups() {
        let x = three_groups();
        let few = AffinityPropagation::new(0.9, -10_000.0)
            .unwrap()
            .fit(&x)
            .unwrap();
        let many = AffinityPropagation::new(0.9, -5.0).unwrap().fit(&x).unwrap();
        assert!(few.exemplars.len() < many.exemplars.len());
    }

    #[test]
    fn single_point_is_its_own_exemplar() {
        let ap = AffinityPropagation::new(0.75, -180.0).unwrap();
        let c = ap.fit(&[vec![1.0, 2.0]]).unwrap();
        assert_eq!(c.exemplars, vec![0]);
    }

    #[test]
    fn identical_points_collapse_to_first() {
        let ap = AffinityPropagation::new(0.75, -180.0).unwrap();
        let c = ap.fit(&[vec![1.0], vec![1.0], vec![1.0]]).unwrap();
        assert_eq!(c.exemplars, vec![0]);
        assert_eq!(c.labels, vec![0, 0, 0]);
    }

    #[test]
    fn exemplars_are_indices_into_input() {
        let x = three_groups();
        let c = AffinityPropagation::new(0.75, -5.0).unwrap().fit(&x).unwrap();
        assert!(c.exemplars.iter().all(|&e| e < x.len()));
    }
}

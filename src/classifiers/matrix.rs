use crate::core::error::{ActiveLearningError, Result};
use ndarray::Array2;

/// Packs dense rows into the `(n_rows, n_features)` matrix the linfa models
/// train and predict on.
pub fn to_records(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().position(|r| r.len() != width) {
        return Err(ActiveLearningError::configuration(format!(
            "row {bad} has {} features, expected {width}",
            rows[bad].len()
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), width), flat)
        .map_err(|e| ActiveLearningError::configuration(format!("bad feature matrix: {e}")))
}

#[inline]
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// `1 / (n_features * var(X))` over all entries of `x`; falls back to
/// `1 / n_features` when the data has no spread.
pub fn scale_gamma(x: &Array2<f64>) -> f64 {
    let n_features = x.ncols();
    if n_features == 0 || x.nrows() == 0 {
        return 1.0;
    }
    let var = x.var(0.0);
    if var > 0.0 && var.is_finite() {
        1.0 / (n_features as f64 * var)
    } else {
        1.0 / n_features as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rows_become_a_matrix() {
        let m = to_records(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.dim(), (3, 2));
        assert_eq!(m[[2, 0]], 5.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = to_records(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Configuration(_)));
    }

    #[test]
    fn scale_gamma_uses_global_variance() {
        // entries 0, 2, 0, 2 -> var = 1, two features
        assert!((scale_gamma(&array![[0.0, 2.0], [0.0, 2.0]]) - 0.5).abs() < 1e-12);
        assert!((scale_gamma(&array![[3.0, 3.0]]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn squared_distance_sums_squares() {
        assert_eq!(squared_distance(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }
}

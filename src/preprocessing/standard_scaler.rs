use crate::core::error::{ActiveLearningError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column means and scales learned by [`StandardScaler::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Zero-mean, unit-variance column scaling.
///
/// Uses the population standard deviation; constant columns get a scale of
/// 1 so they map to zero instead of NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn fit(&self, x: &[Vec<f64>]) -> Result<ScalerParams> {
        let Some(width) = x.first().map(Vec::len) else {
            return Err(ActiveLearningError::configuration(
                "cannot fit a scaler on zero rows",
            ));
        };
        let n = x.len() as f64;
        let mut mean = vec![0.0; width];
        for row in x {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut var = vec![0.0; width];
        for row in x {
            for ((s, v), m) in var.iter_mut().zip(row).zip(&mean) {
                *s += (v - m) * (v - m);
            }
        }
        let scale = var
            .into_iter()
            .map(|s| {
                let sd = (s / n).sqrt();
                if sd > 0.0 && sd.is_finite() { sd } else { 1.0 }
            })
            .collect();

        Ok(ScalerParams { mean, scale })
    }

    pub fn transform(&self, x: &[Vec<f64>], params: &ScalerParams) -> Vec<Vec<f64>> {
        x.iter()
            .map(|row| {
                row.iter()
                    .zip(params.mean.iter().zip(&params.scale))
                    .map(|(v, (m, s))| (v - m) / s)
                    .collect()
            })
            .collect()
    }

    pub fn fit_transform(&self, x: &[Vec<f64>]) -> Result<(ScalerParams, Vec<Vec<f64>>)> {
        let params = self.fit(x)?;
        let out = self.transform(x, &params);
        Ok((params, out))
    }
}

/// Writes a scaled feature matrix as a headered CSV (`0,1,2,...`).
pub fn write_scaled_csv<P: AsRef<Path>>(path: P, x: &[Vec<f64>]) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    let width = x.first().map_or(0, Vec::len);
    w.write_record((0..width).map(|i| i.to_string()))?;
    for row in x {
        w.write_record(row.iter().map(|v| v.to_string()))?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn fit_transform_standardizes_columns() {
        let x = vec![vec![1.0, 10.0], vec![3.0, 10.0], vec![5.0, 10.0]];
        let (params, z) = StandardScaler.fit_transform(&x).unwrap();
        assert_eq!(params.mean, vec![3.0, 10.0]);
        let sd = (8.0f64 / 3.0).sqrt();
        assert!((params.scale[0] - sd).abs() < 1e-12);
        assert_eq!(params.scale[1], 1.0);
        assert!((z[0][0] + 2.0 / sd).abs() < 1e-12);
        assert_eq!(z[1], vec![0.0, 0.0]);
    }

    #[test]
    fn transform_applies_foreign_params() {
        let params = ScalerParams {
            mean: vec![1.0],
            scale: vec![2.0],
        };
        assert_eq!(StandardScaler.transform(&[vec![5.0]], &params), vec![vec![2.0]]);
    }

    #[test]
    fn fit_on_empty_is_error() {
        assert!(StandardScaler.fit(&[]).is_err());
    }

    #[test]
    fn writes_scaled_csv() {
        let tf = NamedTempFile::new().unwrap();
        write_scaled_csv(tf.path(), &[vec![0.5, -1.0]]).unwrap();
        assert_eq!(fs::read_to_string(tf.path()).unwrap(), "0,1\n0.5,-1\n");
    }
}

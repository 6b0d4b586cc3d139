use crate::core::error::{ActiveLearningError, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Immutable tabular dataset: one numeric feature vector and one categorical
/// label per row.
///
/// Rows are kept as parallel `features` / `labels` vectors. Every feature
/// vector has the same width, which is checked on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<String>) -> Result<Self> {
        let width = features.first().map_or(0, Vec::len);
        let names = (0..width).map(|i| format!("x{i}")).collect();
        Self::with_feature_names(names, features, labels)
    }

    pub fn with_feature_names(
        feature_names: Vec<String>,
        features: Vec<Vec<f64>>,
        labels: Vec<String>,
    ) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(ActiveLearningError::Dataset(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(row) = features.iter().position(|r| r.len() != feature_names.len()) {
            return Err(ActiveLearningError::Dataset(format!(
                "row {row} has {} features, expected {}",
                features[row].len(),
                feature_names.len()
            )));
        }
        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    /// Reads a headered CSV file.
    ///
    /// `label_column` is kept verbatim as the class label. The `drop_columns`
    /// (identifier columns such as a subject id and a row index) are removed
    /// only when all of them are present. Every remaining column must be
    /// numeric.
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        label_column: &str,
        drop_columns: &[String],
    ) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();

        let label_idx = headers
            .iter()
            .position(|h| h == label_column)
            .ok_or_else(|| {
                ActiveLearningError::Dataset(format!("missing label column '{label_column}'"))
            })?;

        let drop_all = !drop_columns.is_empty()
            && drop_columns
                .iter()
                .all(|d| headers.iter().any(|h| h == d.as_str()));

        let feature_cols: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| {
                *i != label_idx && !(drop_all && drop_columns.iter().any(|d| d.as_str() == *h))
            })
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let label = record.get(label_idx).ok_or_else(|| {
                ActiveLearningError::Dataset(format!("row {row}: missing label value"))
            })?;

            let mut values = Vec::with_capacity(feature_cols.len());
            for (col, name) in &feature_cols {
                let raw = record.get(*col).unwrap_or("").trim();
                let v: f64 = raw.parse().map_err(|_| {
                    ActiveLearningError::Dataset(format!(
                        "row {row}, column '{name}': '{raw}' is not numeric"
                    ))
                })?;
                values.push(v);
            }
            features.push(values);
            labels.push(label.trim().to_string());
        }

        Self::with_feature_names(
            feature_cols.into_iter().map(|(_, n)| n).collect(),
            features,
            labels,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn distinct_labels(&self) -> Vec<String> {
        distinct_labels(&self.labels)
    }
}

/// Sorted unique label values.
pub fn distinct_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(body: &str) -> NamedTempFile {
        let mut tf = NamedTempFile::new().unwrap();
        tf.write_all(body.as_bytes()).unwrap();
        tf.flush().unwrap();
        tf
    }

    fn drops() -> Vec<String> {
        vec!["Subject".into(), "Index".into()]
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let err = Dataset::new(vec![vec![1.0], vec![2.0]], vec!["a".into()]).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Dataset(_)));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Dataset::new(
            vec![vec![1.0, 2.0], vec![3.0]],
            vec!["a".into(), "b".into()],
        )
        .unwrap_err();
        assert!(matches!(err, ActiveLearningError::Dataset(_)));
    }

    #[test]
    fn csv_drops_identifier_columns_when_all_present() {
        let tf = write_csv("Subject,Index,f1,f2,Label\n1,0,0.5,1.5,Walking\n1,1,2.0,3.0,Standing\n");
        let ds = Dataset::from_csv(tf.path(), "Label", &drops()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.feature_names(), &["f1".to_string(), "f2".to_string()]);
        assert_eq!(ds.features()[1], vec![2.0, 3.0]);
        assert_eq!(ds.labels(), &["Walking".to_string(), "Standing".to_string()]);
    }

    #[test]
    fn csv_keeps_identifier_when_pair_incomplete() {
        let tf = write_csv("Index,f1,Label\n0,0.5,a\n1,2.0,b\n");
        let ds = Dataset::from_csv(tf.path(), "Label", &drops()).unwrap();
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.features()[1], vec![1.0, 2.0]);
    }

    #[test]
    fn csv_missing_label_column_is_error() {
        let tf = write_csv("f1,f2\n1,2\n");
        let err = Dataset::from_csv(tf.path(), "Label", &drops()).unwrap_err();
        assert!(matches!(err, ActiveLearningError::Dataset(_)));
    }

    #[test]
    fn csv_non_numeric_feature_is_error() {
        let tf = write_csv("f1,Label\nabc,a\n");
        let err = Dataset::from_csv(tf.path(), "Label", &drops()).unwrap_err();
        assert!(err.to_string().contains("not numeric"));
    }

    #[test]
    fn distinct_labels_are_sorted_and_unique() {
        let ds = Dataset::new(
            vec![vec![0.0], vec![1.0], vec![2.0]],
            vec!["b".into(), "a".into(), "b".into()],
        )
        .unwrap();
        assert_eq!(ds.distinct_labels(), vec!["a".to_string(), "b".to_string()]);
    }
}

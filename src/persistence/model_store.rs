use crate::core::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// `<models_dir>/<stem of output_name>.json`
pub fn model_path<P: AsRef<Path>>(models_dir: P, output_name: &str) -> PathBuf {
    let stem = Path::new(output_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(output_name);
    models_dir.as_ref().join(format!("{stem}.json"))
}

/// Writes `model` as JSON, creating parent directories as needed.
pub fn save_model<M: Serialize, P: AsRef<Path>>(model: &M, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, model)?;
    w.flush()?;
    log::info!("model saved to {}", path.display());
    Ok(())
}

pub fn load_model<M: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<M> {
    let r = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(r)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{Classifier, KNearestNeighbors, Model, SupportVectorClassifier};
    use tempfile::tempdir;

    fn training() -> (Vec<Vec<f64>>, Vec<String>) {
        let x = vec![vec![0.0], vec![0.2], vec![5.0], vec![5.3]];
        let y = ["a", "a", "b", "b"].iter().map(|s| s.to_string()).collect();
        (x, y)
    }

    #[test]
    fn path_uses_output_stem() {
        assert_eq!(
            model_path("Models", "knn5_3.csv"),
            PathBuf::from("Models").join("knn5_3.json")
        );
    }

    #[test]
    fn trained_svm_survives_a_round_trip() {
        let (x, y) = training();
        let mut m = Model::from(SupportVectorClassifier::rbf(1.0, None).unwrap());
        m.fit(&x, &y).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("svm.json");
        save_model(&m, &path).unwrap();
        let back: Model = load_model(&path).unwrap();

        let q = vec![vec![0.1], vec![5.1]];
        assert_eq!(back.predict(&q).unwrap(), m.predict(&q).unwrap());
        assert_eq!(back.name(), "SVM-rbf");
    }

    #[test]
    fn knn_keeps_its_name() {
        let (x, y) = training();
        let mut m = Model::from(KNearestNeighbors::new(2).unwrap());
        m.fit(&x, &y).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("knn.json");
        save_model(&m, &path).unwrap();
        let back: Model = load_model(&path).unwrap();
        assert_eq!(back.name(), "KNN2");
        assert_eq!(back.classes(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_model::<Model, _>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, crate::core::error::ActiveLearningError::Io(_)));
    }
}

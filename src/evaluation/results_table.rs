use crate::core::error::Result;
use crate::evaluation::IterationRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

const COLUMNS: [&str; 9] = [
    "Accuracy",
    "F1 Score",
    "Train Accuracy",
    "Number of Annotations",
    "damping",
    "preference",
    "Train_type",
    "Classes",
    "Completed At",
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
            TableFormat::Json => "json",
        }
    }
}

/// Append-only log of [`IterationRecord`]s in completion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    entries: Vec<IterationRecord>,
}

impl ResultsTable {
    pub fn push(&mut self, record: IterationRecord) {
        self.entries.push(record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&IterationRecord> {
        self.entries.last()
    }

    pub fn records(&self) -> &[IterationRecord] {
        &self.entries
    }

    /// Writes the whole table, replacing any previous file at `path`.
    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TableFormat) -> Result<()> {
        if let Some(dir) = path.as_ref().parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        match fmt {
            TableFormat::Csv => self.export_with_delimiter(path, b','),
            TableFormat::Tsv => self.export_with_delimiter(path, b'\t'),
            TableFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: u8) -> Result<()> {
        let mut w = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_path(path)?;
        w.write_record(COLUMNS)?;
        for r in &self.entries {
            w.serialize(r)?;
        }
        w.flush()?;
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(w, &self.entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::TrainType;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tempfile::tempdir;

    fn record(annotations: usize, acc: f64, train_type: TrainType) -> IterationRecord {
        IterationRecord {
            accuracy: acc,
            f1: 0.5,
            train_accuracy: 1.0,
            annotations,
            damping: 0.75,
            preference: -180.0,
            train_type,
            classes: 2,
            completed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn default_is_empty_and_latest_none() {
        let t = ResultsTable::default();
        assert!(t.is_empty());
        assert!(t.latest().is_none());
    }

    #[test]
    fn push_appends_in_order() {
        let mut t = ResultsTable::default();
        t.push(record(10, 0.6, TrainType::Initial));
        t.push(record(13, 0.7, TrainType::AffinityPropagation));
        assert_eq!(t.len(), 2);
        assert_eq!(t.latest().unwrap().annotations, 13);
        assert_eq!(t.records()[0].train_type, TrainType::Initial);
    }

    #[test]
    fn export_csv_with_two_rows() {
        let mut t = ResultsTable::default();
        t.push(record(10, 0.5, TrainType::Initial));
        t.push(record(15, 0.25, TrainType::Bvsb));

        let dir = tempdir().unwrap();
        let path = dir.path().join("Results").join("run.csv");
        t.export(&path, TableFormat::Csv).unwrap();

        let got = fs::read_to_string(&path).unwrap();
        let exp = "\
Accuracy,F1 Score,Train Accuracy,Number of Annotations,damping,preference,Train_type,Classes,Completed At
0.5,0.5,1.0,10,0.75,-180.0,Initial,2,2024-05-01T12:00:00Z
0.25,0.5,1.0,15,0.75,-180.0,BvSB,2,2024-05-01T12:00:00Z
";
        assert_eq!(got, exp);
    }

    #[test]
    fn export_tsv_uses_tabs() {
        let mut t = ResultsTable::default();
        t.push(record(10, 0.5, TrainType::Random));
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.tsv");
        t.export(&path, TableFormat::Tsv).unwrap();
        let got = fs::read_to_string(&path).unwrap();
        let mut lines = got.lines();
        assert!(lines.next().unwrap().starts_with("Accuracy\tF1 Score\t"));
        assert!(lines.next().unwrap().contains("\tRandom\t"));
    }

    #[test]
    fn export_json_array() {
        let mut t = ResultsTable::default();
        t.push(record(10, 0.5, TrainType::AffinityPropagation));
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        t.export(&path, TableFormat::Json).unwrap();
        let v: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Train_type"], "AP");
        assert_eq!(rows[0]["Number of Annotations"], 10);
    }

    #[test]
    fn export_empty_table_writes_header_only() {
        let t = ResultsTable::default();
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        t.export(&path, TableFormat::Csv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", COLUMNS.join(",")));
    }
}

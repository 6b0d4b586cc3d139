/// Per-row class probability estimates; column `j` belongs to `classes[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    classes: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Probabilities {
    pub fn new(classes: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { classes, rows }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Most probable class per row; ties go to the earlier column.
    pub fn most_probable(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let mut best = 0;
                for (j, &p) in row.iter().enumerate() {
                    if p > row[best] {
                        best = j;
                    }
                }
                self.classes.get(best).cloned().unwrap_or_default()
            })
            .collect()
    }
}

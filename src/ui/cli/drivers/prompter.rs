use crate::ui::types::choices::FieldSpec;
use anyhow::Result;

/// One wizard question and the hint shown under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question<'a> {
    pub title: &'a str,
    pub help: &'a str,
}

impl<'a> Question<'a> {
    pub fn new(title: &'a str, help: &'a str) -> Self {
        Self { title, help }
    }

    /// Title and description of a config field, as the schema declares them.
    pub fn for_field(spec: &'a FieldSpec) -> Self {
        Self::new(&spec.title, spec.description.as_deref().unwrap_or(""))
    }
}

/// Inclusive limits on a numeric answer, read from the schema's `range`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn of(spec: &FieldSpec) -> Self {
        Self {
            min: spec.min,
            max: spec.max,
        }
    }

    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Message explaining why `x` is rejected, if it is.
    pub fn violation(&self, x: f64) -> Option<String> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if x < lo || x > hi => {
                Some(format!("Must be between {lo} and {hi}"))
            }
            (Some(lo), None) if x < lo => Some(format!("Must be ≥ {lo}")),
            (None, Some(hi)) if x > hi => Some(format!("Must be ≤ {hi}")),
            _ => None,
        }
    }
}

/// Where the experiment wizard gets its answers.
///
/// The terminal implementation asks a person; tests replay scripted answers.
pub trait Prompter {
    fn confirm(&self, q: Question<'_>, default: bool) -> Result<bool>;

    fn text(&self, q: Question<'_>, default: &str) -> Result<String>;

    /// Sample sizes, iteration caps and seeds.
    fn count(&self, q: Question<'_>, default: u64, bounds: Bounds) -> Result<u64>;

    /// Real hyper-parameters such as C, damping or the AP preference.
    fn real(&self, q: Question<'_>, default: f64, bounds: Bounds) -> Result<f64>;

    /// Index into `options`.
    fn pick(&self, q: Question<'_>, options: &[String], default: usize) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::FieldKind;

    fn spec(min: Option<f64>, max: Option<f64>) -> FieldSpec {
        FieldSpec {
            name: "damping".into(),
            title: "Damping".into(),
            description: None,
            required: true,
            kind: FieldKind::Number,
            default: None,
            min,
            max,
        }
    }

    #[test]
    fn closed_range_rejects_both_sides() {
        let b = Bounds::of(&spec(Some(0.5), Some(1.0)));
        assert_eq!(b.violation(0.75), None);
        assert_eq!(b.violation(1.0), None);
        assert_eq!(b.violation(0.4).unwrap(), "Must be between 0.5 and 1");
        assert!(b.violation(1.5).is_some());
    }

    #[test]
    fn half_open_ranges() {
        let lower = Bounds {
            min: Some(1.0),
            max: None,
        };
        assert!(lower.violation(0.0).is_some());
        assert_eq!(lower.violation(1e9), None);

        let upper = Bounds {
            min: None,
            max: Some(10.0),
        };
        assert!(upper.violation(11.0).is_some());
        assert!(Bounds::default().is_open());
        assert_eq!(Bounds::default().violation(-1e9), None);
    }

    #[test]
    fn question_takes_field_title_and_description() {
        let mut s = spec(None, None);
        assert_eq!(Question::for_field(&s), Question::new("Damping", ""));
        s.description = Some("AP damping".into());
        assert_eq!(Question::for_field(&s).help, "AP damping");
    }
}

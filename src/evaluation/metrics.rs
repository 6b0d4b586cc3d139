use crate::evaluation::{ConfusionEvaluator, PerformanceEvaluator, PerformanceEvaluatorExt};

fn evaluate(truth: &[String], predicted: &[String]) -> ConfusionEvaluator {
    let mut ev = ConfusionEvaluator::new();
    ev.add_results(truth, predicted);
    ev
}

/// Share of exact matches; NaN on empty input.
pub fn accuracy(truth: &[String], predicted: &[String]) -> f64 {
    evaluate(truth, predicted).metric("accuracy").unwrap_or(f64::NAN)
}

/// Support-weighted mean of per-class F1; NaN on empty input.
pub fn weighted_f1(truth: &[String], predicted: &[String]) -> f64 {
    evaluate(truth, predicted)
        .metric("f1_weighted")
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &[&str]) -> Vec<String> {
        s.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn accuracy_and_f1_on_small_case() {
        let t = v(&["x", "y", "y", "y"]);
        let p = v(&["x", "y", "x", "y"]);
        assert_eq!(accuracy(&t, &p), 0.75);
        // x: p=.5 r=1 f1=2/3 (1); y: p=1 r=2/3 f1=.8 (3)
        let want = (2.0 / 3.0 + 0.8 * 3.0) / 4.0;
        assert!((weighted_f1(&t, &p) - want).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_are_nan() {
        assert!(accuracy(&[], &[]).is_nan());
        assert!(weighted_f1(&[], &[]).is_nan());
    }
}

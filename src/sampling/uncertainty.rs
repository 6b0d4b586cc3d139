use crate::core::error::{ActiveLearningError, Result};

fn check_request(probabilities: &[Vec<f64>], n: usize) -> Result<()> {
    if n > probabilities.len() {
        return Err(ActiveLearningError::configuration(format!(
            "batch of {n} requested from {} unlabelled rows",
            probabilities.len()
        )));
    }
    let classes = probabilities.first().map_or(0, Vec::len);
    if classes < 2 && n > 0 {
        return Err(ActiveLearningError::configuration(format!(
            "uncertainty sampling needs at least 2 classes, got {classes}"
        )));
    }
    if let Some(row) = probabilities.iter().position(|r| r.len() != classes) {
        return Err(ActiveLearningError::configuration(format!(
            "probability row {row} has {} columns, expected {classes}",
            probabilities[row].len()
        )));
    }
    Ok(())
}

/// Margin between the two largest probabilities of a row.
#[inline]
pub fn bvsb_margin(row: &[f64]) -> f64 {
    let mut best = f64::NEG_INFINITY;
    let mut second = f64::NEG_INFINITY;
    for &p in row {
        if p > best {
            second = best;
            best = p;
        } else if p > second {
            second = p;
        }
    }
    best - second
}

/// Shannon entropy in nats; zero probabilities contribute nothing.
#[inline]
pub fn entropy(row: &[f64]) -> f64 {
    -row.iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.ln())
        .sum::<f64>()
}

/// Best-versus-second-best sampling: the `n` rows whose top two class
/// probabilities are closest. Ties keep row order.
pub fn bvsb_sampling(probabilities: &[Vec<f64>], n: usize) -> Result<Vec<usize>> {
    check_request(probabilities, n)?;
    let margins: Vec<f64> = probabilities.iter().map(|r| bvsb_margin(r)).collect();
    let mut order: Vec<usize> = (0..margins.len()).collect();
    order.sort_by(|&a, &b| margins[a].total_cmp(&margins[b]));
    order.truncate(n);
    Ok(order)
}

/// Entropy sampling: the `n` rows with the highest predictive entropy.
/// Ties keep row order.
pub fn entropy_sampling(probabilities: &[Vec<f64>], n: usize) -> Result<Vec<usize>> {
    check_request(probabilities, n)?;
    let scores: Vec<f64> = probabilities.iter().map(|r| entropy(r)).collect();
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(n);
    Ok(order)
}

use crate::core::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Two well separated 2-D blobs, labels alternating `"a"`, `"b"`.
/// Class `a` sits around the origin, class `b` around `(6, 6)`.
pub fn two_blobs(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let (cx, label) = if i % 2 == 0 { (0.0, "a") } else { (6.0, "b") };
        features.push(vec![
            cx + rng.random_range(-1.0..1.0),
            cx + rng.random_range(-1.0..1.0),
        ]);
        labels.push(label.to_string());
    }
    Dataset::with_feature_names(vec!["x".into(), "y".into()], features, labels)
        .unwrap_or_else(|e| panic!("two_blobs: {e}"))
}

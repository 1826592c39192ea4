/// Weighted Shannon entropy of a possibility set
///
/// Computes `log(S) - sum(w * log(w)) / S` where `S` is the weight total.
/// Equivalent to the entropy of the normalized weight distribution, arranged
/// so a single pass over the weights suffices. Weights of zero or below
/// contribute nothing.
pub fn weighted_entropy(weights: impl Iterator<Item = f64>) -> f64 {
    let mut total = 0.0;
    let mut weighted_log_sum = 0.0;

    for w in weights {
        if w > 0.0 {
            total += w;
            weighted_log_sum += w * w.ln();
        }
    }

    if total > 0.0 {
        total.ln() - weighted_log_sum / total
    } else {
        0.0
    }
}

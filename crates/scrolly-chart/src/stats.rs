//! Summary statistics over the dataset.

/// Arithmetic mean, `None` for an empty dataset.
#[must_use]
pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().copied().map(f64::from).sum();
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    Some(sum / len)
}

/// Largest value, `None` for an empty dataset.
#[must_use]
pub fn max(values: &[u32]) -> Option<u32> {
    values.iter().copied().max()
}

/// The `count` largest values in descending order. Duplicates count
/// separately.
#[must_use]
pub fn top_values(values: &[u32], count: usize) -> Vec<u32> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(count);
    sorted
}

use super::model::Dataset;
use crate::error::{MarkError, Result};

/// Pair `a[i]` with `b[i]` for every index.
///
/// Both series must have the same length; nothing is truncated or padded.
pub fn align(a: &Dataset, b: &Dataset) -> Result<Vec<(f64, f64)>> {
    if a.len() != b.len() {
        log::warn!(
            "cannot align '{}' ({} values) with '{}' ({} values)",
            a.name,
            a.len(),
            b.name,
            b.len()
        );
        return Err(MarkError::LengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.values().zip(b.values()).collect())
}

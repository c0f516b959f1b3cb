//! Run-length expansion

use crate::error::{Error, Result};

/// Upper bound on the length of one expanded sequence.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

/// Repeat `values[i]` `counts[i]` times, in index order.
///
/// # Errors
/// [`Error::RunLengthMismatch`] when the two sequences differ in length,
/// [`Error::RunLengthTooLarge`] when the counts add up to more than
/// [`MAX_EXPANDED_LEN`].
///
/// # Example
///
/// ```
/// use glyphrip::presets::expand;
///
/// let colors = expand(&["red", "blue"], &[2, 3]).unwrap();
/// assert_eq!(colors, ["red", "red", "blue", "blue", "blue"]);
/// ```
pub fn expand<T: Clone>(values: &[T], counts: &[usize]) -> Result<Vec<T>> {
    if values.len() != counts.len() {
        return Err(Error::RunLengthMismatch {
            values: values.len(),
            counts: counts.len(),
        });
    }

    let total = counts
        .iter()
        .try_fold(0usize, |acc, &count| acc.checked_add(count))
        .filter(|&total| total <= MAX_EXPANDED_LEN)
        .ok_or(Error::RunLengthTooLarge {
            limit: MAX_EXPANDED_LEN,
        })?;
    let mut out = Vec::with_capacity(total);
    for (value, &count) in values.iter().zip(counts) {
        out.extend(std::iter::repeat_n(value.clone(), count));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand() {
        assert_eq!(
            expand(&["red", "blue"], &[2, 3]).unwrap(),
            vec!["red", "red", "blue", "blue", "blue"]
        );
    }

    #[test]
    fn test_zero_count_drops_value() {
        assert_eq!(expand(&["a", "b", "c"], &[1, 0, 1]).unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn test_mismatch_is_structural() {
        let err = expand(&["a", "b"], &[1]).unwrap_err();
        assert!(matches!(err, Error::RunLengthMismatch { values: 2, counts: 1 }));
        assert_eq!(err.stage(), "structural");
    }

    #[test]
    fn test_huge_count_is_rejected() {
        let err = expand(&["a"], &[usize::MAX]).unwrap_err();
        assert!(matches!(err, Error::RunLengthTooLarge { .. }));
        assert_eq!(err.stage(), "structural");
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let half = usize::MAX / 2 + 1;
        let err = expand(&["a", "b", "c"], &[half, half, half]).unwrap_err();
        assert!(matches!(err, Error::RunLengthTooLarge { .. }));
    }

    #[test]
    fn test_total_at_limit_is_accepted() {
        let out = expand(&["a", "b"], &[MAX_EXPANDED_LEN - 1, 1]).unwrap();
        assert_eq!(out.len(), MAX_EXPANDED_LEN);
        assert_eq!(out.last(), Some(&"b"));
    }

    #[test]
    fn test_empty() {
        let empty: [&str; 0] = [];
        assert!(expand(&empty, &[]).unwrap().is_empty());
    }
}

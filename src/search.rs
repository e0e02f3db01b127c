//! Binary search over virtual sorted sequences.
//!
//! Nothing here owns data: callers pass accessor closures, so the same
//! routines serve a plain slice or the chunked storage in
//! [`SortedAbsoluteArray`](crate::sorted_array::SortedAbsoluteArray) without
//! ever materializing a flat view.

/// Successor search over a virtual ascending sequence.
///
/// `value_at` is consulted for indices in `0..stop`; `stop` must be at least
/// 1. Returns the index of `needle` when it is present, otherwise the
/// smallest index whose value is greater than or equal to `needle` (the
/// insertion point); `stop` when `needle` exceeds the last element.
///
/// The virtual sequence must be ascending. If it is not, the returned index
/// is meaningless rather than an error.
pub fn find_index(value_at: impl Fn(usize) -> i64, stop: usize, needle: i64) -> usize {
    debug_assert!(stop >= 1);
    if needle <= value_at(0) {
        return 0;
    }
    if needle > value_at(stop - 1) {
        return stop;
    }

    let mut left = 0;
    let mut right = stop - 1;
    while left <= right {
        let mid = left + (right - left) / 2;
        let mid_value = value_at(mid);
        if mid_value == needle {
            return mid;
        } else if mid_value < needle {
            left = mid + 1;
        } else {
            // mid > 0 here: value_at(0) < needle after the first shortcut.
            right = mid - 1;
        }
    }
    left
}

/// Two-level successor search over a chunked virtual sequence.
///
/// The rows are probed through their first element, and the candidate row
/// backs up by one because a first-column search alone cannot pinpoint
/// elements in the middle of a row. The final row may be ragged:
/// `col_count_at(row)` gives each row's effective length. The result is the
/// flattened position `row * max_cols + column`.
pub fn find_index_2d(
    value_at: impl Fn(usize, usize) -> i64,
    row_count: usize,
    max_cols: usize,
    col_count_at: impl Fn(usize) -> usize,
    needle: i64,
) -> usize {
    let row = find_index(|row| value_at(row, 0), row_count, needle).saturating_sub(1);
    let col = find_index(|col| value_at(row, col), col_count_at(row), needle);
    row * max_cols + col
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_slice(values: &[i64], needle: i64) -> usize {
        find_index(|i| values[i], values.len(), needle)
    }

    #[test]
    fn test_find_index_exact() {
        let values = [10, 21, 32, 43, 54];
        assert_eq!(in_slice(&values, 10), 0);
        assert_eq!(in_slice(&values, 21), 1);
        assert_eq!(in_slice(&values, 32), 2);
        assert_eq!(in_slice(&values, 43), 3);
        assert_eq!(in_slice(&values, 54), 4);
    }

    #[test]
    fn test_find_index_insertion_point() {
        let values = [10, 21, 32, 43, 54];
        assert_eq!(in_slice(&values, 5), 0);
        assert_eq!(in_slice(&values, 11), 1);
        assert_eq!(in_slice(&values, 20), 1);
        assert_eq!(in_slice(&values, 33), 3);
        assert_eq!(in_slice(&values, 53), 4);
    }

    #[test]
    fn test_find_index_beyond_last() {
        let values = [10, 21, 32];
        assert_eq!(in_slice(&values, 33), 3);
        assert_eq!(in_slice(&values, i64::MAX), 3);
    }

    #[test]
    fn test_find_index_below_first() {
        let values = [10, 21, 32];
        assert_eq!(in_slice(&values, i64::MIN), 0);
        assert_eq!(in_slice(&values, 10), 0);
    }

    #[test]
    fn test_find_index_single_element() {
        assert_eq!(in_slice(&[7], 6), 0);
        assert_eq!(in_slice(&[7], 7), 0);
        assert_eq!(in_slice(&[7], 8), 1);
    }

    #[test]
    fn test_find_index_2d_flat() {
        // Two full rows of four columns.
        let rows = [[10, 21, 32, 43], [54, 65, 76, 87]];
        let at = |r: usize, c: usize| rows[r][c];
        let search = |needle| find_index_2d(at, rows.len(), 4, |_| 4, needle);

        assert_eq!(search(10), 0);
        assert_eq!(search(43), 3);
        assert_eq!(search(54), 4);
        assert_eq!(search(87), 7);
        assert_eq!(search(55), 5);
        assert_eq!(search(88), 8);
        assert_eq!(search(1), 0);
    }

    #[test]
    fn test_find_index_2d_ragged_last_row() {
        let rows = [vec![10, 21, 32, 43], vec![54, 65]];
        let at = |r: usize, c: usize| rows[r][c];
        let cols = |r: usize| rows[r].len();
        let search = |needle| find_index_2d(at, rows.len(), 4, cols, needle);

        assert_eq!(search(54), 4);
        assert_eq!(search(65), 5);
        // Past every stored value: insertion point at the total count.
        assert_eq!(search(66), 6);
    }

    #[test]
    fn test_find_index_2d_row_boundary_backs_up() {
        // A needle inside the first row must not be pinned to the row whose
        // first element matched.
        let rows = [[10, 21, 32, 43], [54, 65, 76, 87]];
        let at = |r: usize, c: usize| rows[r][c];
        let search = |needle| find_index_2d(at, rows.len(), 4, |_| 4, needle);

        assert_eq!(search(44), 4);
        assert_eq!(search(53), 4);
    }
}

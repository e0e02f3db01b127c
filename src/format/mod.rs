//! Plain-text and VT100 rendering of line ranges.
//!
//! This is a presentation layer on top of [`LineIndex`]: it consumes only the
//! read-only line/offset contract (`line`, `start_offset`, `end_offset`,
//! `line_number_at_offset` and the explicit `process_*` scan hints) and
//! renders segments of the content with a line-number gutter and column
//! rulers. The VT100 formatter additionally merges [`Highlight`] intervals
//! into escape-colored spans.

mod highlight;
mod plain;
mod ruler;
mod vt100;

pub use highlight::Highlight;
pub use plain::PlainTextFormatter;
pub use ruler::Ruler;
pub use vt100::Vt100Formatter;

use crate::line_index::LineIndex;

pub const DEFAULT_TAB_SIZE: usize = 4;

/// The gutter shared by every ruler line.
const RULER_PREFIX: &str = "    |";

/// Renders segments of indexed content.
///
/// Implementations provide [`by_lines`](SegmentFormatter::by_lines); the
/// offset-addressed entry points widen their range to whole lines (one line
/// of context on each side, clamped to the content) and delegate.
pub trait SegmentFormatter {
    fn index_mut(&mut self) -> &mut LineIndex;

    /// Renders lines `first_line..=last_line` (inclusive; clamped to the
    /// known line count).
    fn by_lines(&mut self, first_line: usize, last_line: usize, highlights: &[Highlight]) -> String;

    /// Renders the lines around one offset.
    fn by_offset(&mut self, offset: usize, highlights: &[Highlight]) -> String {
        self.by_offsets(offset, offset, highlights)
    }

    /// Renders the lines covering `[start_offset, end_offset]`, widened by
    /// one line of context on each side. Disordered bounds are swapped.
    fn by_offsets(
        &mut self,
        start_offset: usize,
        end_offset: usize,
        highlights: &[Highlight],
    ) -> String {
        let (start_offset, end_offset) = if end_offset < start_offset {
            (end_offset, start_offset)
        } else {
            (start_offset, end_offset)
        };

        let index = self.index_mut();
        let mut last_line = index.line_number_at_offset(end_offset).saturating_add(1);
        let line_target = index.known_line_count() + 1;
        index.process_to_line_count(line_target);

        let first_line = index.line_number_at_offset(start_offset).saturating_sub(1);
        last_line = last_line.min(index.known_line_count());

        self.by_lines(first_line, last_line, highlights)
    }
}

/// Widest visible line in the range, rounded up to the next multiple of 10
/// with a floor of 80 columns.
fn max_column(index: &mut LineIndex, first_line: usize, last_line: usize) -> usize {
    let mut widest = 0;
    for line in first_line..=last_line {
        let Ok(start) = index.start_offset(line) else {
            break;
        };
        let Ok(end) = index.end_offset(line) else {
            break;
        };
        widest = widest.max(end - start);
    }
    widest.max(80).div_ceil(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_column_floors_at_80() {
        let mut index = LineIndex::new("short\nlines\nonly");
        assert_eq!(max_column(&mut index, 0, 2), 80);
    }

    #[test]
    fn test_max_column_rounds_up_to_tens() {
        let long_line = "x".repeat(83);
        let mut index = LineIndex::new(format!("short\n{long_line}\nshort"));
        assert_eq!(max_column(&mut index, 0, 2), 90);

        let exact = "x".repeat(90);
        let mut index = LineIndex::new(exact);
        assert_eq!(max_column(&mut index, 0, 0), 90);
    }
}

use crate::format::{max_column, Highlight, Ruler, SegmentFormatter, DEFAULT_TAB_SIZE, RULER_PREFIX};
use crate::line_index::LineIndex;

/// Plain-text segment rendering: a line-number gutter, tab expansion and
/// column rulers. Highlights are ignored; use [`Vt100Formatter`] for colored
/// output.
///
/// [`Vt100Formatter`]: crate::format::Vt100Formatter
pub struct PlainTextFormatter<'a> {
    index: &'a mut LineIndex,
    tab_size: usize,
    top_ruler: Ruler,
    bottom_ruler: Ruler,
}

impl<'a> PlainTextFormatter<'a> {
    pub fn new(index: &'a mut LineIndex) -> PlainTextFormatter<'a> {
        PlainTextFormatter {
            index,
            tab_size: DEFAULT_TAB_SIZE,
            top_ruler: Ruler::TwoLineTop,
            bottom_ruler: Ruler::TwoLineBottom,
        }
    }

    /// Uses the combined one-line ruler at both ends.
    pub fn one_line_ruler(mut self) -> Self {
        self.top_ruler = Ruler::OneLine;
        self.bottom_ruler = Ruler::OneLine;
        self
    }

    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }
}

impl SegmentFormatter for PlainTextFormatter<'_> {
    fn index_mut(&mut self) -> &mut LineIndex {
        self.index
    }

    fn by_lines(&mut self, first_line: usize, last_line: usize, _highlights: &[Highlight]) -> String {
        self.index.process_to_line_count(last_line);
        let last_line = last_line.min(self.index.known_line_count());
        let width = max_column(self.index, first_line, last_line);

        let mut out = String::new();
        self.top_ruler.write_into(&mut out, RULER_PREFIX, width);
        out.push('\n');

        for line in first_line..=last_line {
            let Ok(bytes) = self.index.line(line) else {
                break;
            };
            let text = String::from_utf8_lossy(bytes).replace('\t', &" ".repeat(self.tab_size));
            out.push_str(&format!(" {:2} |", line + 1));
            out.push_str(&text);
            out.push('\n');
        }

        if last_line.saturating_sub(first_line) >= 5 {
            self.bottom_ruler.write_into(&mut out, RULER_PREFIX, width);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str =
        "first line\nsecond line\nthird line\nfourth line\nfifth line\nsixth line";

    const TOP_RULER: &str = "    |        10        20        30        40        50        60        70        80\n\
----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|\n";

    #[test]
    fn test_first_two_lines() {
        let mut index = LineIndex::new(CONTENT);
        let rendered = PlainTextFormatter::new(&mut index).by_lines(0, 1, &[]);
        let expected = format!("{TOP_RULER}  1 |first line\n  2 |second line\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_middle_lines() {
        let mut index = LineIndex::new(CONTENT);
        let rendered = PlainTextFormatter::new(&mut index).by_lines(1, 2, &[]);
        let expected = format!("{TOP_RULER}  2 |second line\n  3 |third line\n");
        assert_eq!(rendered, expected);
    }

    const BOTTOM_RULER: &str = "----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|\n    |        10        20        30        40        50        60        70        80\n";

    #[test]
    fn test_all_lines_gets_a_bottom_ruler() {
        let mut index = LineIndex::new(CONTENT);
        let rendered = PlainTextFormatter::new(&mut index).by_lines(0, usize::MAX, &[]);
        let expected = format!(
            "{TOP_RULER}  1 |first line\n  2 |second line\n  3 |third line\n  4 |fourth line\n  5 |fifth line\n  6 |sixth line\n{BOTTOM_RULER}"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_one_line_ruler() {
        let mut index = LineIndex::new(CONTENT);
        let rendered = PlainTextFormatter::new(&mut index)
            .one_line_ruler()
            .by_lines(0, usize::MAX, &[]);
        let ruler = "----|----+---10----+---20----+---30----+---40----+---50----+---60----+---70----+---80\n";
        let expected = format!(
            "{ruler}  1 |first line\n  2 |second line\n  3 |third line\n  4 |fourth line\n  5 |fifth line\n  6 |sixth line\n{ruler}"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_tabs_expand_to_tab_size() {
        let mut index = LineIndex::new("a\tb");
        let rendered = PlainTextFormatter::new(&mut index).tab_size(4).by_lines(0, 0, &[]);
        assert!(rendered.contains("  1 |a    b\n"));
    }

    #[test]
    fn test_by_offsets_widens_to_context_lines() {
        let mut index = LineIndex::new(CONTENT);
        let mut formatter = PlainTextFormatter::new(&mut index);
        // Offset 13 is inside line 1; expect lines 0..=2 rendered.
        let rendered = formatter.by_offset(13, &[]);
        assert!(rendered.contains("  1 |first line\n"));
        assert!(rendered.contains("  2 |second line\n"));
        assert!(rendered.contains("  3 |third line\n"));
        assert!(!rendered.contains("  4 |fourth line\n"));
    }
}

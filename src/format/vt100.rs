use crate::format::{max_column, Highlight, Ruler, SegmentFormatter, DEFAULT_TAB_SIZE, RULER_PREFIX};
use crate::line_index::LineIndex;

const HIGHLIGHT_END: &str = "\u{1b}[0m";

/// Background palette; a highlight's color index picks an entry modulo the
/// palette size.
const HIGHLIGHT_STARTS: [&str; 14] = [
    "\u{1b}[41;1;3;37m",
    "\u{1b}[42;1;3;37m",
    "\u{1b}[44;1;3;37m",
    "\u{1b}[45;1;3;37m",
    "\u{1b}[46;1;3;37m",
    "\u{1b}[100;1;3;37m",
    "\u{1b}[43;1;3;37m",
    "\u{1b}[101;1;3;200m",
    "\u{1b}[102;1;3;200m",
    "\u{1b}[104;1;3;200m",
    "\u{1b}[105;1;3;200m",
    "\u{1b}[106;1;3;200m",
    "\u{1b}[47;1;3;200m",
    "\u{1b}[103;1;3;200m",
];

const DIM: &str = "\u{1b}[38;2;200;200;200m";

/// VT100 segment rendering: the plain layout plus highlight-interval merging
/// and escape-colored spans. Whitespace is made visible everywhere (`·` for
/// spaces, an arrow-terminated run for tabs, `↵` for `\r`, `¶` for `\n`),
/// rendered dim gray outside highlights.
pub struct Vt100Formatter<'a> {
    index: &'a mut LineIndex,
    tab_size: usize,
    top_ruler: Ruler,
    bottom_ruler: Ruler,
}

impl<'a> Vt100Formatter<'a> {
    pub fn new(index: &'a mut LineIndex) -> Vt100Formatter<'a> {
        Vt100Formatter {
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

impl SegmentFormatter for Vt100Formatter<'_> {
    fn index_mut(&mut self) -> &mut LineIndex {
        self.index
    }

    fn by_lines(&mut self, first_line: usize, last_line: usize, highlights: &[Highlight]) -> String {
        self.index.process_to_line_count(last_line);
        let last_line = last_line.min(self.index.known_line_count());
        let width = max_column(self.index, first_line, last_line);

        let mut out = String::new();
        self.top_ruler.write_into(&mut out, RULER_PREFIX, width);
        out.push('\n');

        for line in first_line..=last_line {
            let Ok(line_start) = self.index.start_offset(line) else {
                break;
            };
            let Ok(bytes) = self.index.line_with_terminator(line) else {
                break;
            };
            let rendered = highlight_line(bytes, line_start, highlights, self.tab_size);
            out.push_str(&format!(" {:2} |", line + 1));
            out.push_str(&rendered);
            out.push('\n');
        }

        if last_line.saturating_sub(first_line) >= 5 {
            self.bottom_ruler.write_into(&mut out, RULER_PREFIX, width);
            out.push('\n');
        }
        out
    }
}

/// One merged, clipped slice of a line: `[start, end)` in line-local bytes,
/// colored or plain.
struct Segment {
    start: usize,
    end: usize,
    color: Option<usize>,
}

/// Splits a line into highlighted and plain segments.
///
/// Highlights are sorted by (start, end), clipped to the line, and resolved
/// left to right: a later highlight only covers bytes no earlier segment
/// claimed, and the gaps between them come out as plain segments.
fn merge_segments(highlights: &[Highlight], line_start: usize, line_len: usize) -> Vec<Segment> {
    let mut sorted: Vec<&Highlight> = highlights.iter().collect();
    sorted.sort_by_key(|highlight| (highlight.start_offset(), highlight.end_offset()));

    let mut segments = Vec::new();
    let mut current = 0;
    for highlight in sorted {
        if highlight.start_offset() >= line_start + line_len {
            continue;
        }
        if highlight.end_offset() <= line_start {
            continue;
        }
        let start = highlight.start_offset().saturating_sub(line_start).max(current);
        let end = (highlight.end_offset() - line_start).min(line_len);
        if start >= end {
            continue;
        }
        if current < start {
            segments.push(Segment {
                start: current,
                end: start,
                color: None,
            });
        }
        segments.push(Segment {
            start,
            end,
            color: Some(highlight.color()),
        });
        current = end;
    }
    if current < line_len {
        segments.push(Segment {
            start: current,
            end: line_len,
            color: None,
        });
    }
    segments
}

fn highlight_line(bytes: &[u8], line_start: usize, highlights: &[Highlight], tab_size: usize) -> String {
    let mut out = String::new();
    for segment in merge_segments(highlights, line_start, bytes.len()) {
        let text = String::from_utf8_lossy(&bytes[segment.start..segment.end]);
        match segment.color {
            Some(color) => {
                out.push_str(HIGHLIGHT_STARTS[color % HIGHLIGHT_STARTS.len()]);
                push_visible(&mut out, &text, tab_size);
                out.push_str(HIGHLIGHT_END);
            }
            None => push_visible_dim(&mut out, &text, tab_size),
        }
    }
    out
}

/// Whitespace made visible inside a highlighted span; the span's color is
/// already active.
fn push_visible(out: &mut String, text: &str, tab_size: usize) {
    for ch in text.chars() {
        match ch {
            ' ' => out.push('·'),
            '\t' => {
                for _ in 0..tab_size.saturating_sub(1) {
                    out.push('—');
                }
                out.push('→');
            }
            '\r' => out.push('↵'),
            '\n' => out.push('¶'),
            other => out.push(other),
        }
    }
}

/// Whitespace made visible outside highlights: each glyph is wrapped in a
/// dim gray escape of its own, everything else passes through untouched.
fn push_visible_dim(out: &mut String, text: &str, tab_size: usize) {
    for ch in text.chars() {
        match ch {
            ' ' => {
                out.push_str(DIM);
                out.push('·');
                out.push_str(HIGHLIGHT_END);
            }
            '\t' => {
                out.push_str(DIM);
                for _ in 0..tab_size.saturating_sub(1) {
                    out.push('—');
                }
                out.push('→');
                out.push_str(HIGHLIGHT_END);
            }
            '\r' => {
                out.push_str(DIM);
                out.push('↵');
                out.push_str(HIGHLIGHT_END);
            }
            '\n' => {
                out.push_str(DIM);
                out.push('¶');
                out.push_str(HIGHLIGHT_END);
            }
            other => out.push(other),
        }
    }
}

// Integration tests driving the formatters through the public API only.

use lazyline::format::{Highlight, PlainTextFormatter, SegmentFormatter, Vt100Formatter};
use lazyline::{LineIndex, Text};

const SOURCE: &str = "fn main() {\n    let greeting = \"hello\";\n    println!(\"{greeting}\");\n}\n";

/// Opt-in scan tracing for debugging: RUST_LOG=lazyline=trace
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn plain_segment_shows_numbered_lines_between_rulers() {
    init_tracing();
    let mut index = LineIndex::new(SOURCE);
    let rendered = PlainTextFormatter::new(&mut index).by_lines(0, 3, &[]);

    let mut lines = rendered.lines();
    assert_eq!(
        lines.next().unwrap(),
        "    |        10        20        30        40        50        60        70        80"
    );
    assert_eq!(
        lines.next().unwrap(),
        "----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|----+----|"
    );
    assert_eq!(lines.next().unwrap(), "  1 |fn main() {");
    assert_eq!(lines.next().unwrap(), "  2 |    let greeting = \"hello\";");
    assert_eq!(lines.next().unwrap(), "  3 |    println!(\"{greeting}\");");
    assert_eq!(lines.next().unwrap(), "  4 |}");
    assert_eq!(lines.next(), None);
}

#[test]
fn formatting_only_scans_the_requested_lines() {
    let big = "line\n".repeat(10_000);
    let mut index = LineIndex::new(big);
    let rendered = PlainTextFormatter::new(&mut index).by_lines(0, 2, &[]);
    assert!(rendered.contains("  1 |line"));
    // Three lines were requested; the scan must stay near the top.
    assert!(index.known_line_count() < 10);
    assert!(!index.is_fully_scanned());
}

#[test]
fn by_offsets_highlights_the_named_range() {
    let mut index = LineIndex::new(SOURCE);
    let start = SOURCE.find("greeting").unwrap();
    let highlight = Highlight::new(start, start + "greeting".len(), 0).unwrap();

    let mut formatter = Vt100Formatter::new(&mut index);
    let rendered = formatter.by_offsets(start, start + "greeting".len(), &[highlight]);
    assert!(rendered.contains("greeting\u{1b}[0m"));
    assert!(rendered.contains("\u{1b}[41;1;3;37m"));
}

#[test]
fn index_over_a_rendered_tree_round_trips() {
    // Build content structurally, render it, index it.
    let tree = Text::sequence([
        Text::str("alpha\n"),
        Text::str("beta\r\n").sub_sequence(0, 6).unwrap(),
        Text::sequence([Text::str("gam"), Text::str("ma")]),
    ]);
    let content = tree.to_bytes();

    let mut index = LineIndex::new(content.clone());
    assert_eq!(index.line_count(), 3);
    assert_eq!(index.line(0).unwrap(), b"alpha");
    assert_eq!(index.line(1).unwrap(), b"beta");
    assert_eq!(index.line(2).unwrap(), b"gamma");

    let rebuilt: Vec<u8> = index.lines_with_terminators().flatten().collect();
    assert_eq!(rebuilt, content);
}

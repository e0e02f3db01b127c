use std::sync::OnceLock;

/// Widest column the ruler templates cover.
const RULER_SPAN: usize = 1000;

fn columns_template() -> &'static str {
    static TEMPLATE: OnceLock<String> = OnceLock::new();
    TEMPLATE.get_or_init(|| {
        let mut out = String::with_capacity(RULER_SPAN);
        for decade in 1..=RULER_SPAN / 10 {
            out.push_str(&format!("{:>10}", decade * 10));
        }
        out
    })
}

fn ticks_template() -> &'static str {
    static TEMPLATE: OnceLock<String> = OnceLock::new();
    TEMPLATE.get_or_init(|| "----+----|".repeat(RULER_SPAN / 10))
}

fn combined_template() -> &'static str {
    static TEMPLATE: OnceLock<String> = OnceLock::new();
    TEMPLATE.get_or_init(|| {
        let mut out = String::with_capacity(RULER_SPAN);
        for decade in 1..=RULER_SPAN / 10 {
            out.push_str("----+");
            out.push_str(&format!("{:->5}", decade * 10));
        }
        out
    })
}

fn dashed(prefix: &str) -> String {
    prefix.replace(' ', "-")
}

/// Column ruler generators for the segment formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruler {
    /// Ticks and column numbers combined in a single line.
    OneLine,
    /// Column numbers above the tick line.
    TwoLineTop,
    /// Tick line above the column numbers.
    TwoLineBottom,
}

impl Ruler {
    /// Appends the ruler to `out`, without a trailing newline. `prefix`
    /// leads every ruler line, with its spaces turned into dashes on tick
    /// lines; `width` is clamped to the templates' span.
    pub fn write_into(&self, out: &mut String, prefix: &str, width: usize) {
        let width = width.min(RULER_SPAN);
        match self {
            Ruler::OneLine => {
                out.push_str(&dashed(prefix));
                out.push_str(&combined_template()[..width]);
            }
            Ruler::TwoLineTop => {
                out.push_str(prefix);
                out.push_str(&columns_template()[..width]);
                out.push('\n');
                out.push_str(&dashed(prefix));
                out.push_str(&ticks_template()[..width]);
            }
            Ruler::TwoLineBottom => {
                out.push_str(&dashed(prefix));
                out.push_str(&ticks_template()[..width]);
                out.push('\n');
                out.push_str(prefix);
                out.push_str(&columns_template()[..width]);
            }
        }
    }
}

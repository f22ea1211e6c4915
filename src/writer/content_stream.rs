//! Content stream construction.
//!
//! Each drawing primitive appends exactly one operator line, in call
//! order; nothing is buffered or reordered. Assembled text objects
//! enter the stream as a single `Raw` entry.

use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone)]
pub enum ContentStreamOp {
    /// Move to (m)
    MoveTo(f64, f64),
    /// Line to (l)
    LineTo(f64, f64),
    /// Cubic curve to (c)
    CurveTo(f64, f64, f64, f64, f64, f64),
    /// Rectangle (re)
    Rectangle(f64, f64, f64, f64),
    /// Close path (h)
    ClosePath,
    /// End path without painting (n)
    EndPath,
    /// Stroke (S)
    Stroke,
    /// Close and stroke (s)
    CloseStroke,
    /// Fill using the nonzero winding rule (f)
    Fill,
    /// Fill using the even-odd rule (f*)
    FillEvenOdd,
    /// Set line width (w)
    SetLineWidth(f64),
    /// Set fill gray level (g)
    SetFillGray(f64),
    /// Set stroke gray level (G)
    SetStrokeGray(f64),
    /// Set fill color RGB (rg)
    SetFillRgb(f64, f64, f64),
    /// Set stroke color RGB (RG)
    SetStrokeRgb(f64, f64, f64),
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate transformation matrix (cm)
    Transform(f64, f64, f64, f64, f64, f64),
    /// Paint an external object (Do)
    PaintXObject(String),
    /// A pre-assembled operator sequence (text objects)
    Raw(String),
}

/// Format a number with a fixed decimal point.
///
/// Output never depends on the process locale: integral values print
/// without a fraction, fractional values print with `.` and at most
/// five decimal places, trailing zeros trimmed.
pub fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Escape a string for inclusion in a PDF literal string.
///
/// Parentheses and the backslash are prefixed with a backslash.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builder for one page's content stream.
///
/// Append-only: operators accumulate in call order until the document
/// is finalized.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Serialize the stream to bytes, one operator per line.
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for op in &self.operations {
            // Vec<u8> writes cannot fail.
            write_op(&mut buf, op).expect("in-memory write");
            buf.push(b'\n');
        }
        buf
    }
}

/// Write a single operation to the buffer.
fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::MoveTo(x, y) => {
            write!(w, "{} {} m", fmt_number(*x), fmt_number(*y))
        },
        ContentStreamOp::LineTo(x, y) => {
            write!(w, "{} {} l", fmt_number(*x), fmt_number(*y))
        },
        ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3) => write!(
            w,
            "{} {} {} {} {} {} c",
            fmt_number(*x1),
            fmt_number(*y1),
            fmt_number(*x2),
            fmt_number(*y2),
            fmt_number(*x3),
            fmt_number(*y3)
        ),
        ContentStreamOp::Rectangle(x, y, width, height) => write!(
            w,
            "{} {} {} {} re",
            fmt_number(*x),
            fmt_number(*y),
            fmt_number(*width),
            fmt_number(*height)
        ),
        ContentStreamOp::ClosePath => write!(w, "h"),
        ContentStreamOp::EndPath => write!(w, "n"),
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::CloseStroke => write!(w, "s"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::FillEvenOdd => write!(w, "f*"),
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", fmt_number(*width)),
        ContentStreamOp::SetFillGray(level) => write!(w, "{} g", fmt_number(*level)),
        ContentStreamOp::SetStrokeGray(level) => write!(w, "{} G", fmt_number(*level)),
        ContentStreamOp::SetFillRgb(r, g, b) => write!(
            w,
            "{} {} {} rg",
            fmt_number(*r),
            fmt_number(*g),
            fmt_number(*b)
        ),
        ContentStreamOp::SetStrokeRgb(r, g, b) => write!(
            w,
            "{} {} {} RG",
            fmt_number(*r),
            fmt_number(*g),
            fmt_number(*b)
        ),
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} cm",
            fmt_number(*a),
            fmt_number(*b),
            fmt_number(*c),
            fmt_number(*d),
            fmt_number(*e),
            fmt_number(*f)
        ),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
        ContentStreamOp::Raw(raw) => write!(w, "{}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(ops: Vec<ContentStreamOp>) -> String {
        let mut builder = ContentStreamBuilder::new();
        for op in ops {
            builder.op(op);
        }
        String::from_utf8(builder.build()).unwrap()
    }

    #[test]
    fn test_number_format_fixed_decimal_point() {
        // Fixed '.' separator regardless of host locale conventions.
        assert_eq!(fmt_number(0.5), "0.5");
        assert_eq!(fmt_number(12.0), "12");
        assert_eq!(fmt_number(-3.25), "-3.25");
        assert_eq!(fmt_number(1.414214), "1.41421");
        assert_eq!(fmt_number(0.0), "0");
        assert!(!fmt_number(1234.5).contains(','));
    }

    #[test]
    fn test_path_operators() {
        let out = built(vec![
            ContentStreamOp::MoveTo(72.0, 100.5),
            ContentStreamOp::LineTo(144.0, 100.5),
            ContentStreamOp::Stroke,
        ]);
        assert_eq!(out, "72 100.5 m\n144 100.5 l\nS\n");
    }

    #[test]
    fn test_rectangle_and_fill_rules() {
        let out = built(vec![
            ContentStreamOp::Rectangle(10.0, 20.0, 100.0, 50.0),
            ContentStreamOp::Fill,
            ContentStreamOp::FillEvenOdd,
        ]);
        assert_eq!(out, "10 20 100 50 re\nf\nf*\n");
    }

    #[test]
    fn test_color_operators() {
        let out = built(vec![
            ContentStreamOp::SetFillGray(0.5),
            ContentStreamOp::SetStrokeRgb(1.0, 0.0, 0.25),
        ]);
        assert_eq!(out, "0.5 g\n1 0 0.25 RG\n");
    }

    #[test]
    fn test_transform_and_xobject() {
        let out = built(vec![
            ContentStreamOp::SaveState,
            ContentStreamOp::Transform(100.0, 0.0, 0.0, 50.0, 0.0, 0.0),
            ContentStreamOp::PaintXObject("Im1".to_string()),
            ContentStreamOp::RestoreState,
        ]);
        assert_eq!(out, "q\n100 0 0 50 cm\n/Im1 Do\nQ\n");
    }

    #[test]
    fn test_operations_keep_call_order() {
        let mut builder = ContentStreamBuilder::new();
        builder.op(ContentStreamOp::SetLineWidth(2.0));
        builder.op(ContentStreamOp::MoveTo(0.0, 0.0));
        builder.op(ContentStreamOp::LineTo(1.0, 1.0));
        let out = String::from_utf8(builder.build()).unwrap();
        let w = out.find("2 w").unwrap();
        let m = out.find("0 0 m").unwrap();
        let l = out.find("1 1 l").unwrap();
        assert!(w < m && m < l);
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_string("plain"), "plain");
    }

    #[test]
    fn test_raw_entry_is_verbatim() {
        let out = built(vec![ContentStreamOp::Raw("BT (x) Tj ET".to_string())]);
        assert_eq!(out, "BT (x) Tj ET\n");
    }
}

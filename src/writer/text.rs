//! Text object assembly.
//!
//! [`TextBlock`] accumulates one text object across multiple calls.
//! Each block owns its buffer, so independent blocks can be assembled
//! at the same time without interleaving; the buffer joins the page's
//! content stream as a single entry when the block is placed.

use crate::fonts::FontId;
use crate::writer::content_stream::{escape_string, fmt_number};

/// Horizontal alignment for single-call text placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Anchor at the left edge of the string (default)
    #[default]
    Left,
    /// Anchor at the right edge of the string
    Right,
    /// Anchor at the center of the string
    Center,
}

impl Align {
    /// Parse an alignment name, rejecting anything outside the allowed set.
    pub fn from_name(s: &str) -> crate::error::Result<Self> {
        match s {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" => Ok(Align::Center),
            _ => Err(crate::error::Error::InvalidConfigValue {
                key: "align",
                value: s.to_string(),
            }),
        }
    }

    /// Fraction of the string width the anchor moves left by.
    pub(crate) fn shift_factor(&self) -> f64 {
        match self {
            Align::Left => 0.0,
            Align::Right => 1.0,
            Align::Center => 0.5,
        }
    }
}

/// Options for single-call text placement.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Horizontal alignment
    pub align: Align,
    /// Character spacing (Tc), omitted when unset
    pub char_spacing: Option<f64>,
    /// Word spacing (Tw), omitted when unset
    pub word_spacing: Option<f64>,
}

impl TextOptions {
    /// Options with everything default (left-aligned, no extra spacing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set character spacing.
    pub fn with_char_spacing(mut self, spacing: f64) -> Self {
        self.char_spacing = Some(spacing);
        self
    }

    /// Set word spacing.
    pub fn with_word_spacing(mut self, spacing: f64) -> Self {
        self.word_spacing = Some(spacing);
        self
    }
}

/// Options for [`printnl`](crate::document::PageHandle::printnl).
///
/// Unset fields fall back to the page's remembered cursor state, then
/// to the documented defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    /// Font to print with; required on the first call
    pub font: Option<FontId>,
    /// Font size (default 12)
    pub size: Option<f64>,
    /// Left edge of the text (default 20)
    pub x: Option<f64>,
    /// Baseline of the first line (default 800, with a warning)
    pub y: Option<f64>,
}

impl PrintOptions {
    /// Options with every field inherited from the cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font.
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the font size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the starting position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}

/// An in-flight text object.
///
/// Created with `BT` already in the buffer; every setter appends its
/// operator in call order. Placing the block on a page closes it with
/// `ET` and appends the whole buffer as one content-stream entry.
#[derive(Debug, Clone)]
pub struct TextBlock {
    buf: String,
    fonts: Vec<FontId>,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBlock {
    /// Begin a new text object.
    pub fn new() -> Self {
        Self {
            buf: String::from("BT"),
            fonts: Vec::new(),
        }
    }

    fn push(&mut self, fragment: &str) -> &mut Self {
        self.buf.push(' ');
        self.buf.push_str(fragment);
        self
    }

    /// Set the text rise (Ts).
    pub fn rise(&mut self, rise: f64) -> &mut Self {
        self.push(&format!("{} Ts", fmt_number(rise)))
    }

    /// Set the render mode (Tr).
    pub fn render_mode(&mut self, mode: u8) -> &mut Self {
        self.push(&format!("{} Tr", mode))
    }

    /// Set the leading used by forced newlines (TL).
    pub fn leading(&mut self, leading: f64) -> &mut Self {
        self.push(&format!("{} TL", fmt_number(leading)))
    }

    /// Set character spacing (Tc).
    pub fn char_spacing(&mut self, spacing: f64) -> &mut Self {
        self.push(&format!("{} Tc", fmt_number(spacing)))
    }

    /// Set word spacing (Tw).
    pub fn word_spacing(&mut self, spacing: f64) -> &mut Self {
        self.push(&format!("{} Tw", fmt_number(spacing)))
    }

    /// Set horizontal scaling in percent (Tz).
    pub fn horizontal_scale(&mut self, scale: f64) -> &mut Self {
        self.push(&format!("{} Tz", fmt_number(scale)))
    }

    /// Rotate the text about `pivot` (or the origin) by `degrees`,
    /// emitted as a full placement matrix (Tm).
    pub fn rotate(&mut self, degrees: f64, pivot: Option<(f64, f64)>) -> &mut Self {
        let radians = degrees.to_radians();
        let (sin, cos) = radians.sin_cos();
        let (x, y) = pivot.unwrap_or((0.0, 0.0));
        self.push(&format!(
            "{} {} {} {} {} {} Tm",
            fmt_number(cos),
            fmt_number(sin),
            fmt_number(-sin),
            fmt_number(cos),
            fmt_number(x),
            fmt_number(y)
        ))
    }

    /// Select a font (Tf).
    ///
    /// Takes no size: the operator is emitted with a unit size, and the
    /// caller scales through the text matrix. The single-call placement
    /// path always takes an explicit size instead.
    pub fn font(&mut self, font: FontId) -> &mut Self {
        self.fonts.push(font);
        let name = font.resource_name();
        self.push(&format!("/{} 1 Tf", name))
    }

    /// Move to an absolute position (Tm with an identity rotation).
    pub fn move_abs(&mut self, x: f64, y: f64) -> &mut Self {
        self.push(&format!("1 0 0 1 {} {} Tm", fmt_number(x), fmt_number(y)))
    }

    /// Move relative to the current line start (Td).
    pub fn move_rel(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.push(&format!("{} {} Td", fmt_number(dx), fmt_number(dy)))
    }

    /// Force a line break (T*).
    pub fn newline(&mut self) -> &mut Self {
        self.push("T*")
    }

    /// Show literal text (Tj), with parentheses escaped.
    pub fn show(&mut self, text: &str) -> &mut Self {
        self.push(&format!("({}) Tj", escape_string(text)))
    }

    /// Close the object and hand back the buffer and referenced fonts.
    pub(crate) fn finish(mut self) -> (String, Vec<FontId>) {
        self.buf.push_str(" ET");
        (self.buf, self.fonts)
    }
}

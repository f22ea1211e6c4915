//! Built-in font descriptors and metrics.
//!
//! Only the standard viewer-resident fonts are supported; there is no
//! font embedding. Width tables for text layout live in [`metrics`].

pub mod metrics;

use crate::error::{Error, Result};

/// Index of a font registered on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// Resource-dictionary name for this font (F1, F2, ...).
    pub(crate) fn resource_name(&self) -> String {
        format!("F{}", self.0 + 1)
    }
}

/// Font program classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSubtype {
    /// Type 1 font program (default)
    #[default]
    Type1,
    /// TrueType font program
    TrueType,
    /// Type 3 glyph-procedure font
    Type3,
}

impl FontSubtype {
    /// PDF name for this subtype.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            FontSubtype::Type1 => "Type1",
            FontSubtype::TrueType => "TrueType",
            FontSubtype::Type3 => "Type3",
        }
    }

    /// Parse a subtype name, rejecting anything outside the allowed set.
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "Type1" => Ok(FontSubtype::Type1),
            "TrueType" => Ok(FontSubtype::TrueType),
            "Type3" => Ok(FontSubtype::Type3),
            _ => Err(Error::InvalidConfigValue {
                key: "Subtype",
                value: s.to_string(),
            }),
        }
    }
}

/// Character encoding declared on the font dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontEncoding {
    /// The font's built-in encoding; no /Encoding entry is written
    Standard,
    /// Windows ANSI encoding (default)
    #[default]
    WinAnsi,
    /// Mac OS Roman encoding
    MacRoman,
    /// Mac expert-set encoding
    MacExpert,
}

impl FontEncoding {
    /// PDF name for this encoding, if one is written at all.
    pub fn as_pdf_name(&self) -> Option<&'static str> {
        match self {
            FontEncoding::Standard => None,
            FontEncoding::WinAnsi => Some("WinAnsiEncoding"),
            FontEncoding::MacRoman => Some("MacRomanEncoding"),
            FontEncoding::MacExpert => Some("MacExpertEncoding"),
        }
    }

    /// Parse an encoding name, rejecting anything outside the allowed set.
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "StandardEncoding" => Ok(FontEncoding::Standard),
            "WinAnsiEncoding" => Ok(FontEncoding::WinAnsi),
            "MacRomanEncoding" => Ok(FontEncoding::MacRoman),
            "MacExpertEncoding" => Ok(FontEncoding::MacExpert),
            _ => Err(Error::InvalidConfigValue {
                key: "Encoding",
                value: s.to_string(),
            }),
        }
    }
}

/// The fourteen standard fonts every conformant viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseFont {
    /// Courier
    Courier,
    /// Courier-Bold
    CourierBold,
    /// Courier-Oblique
    CourierOblique,
    /// Courier-BoldOblique
    CourierBoldOblique,
    /// Helvetica (default)
    #[default]
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
    /// Times-Roman
    TimesRoman,
    /// Times-Bold
    TimesBold,
    /// Times-Italic
    TimesItalic,
    /// Times-BoldItalic
    TimesBoldItalic,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

impl BaseFont {
    /// PDF BaseFont name (e.g. "Times-Roman").
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            BaseFont::Courier => "Courier",
            BaseFont::CourierBold => "Courier-Bold",
            BaseFont::CourierOblique => "Courier-Oblique",
            BaseFont::CourierBoldOblique => "Courier-BoldOblique",
            BaseFont::Helvetica => "Helvetica",
            BaseFont::HelveticaBold => "Helvetica-Bold",
            BaseFont::HelveticaOblique => "Helvetica-Oblique",
            BaseFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BaseFont::TimesRoman => "Times-Roman",
            BaseFont::TimesBold => "Times-Bold",
            BaseFont::TimesItalic => "Times-Italic",
            BaseFont::TimesBoldItalic => "Times-BoldItalic",
            BaseFont::Symbol => "Symbol",
            BaseFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Parse a base-font name, rejecting anything outside the standard set.
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "Courier" => Ok(BaseFont::Courier),
            "Courier-Bold" => Ok(BaseFont::CourierBold),
            "Courier-Oblique" => Ok(BaseFont::CourierOblique),
            "Courier-BoldOblique" => Ok(BaseFont::CourierBoldOblique),
            "Helvetica" => Ok(BaseFont::Helvetica),
            "Helvetica-Bold" => Ok(BaseFont::HelveticaBold),
            "Helvetica-Oblique" => Ok(BaseFont::HelveticaOblique),
            "Helvetica-BoldOblique" => Ok(BaseFont::HelveticaBoldOblique),
            "Times-Roman" => Ok(BaseFont::TimesRoman),
            "Times-Bold" => Ok(BaseFont::TimesBold),
            "Times-Italic" => Ok(BaseFont::TimesItalic),
            "Times-BoldItalic" => Ok(BaseFont::TimesBoldItalic),
            "Symbol" => Ok(BaseFont::Symbol),
            "ZapfDingbats" => Ok(BaseFont::ZapfDingbats),
            _ => Err(Error::InvalidConfigValue {
                key: "BaseFont",
                value: s.to_string(),
            }),
        }
    }
}

/// Validated font description.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontOptions {
    /// Font program classification
    pub subtype: FontSubtype,
    /// Declared encoding
    pub encoding: FontEncoding,
    /// Standard base-font name
    pub base_font: BaseFont,
}

impl FontOptions {
    /// Create options with the defaults (Type1, WinAnsi, Helvetica).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subtype.
    pub fn with_subtype(mut self, subtype: FontSubtype) -> Self {
        self.subtype = subtype;
        self
    }

    /// Set the encoding.
    pub fn with_encoding(mut self, encoding: FontEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the base font.
    pub fn with_base_font(mut self, base_font: BaseFont) -> Self {
        self.base_font = base_font;
        self
    }

    /// Build options from names, rejecting any value outside its allowed set.
    pub fn parse(subtype: &str, encoding: &str, base_font: &str) -> Result<Self> {
        Ok(Self {
            subtype: FontSubtype::from_name(subtype)?,
            encoding: FontEncoding::from_name(encoding)?,
            base_font: BaseFont::from_name(base_font)?,
        })
    }
}

/// A font registered on a document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FontRecord {
    pub(crate) object: crate::object::ObjectRef,
    pub(crate) options: FontOptions,
}

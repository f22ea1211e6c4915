//! Document configuration.

use crate::error::{Error, Result};

/// PDF version written to the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfVersion {
    /// PDF 1.0
    Pdf1_0,
    /// PDF 1.1
    Pdf1_1,
    /// PDF 1.2
    Pdf1_2,
    /// PDF 1.3
    Pdf1_3,
    /// PDF 1.4 (default)
    #[default]
    Pdf1_4,
    /// PDF 1.5
    Pdf1_5,
    /// PDF 1.6
    Pdf1_6,
    /// PDF 1.7
    Pdf1_7,
}

impl PdfVersion {
    /// Header form of the version, e.g. "1.4".
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::Pdf1_0 => "1.0",
            PdfVersion::Pdf1_1 => "1.1",
            PdfVersion::Pdf1_2 => "1.2",
            PdfVersion::Pdf1_3 => "1.3",
            PdfVersion::Pdf1_4 => "1.4",
            PdfVersion::Pdf1_5 => "1.5",
            PdfVersion::Pdf1_6 => "1.6",
            PdfVersion::Pdf1_7 => "1.7",
        }
    }

    /// Parse a version string, rejecting anything outside the supported set.
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "1.0" => Ok(PdfVersion::Pdf1_0),
            "1.1" => Ok(PdfVersion::Pdf1_1),
            "1.2" => Ok(PdfVersion::Pdf1_2),
            "1.3" => Ok(PdfVersion::Pdf1_3),
            "1.4" => Ok(PdfVersion::Pdf1_4),
            "1.5" => Ok(PdfVersion::Pdf1_5),
            "1.6" => Ok(PdfVersion::Pdf1_6),
            "1.7" => Ok(PdfVersion::Pdf1_7),
            _ => Err(Error::InvalidConfigValue {
                key: "Version",
                value: s.to_string(),
            }),
        }
    }
}

/// Initial view mode, written as /PageMode in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    /// Neither outline nor thumbnails visible (default)
    #[default]
    UseNone,
    /// Document outline visible
    UseOutlines,
    /// Thumbnail images visible
    UseThumbs,
    /// Full-screen mode
    FullScreen,
}

impl PageMode {
    /// PDF name for this mode.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            PageMode::UseNone => "UseNone",
            PageMode::UseOutlines => "UseOutlines",
            PageMode::UseThumbs => "UseThumbs",
            PageMode::FullScreen => "FullScreen",
        }
    }

    /// Parse a page-mode name, rejecting anything outside the allowed set.
    pub fn from_name(s: &str) -> Result<Self> {
        match s {
            "UseNone" => Ok(PageMode::UseNone),
            "UseOutlines" => Ok(PageMode::UseOutlines),
            "UseThumbs" => Ok(PageMode::UseThumbs),
            "FullScreen" => Ok(PageMode::FullScreen),
            _ => Err(Error::InvalidConfigValue {
                key: "PageMode",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for document generation.
///
/// Every field has an explicit default; values outside an enumerated set
/// cannot be constructed.
#[derive(Debug, Clone, Default)]
pub struct DocumentConfig {
    /// PDF version for the file header
    pub version: PdfVersion,
    /// Initial view mode for the catalog
    pub page_mode: PageMode,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Creation timestamp for the Info dictionary. Never sampled
    /// implicitly; serialization stays deterministic unless set.
    pub creation_date: Option<chrono::DateTime<chrono::Utc>>,
    /// Whether to compress content streams with FlateDecode
    pub compress: bool,
}

impl DocumentConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PDF version.
    pub fn with_version(mut self, version: PdfVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the initial view mode.
    pub fn with_page_mode(mut self, mode: PageMode) -> Self {
        self.page_mode = mode;
        self
    }

    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set document keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the creation timestamp recorded in the Info dictionary.
    pub fn with_creation_date(mut self, when: chrono::DateTime<chrono::Utc>) -> Self {
        self.creation_date = Some(when);
        self
    }

    /// Enable or disable content-stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Format the creation date as a PDF date string (D:YYYYMMDDHHMMSSZ).
    pub(crate) fn pdf_creation_date(&self) -> Option<String> {
        self.creation_date
            .map(|d| d.format("D:%Y%m%d%H%M%SZ").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_round_trip() {
        assert_eq!(PdfVersion::from_name("1.4").unwrap(), PdfVersion::Pdf1_4);
        assert_eq!(PdfVersion::Pdf1_2.as_str(), "1.2");
    }

    #[test]
    fn test_version_rejects_unknown() {
        let err = PdfVersion::from_name("2.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { key: "Version", .. }));
    }

    #[test]
    fn test_page_mode_rejects_unknown() {
        assert!(PageMode::from_name("UseAttachments").is_err());
        assert_eq!(PageMode::from_name("UseOutlines").unwrap(), PageMode::UseOutlines);
    }

    #[test]
    fn test_config_builder() {
        let config = DocumentConfig::new()
            .with_title("Report")
            .with_author("Someone")
            .with_page_mode(PageMode::UseOutlines)
            .with_compress(true);
        assert_eq!(config.title.as_deref(), Some("Report"));
        assert_eq!(config.page_mode, PageMode::UseOutlines);
        assert!(config.compress);
    }

    #[test]
    fn test_pdf_creation_date_format() {
        use chrono::TimeZone;
        let when = chrono::Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let config = DocumentConfig::new().with_creation_date(when);
        assert_eq!(config.pdf_creation_date().unwrap(), "D:20240315093000Z");
    }

    #[test]
    fn test_no_creation_date_by_default() {
        assert!(DocumentConfig::new().pdf_creation_date().is_none());
    }
}

//! Document assembly and the page-scoped drawing API.
//!
//! A [`Document`] owns the object registry, the page tree, and the font
//! and image sets. Drawing happens through [`PageHandle`]s; `close`
//! runs the single serialization pass and yields the file bytes.

use std::collections::HashMap;
use std::io::Write;

use crate::config::{DocumentConfig, PageMode};
use crate::error::{Error, Result};
use crate::fonts::{metrics, FontId, FontOptions, FontRecord};
use crate::image::{ImageDescriptor, ImageId, ImagePlacement};
use crate::object::{Object, ObjectRef};
use crate::pages::{PageAttributes, PageId, PageTree};
use crate::registry::{ObjectRegistry, Slot};
use crate::writer::content_stream::{escape_string, fmt_number, ContentStreamOp};
use crate::writer::serializer::write_document;
use crate::writer::text::{Align, PrintOptions, TextBlock, TextOptions};

/// An image registered on a document.
#[derive(Debug)]
struct ImageRecord {
    object: ObjectRef,
    descriptor: ImageDescriptor,
}

/// A PDF document under construction.
pub struct Document {
    config: DocumentConfig,
    registry: ObjectRegistry,
    catalog: ObjectRef,
    pages_root: ObjectRef,
    info: ObjectRef,
    tree: PageTree,
    fonts: Vec<FontRecord>,
    images: Vec<ImageRecord>,
}

impl Document {
    /// Create a document with the given configuration.
    ///
    /// The catalog, pages-root, and info dictionary claim the first
    /// three object numbers; pages, content streams, fonts, and images
    /// are numbered in creation order after them.
    pub fn new(config: DocumentConfig) -> Self {
        let mut registry = ObjectRegistry::new();
        let catalog = registry.register(Slot::Catalog);
        let pages_root = registry.register(Slot::PagesRoot);
        let info = registry.register(Slot::Info);
        Self {
            config,
            registry,
            catalog,
            pages_root,
            info,
            tree: PageTree::new(),
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Create a new page under `parent`, or under the pages-root when
    /// `parent` is `None`.
    ///
    /// No attributes are copied from the parent; unset attributes
    /// resolve lazily through the parent chain.
    pub fn new_page(&mut self, parent: Option<PageId>, attrs: PageAttributes) -> PageId {
        let id = self.tree.next_id();
        let object = self.registry.register(Slot::Page(id));
        let contents = self.registry.register(Slot::Contents(id));
        self.tree.insert(parent, attrs, object, contents)
    }

    /// Register a font, validated at creation.
    pub fn font(&mut self, options: FontOptions) -> FontId {
        let id = FontId(self.fonts.len());
        let object = self.registry.register(Slot::Font(id));
        self.fonts.push(FontRecord { object, options });
        id
    }

    /// Register an already-encoded image.
    pub fn add_image(&mut self, descriptor: ImageDescriptor) -> ImageId {
        let id = ImageId(self.images.len());
        let object = self.registry.register(Slot::Image(id));
        self.images.push(ImageRecord { object, descriptor });
        id
    }

    /// Advance width of `text` in the given font at size 1.
    pub fn string_width(&self, font: FontId, text: &str) -> Result<f64> {
        metrics::string_width(self.fonts[font.0].options.base_font, text)
    }

    /// Drawing handle for a page.
    pub fn page(&mut self, id: PageId) -> PageHandle<'_> {
        PageHandle { doc: self, id }
    }

    /// The page tree (for counts and traversal).
    pub fn pages(&self) -> &PageTree {
        &self.tree
    }

    /// Number of leaf pages in the document.
    pub fn page_count(&self) -> usize {
        self.tree.total_count()
    }

    /// Finalize the document and return the file bytes.
    ///
    /// This must be the terminal call; it validates mandatory inherited
    /// attributes, assembles every registered object, and runs the
    /// serialization pass.
    pub fn close(mut self) -> Result<Vec<u8>> {
        self.tree.check_mandatory_attributes()?;

        let mut objects = Vec::with_capacity(self.registry.highest_id() as usize);
        for (r, slot) in self.registry.iter() {
            let body = match slot {
                Slot::Catalog => self.catalog_object(),
                Slot::PagesRoot => self.pages_root_object(),
                Slot::Info => self.info_object(),
                Slot::Page(pid) => self.page_object(pid),
                Slot::Contents(pid) => self.contents_object(pid)?,
                Slot::Font(fid) => self.font_object(fid),
                Slot::Image(iid) => self.images[iid.0].descriptor.to_object(),
            };
            objects.push((r, body));
        }

        let mut out = Vec::new();
        write_document(
            &mut out,
            self.config.version,
            &objects,
            &mut self.registry,
            self.catalog,
            self.info,
        )?;
        Ok(out)
    }

    /// Finalize the document into a writer.
    pub fn write_to<W: Write>(self, writer: &mut W) -> Result<()> {
        let bytes = self.close()?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Finalize the document to a file.
    pub fn save(self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.close()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn catalog_object(&self) -> Object {
        let mut entries = vec![
            ("Type", Object::name("Catalog")),
            ("Pages", Object::Reference(self.pages_root)),
        ];
        if self.config.page_mode != PageMode::UseNone {
            entries.push(("PageMode", Object::name(self.config.page_mode.as_pdf_name())));
        }
        Object::dict(entries)
    }

    fn pages_root_object(&self) -> Object {
        let kids = self
            .tree
            .top_level()
            .iter()
            .map(|&pid| Object::Reference(self.tree.node(pid).object))
            .collect();
        Object::dict(vec![
            ("Type", Object::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(self.tree.total_count() as i64)),
        ])
    }

    fn info_object(&self) -> Object {
        let mut entries = vec![(
            "Producer",
            Object::string(concat!("pdf_forge ", env!("CARGO_PKG_VERSION"))),
        )];
        if let Some(title) = &self.config.title {
            entries.push(("Title", Object::string(title)));
        }
        if let Some(author) = &self.config.author {
            entries.push(("Author", Object::string(author)));
        }
        if let Some(subject) = &self.config.subject {
            entries.push(("Subject", Object::string(subject)));
        }
        if let Some(keywords) = &self.config.keywords {
            entries.push(("Keywords", Object::string(keywords)));
        }
        if let Some(creator) = &self.config.creator {
            entries.push(("Creator", Object::string(creator)));
        }
        if let Some(date) = self.config.pdf_creation_date() {
            entries.push(("CreationDate", Object::string(&date)));
        }
        Object::dict(entries)
    }

    fn page_object(&self, pid: PageId) -> Object {
        let node = self.tree.node(pid);
        let parent = match node.parent {
            Some(p) => self.tree.node(p).object,
            None => self.pages_root,
        };

        let mut entries: Vec<(&str, Object)> = Vec::new();
        if node.children.is_empty() {
            entries.push(("Type", Object::name("Page")));
            entries.push(("Parent", Object::Reference(parent)));
            entries.push(("Contents", Object::Reference(node.contents)));
            entries.push(("Resources", self.resources_object(pid)));
        } else {
            entries.push(("Type", Object::name("Pages")));
            entries.push(("Parent", Object::Reference(parent)));
            let kids = node
                .children
                .iter()
                .map(|&c| Object::Reference(self.tree.node(c).object))
                .collect();
            entries.push(("Kids", Object::Array(kids)));
            entries.push(("Count", Object::Integer(self.tree.count(pid) as i64)));
        }

        // Only attributes set directly on this node are written; unset
        // attributes are inherited by the reader through /Parent.
        if let Some([llx, lly, urx, ury]) = node.attrs.media_box {
            entries.push(("MediaBox", Object::rect(llx, lly, urx, ury)));
        }
        if let Some([llx, lly, urx, ury]) = node.attrs.crop_box {
            entries.push(("CropBox", Object::rect(llx, lly, urx, ury)));
        }
        if let Some(rotate) = node.attrs.rotate {
            entries.push(("Rotate", Object::Integer(i64::from(rotate))));
        }

        Object::dict(entries)
    }

    fn resources_object(&self, pid: PageId) -> Object {
        let node = self.tree.node(pid);
        let mut proc_set = vec![Object::name("PDF"), Object::name("Text")];
        if node.resources.has_images() {
            proc_set.push(Object::name("ImageB"));
            proc_set.push(Object::name("ImageC"));
        }
        let mut entries = vec![("ProcSet", Object::Array(proc_set))];

        let fonts: HashMap<String, Object> = node
            .resources
            .fonts()
            .map(|fid| {
                (
                    fid.resource_name(),
                    Object::Reference(self.fonts[fid.0].object),
                )
            })
            .collect();
        if !fonts.is_empty() {
            entries.push(("Font", Object::Dictionary(fonts)));
        }

        let images: HashMap<String, Object> = node
            .resources
            .images()
            .map(|iid| {
                (
                    iid.resource_name(),
                    Object::Reference(self.images[iid.0].object),
                )
            })
            .collect();
        if !images.is_empty() {
            entries.push(("XObject", Object::Dictionary(images)));
        }

        Object::dict(entries)
    }

    fn contents_object(&self, pid: PageId) -> Result<Object> {
        let raw = self.tree.node(pid).content.build();
        let mut dict = HashMap::new();
        let data = if self.config.compress {
            let compressed = compress_data(&raw)?;
            dict.insert("Filter".to_string(), Object::name("FlateDecode"));
            compressed
        } else {
            raw
        };
        dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
        Ok(Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        })
    }

    fn font_object(&self, fid: FontId) -> Object {
        let options = self.fonts[fid.0].options;
        let mut entries = vec![
            ("Type", Object::name("Font")),
            ("Subtype", Object::name(options.subtype.as_pdf_name())),
            ("BaseFont", Object::name(options.base_font.as_pdf_name())),
        ];
        if let Some(encoding) = options.encoding.as_pdf_name() {
            entries.push(("Encoding", Object::name(encoding)));
        }
        Object::dict(entries)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

/// Compress data for a FlateDecode stream.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Drawing access to one page.
pub struct PageHandle<'a> {
    doc: &'a mut Document,
    id: PageId,
}

impl<'a> PageHandle<'a> {
    /// Id of the page being drawn on.
    pub fn id(&self) -> PageId {
        self.id
    }

    fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.doc.tree.node_mut(self.id).content.op(op);
        self
    }

    // === Path construction and painting ===

    /// Begin a new subpath at (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Straight line segment to (x, y).
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Cubic curve to (x3, y3) with control points (x1, y1) and (x2, y2).
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> &mut Self {
        self.op(ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3))
    }

    /// Rectangle subpath.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// End the path without painting.
    pub fn end_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndPath)
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Close and stroke the current path.
    pub fn close_stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::CloseStroke)
    }

    /// Fill the current path with the nonzero winding rule.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill the current path with the even-odd rule.
    pub fn fill_even_odd(&mut self) -> &mut Self {
        self.op(ContentStreamOp::FillEvenOdd)
    }

    /// Stroke a single segment from (x1, y1) to (x2, y2).
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    /// Set the stroke line width.
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    // === Color ===

    /// Set the fill gray level (0 = black, 1 = white).
    pub fn set_fill_gray(&mut self, level: f64) -> &mut Self {
        self.op(ContentStreamOp::SetFillGray(level))
    }

    /// Set the stroke gray level.
    pub fn set_stroke_gray(&mut self, level: f64) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeGray(level))
    }

    /// Set the fill color.
    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.op(ContentStreamOp::SetFillRgb(r, g, b))
    }

    /// Set the stroke color.
    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeRgb(r, g, b))
    }

    /// Set the fill color from a component slice; exactly three
    /// components are required.
    pub fn fill_color_components(&mut self, components: &[f64]) -> Result<&mut Self> {
        match components {
            &[r, g, b] => Ok(self.set_fill_rgb(r, g, b)),
            _ => Err(Error::ParameterCount {
                operator: "rg",
                expected: 3,
                found: components.len(),
            }),
        }
    }

    /// Set the stroke color from a component slice; exactly three
    /// components are required.
    pub fn stroke_color_components(&mut self, components: &[f64]) -> Result<&mut Self> {
        match components {
            &[r, g, b] => Ok(self.set_stroke_rgb(r, g, b)),
            _ => Err(Error::ParameterCount {
                operator: "RG",
                expected: 3,
                found: components.len(),
            }),
        }
    }

    // === Text ===

    /// Place `text` at (x, y) in `font` at `size`.
    ///
    /// Right alignment shifts x left by the scaled string width, center
    /// alignment by half of it. Optional character/word spacing must be
    /// finite or the call fails. Appends one complete `BT .. ET` group
    /// and records the font in the page's resources.
    pub fn string(
        &mut self,
        font: FontId,
        size: f64,
        x: f64,
        y: f64,
        text: &str,
        options: TextOptions,
    ) -> Result<()> {
        let base = self.doc.fonts[font.0].options.base_font;
        let x = match options.align {
            Align::Left => x,
            align => x - align.shift_factor() * size * metrics::string_width(base, text)?,
        };

        let mut buf = format!("BT /{} {} Tf", font.resource_name(), fmt_number(size));
        if let Some(spacing) = options.char_spacing {
            if !spacing.is_finite() {
                return Err(Error::NonFiniteOperand {
                    operator: "Tc",
                    value: spacing,
                });
            }
            buf.push_str(&format!(" {} Tc", fmt_number(spacing)));
        }
        if let Some(spacing) = options.word_spacing {
            if !spacing.is_finite() {
                return Err(Error::NonFiniteOperand {
                    operator: "Tw",
                    value: spacing,
                });
            }
            buf.push_str(&format!(" {} Tw", fmt_number(spacing)));
        }
        buf.push_str(&format!(
            " {} {} Td ({}) Tj ET",
            fmt_number(x),
            fmt_number(y),
            escape_string(text)
        ));

        let node = self.doc.tree.node_mut(self.id);
        node.resources.use_font(font);
        node.content.op(ContentStreamOp::Raw(buf));
        Ok(())
    }

    /// Left-aligned [`string`](Self::string).
    pub fn stringl(&mut self, font: FontId, size: f64, x: f64, y: f64, text: &str) -> Result<()> {
        self.string(font, size, x, y, text, TextOptions::new())
    }

    /// Right-aligned [`string`](Self::string).
    pub fn stringr(&mut self, font: FontId, size: f64, x: f64, y: f64, text: &str) -> Result<()> {
        self.string(font, size, x, y, text, TextOptions::new().with_align(Align::Right))
    }

    /// Centered [`string`](Self::string).
    pub fn stringc(&mut self, font: FontId, size: f64, x: f64, y: f64, text: &str) -> Result<()> {
        self.string(font, size, x, y, text, TextOptions::new().with_align(Align::Center))
    }

    /// Draw an underline for `text` as placed by [`string`](Self::string)
    /// with the same arguments: one straight line one unit below the
    /// baseline, spanning the aligned string width.
    ///
    /// Draws only the line, not the text, and returns the line length.
    pub fn string_underline(
        &mut self,
        font: FontId,
        size: f64,
        x: f64,
        y: f64,
        text: &str,
        align: Align,
    ) -> Result<f64> {
        let base = self.doc.fonts[font.0].options.base_font;
        let width = size * metrics::string_width(base, text)?;
        let x = x - align.shift_factor() * width;
        self.line(x, y - 1.0, x + width, y - 1.0);
        Ok(width)
    }

    /// Print text line by line, remembering position, font, and size
    /// between calls.
    ///
    /// `text` is split on newlines; each line is placed left-aligned and
    /// the baseline drops by the font size after every line. On the
    /// first call, a missing y defaults to 800 (with a warning), a
    /// missing x to 20, a missing size to 12; a missing font with no
    /// prior font is an error. Returns the number of lines emitted.
    /// Nothing checks the page boundary: text past the box is simply
    /// outside the visible area.
    pub fn printnl(&mut self, text: &str, options: PrintOptions) -> Result<usize> {
        let cursor = self.doc.tree.node(self.id).cursor.clone();
        let font = options.font.or(cursor.font).ok_or(Error::NoFontSelected)?;
        let size = options.size.or(cursor.size).unwrap_or(12.0);
        let x = options.x.or(cursor.x).unwrap_or(20.0);
        let mut y = match options.y.or(cursor.y) {
            Some(y) => y,
            None => {
                log::warn!("printnl: no y position set, starting at 800");
                800.0
            },
        };

        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.last() == Some(&"") {
            lines.pop();
        }

        for line in &lines {
            self.string(font, size, x, y, line, TextOptions::new())?;
            y -= size;
        }

        let cursor = &mut self.doc.tree.node_mut(self.id).cursor;
        cursor.font = Some(font);
        cursor.size = Some(size);
        cursor.x = Some(x);
        cursor.y = Some(y);
        Ok(lines.len())
    }

    /// Close a text block and append it to this page's content stream
    /// as a single entry, recording its fonts in the page's resources.
    pub fn draw_text(&mut self, block: TextBlock) -> &mut Self {
        let (buf, fonts) = block.finish();
        let node = self.doc.tree.node_mut(self.id);
        for font in fonts {
            node.resources.use_font(font);
        }
        node.content.op(ContentStreamOp::Raw(buf));
        self
    }

    // === Images ===

    /// Paint a registered image.
    ///
    /// The placed size is the native pixel size times the scale
    /// factors; anchors shift the position back by none, half, or all
    /// of the placed size per axis. Matrices are emitted only for
    /// non-zero position, rotation, scale, and skew, in that order,
    /// between a state save/restore pair.
    pub fn draw_image(&mut self, image: ImageId, placement: &ImagePlacement) -> &mut Self {
        let descriptor = &self.doc.images[image.0].descriptor;
        let placed_w = placement.x_scale * f64::from(descriptor.width);
        let placed_h = placement.y_scale * f64::from(descriptor.height);
        let x = placement.x - placement.x_anchor.offset_factor() * placed_w;
        let y = placement.y - placement.y_anchor.offset_factor() * placed_h;

        self.op(ContentStreamOp::SaveState);
        if x != 0.0 || y != 0.0 {
            self.op(ContentStreamOp::Transform(1.0, 0.0, 0.0, 1.0, x, y));
        }
        if placement.rotate != 0.0 {
            let (sin, cos) = placement.rotate.sin_cos();
            self.op(ContentStreamOp::Transform(cos, sin, -sin, cos, 0.0, 0.0));
        }
        if placement.x_scale != 0.0 || placement.y_scale != 0.0 {
            self.op(ContentStreamOp::Transform(placed_w, 0.0, 0.0, placed_h, 0.0, 0.0));
        }
        if placement.x_skew != 0.0 || placement.y_skew != 0.0 {
            self.op(ContentStreamOp::Transform(
                1.0,
                placement.x_skew.tan(),
                placement.y_skew.tan(),
                1.0,
                0.0,
                0.0,
            ));
        }
        self.op(ContentStreamOp::PaintXObject(image.resource_name()));
        self.op(ContentStreamOp::RestoreState);

        self.doc.tree.node_mut(self.id).resources.use_image(image);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::BaseFont;
    use crate::image::{Anchor, ColorSpace};

    fn doc_with_page() -> (Document, PageId, FontId) {
        let mut doc = Document::new(DocumentConfig::default());
        let page = doc.new_page(None, PageAttributes::letter());
        let font = doc.font(FontOptions::new());
        (doc, page, font)
    }

    fn page_stream(doc: &Document, page: PageId) -> String {
        String::from_utf8(doc.pages().node(page).content.build()).unwrap()
    }

    #[test]
    fn test_string_left_align_keeps_x() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page).stringl(font, 12.0, 72.0, 720.0, "Hi").unwrap();
        let stream = page_stream(&doc, page);
        assert!(stream.contains("BT /F1 12 Tf 72 720 Td (Hi) Tj ET"));
    }

    #[test]
    fn test_string_right_align_shifts_by_width() {
        let (mut doc, page, font) = doc_with_page();
        // Helvetica "MM" is 1666 thousandths wide; at size 10 that is 16.66.
        doc.page(page).stringr(font, 10.0, 100.0, 50.0, "MM").unwrap();
        let stream = page_stream(&doc, page);
        assert!(stream.contains("83.34 50 Td"), "stream: {}", stream);
    }

    #[test]
    fn test_string_center_align_shifts_by_half_width() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page).stringc(font, 10.0, 100.0, 50.0, "MM").unwrap();
        let stream = page_stream(&doc, page);
        assert!(stream.contains("91.67 50 Td"), "stream: {}", stream);
    }

    #[test]
    fn test_string_escapes_parentheses() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page).stringl(font, 12.0, 0.0, 0.0, "f(x)").unwrap();
        let stream = page_stream(&doc, page);
        assert!(stream.contains("(f\\(x\\)) Tj"));
    }

    #[test]
    fn test_string_optional_spacing_emitted() {
        let (mut doc, page, font) = doc_with_page();
        let options = TextOptions::new().with_char_spacing(1.5).with_word_spacing(2.0);
        doc.page(page).string(font, 12.0, 0.0, 0.0, "x", options).unwrap();
        let stream = page_stream(&doc, page);
        assert!(stream.contains("1.5 Tc"));
        assert!(stream.contains("2 Tw"));
    }

    #[test]
    fn test_string_spacing_omitted_when_unset() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page).stringl(font, 12.0, 0.0, 0.0, "x").unwrap();
        let stream = page_stream(&doc, page);
        assert!(!stream.contains("Tc"));
        assert!(!stream.contains("Tw"));
    }

    #[test]
    fn test_string_rejects_non_finite_spacing() {
        let (mut doc, page, font) = doc_with_page();
        let options = TextOptions::new().with_char_spacing(f64::NAN);
        let err = doc.page(page).string(font, 12.0, 0.0, 0.0, "x", options).unwrap_err();
        assert!(matches!(err, Error::NonFiniteOperand { operator: "Tc", .. }));
    }

    #[test]
    fn test_string_registers_font_resource() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page).stringl(font, 12.0, 0.0, 0.0, "x").unwrap();
        let used: Vec<FontId> = doc.pages().node(page).resources.fonts().collect();
        assert_eq!(used, vec![font]);
    }

    #[test]
    fn test_string_underline_returns_span() {
        let (mut doc, page, font) = doc_with_page();
        let len = doc
            .page(page)
            .string_underline(font, 10.0, 100.0, 50.0, "MM", Align::Right)
            .unwrap();
        assert!((len - 16.66).abs() < 1e-9);
        let stream = page_stream(&doc, page);
        // The line sits one unit below the baseline and spans the
        // alignment-adjusted width; no text is drawn.
        assert!(stream.contains("83.34 49 m"), "stream: {}", stream);
        assert!(stream.contains("100 49 l"));
        assert!(!stream.contains("Tj"));
    }

    #[test]
    fn test_printnl_defaults_and_line_count() {
        let (mut doc, page, font) = doc_with_page();
        let n = doc
            .page(page)
            .printnl("one\ntwo\nthree", PrintOptions::new().with_font(font))
            .unwrap();
        assert_eq!(n, 3);
        let stream = page_stream(&doc, page);
        // First line at the default 20/800, then descending by the
        // default size 12.
        assert!(stream.contains("20 800 Td (one) Tj"));
        assert!(stream.contains("20 788 Td (two) Tj"));
        assert!(stream.contains("20 776 Td (three) Tj"));
    }

    #[test]
    fn test_printnl_remembers_cursor() {
        let (mut doc, page, font) = doc_with_page();
        doc.page(page)
            .printnl("first", PrintOptions::new().with_font(font).with_position(40.0, 700.0))
            .unwrap();
        // No options at all: everything comes from the cursor.
        let n = doc.page(page).printnl("second", PrintOptions::new()).unwrap();
        assert_eq!(n, 1);
        let stream = page_stream(&doc, page);
        assert!(stream.contains("40 688 Td (second) Tj"), "stream: {}", stream);
    }

    #[test]
    fn test_printnl_without_font_fails() {
        let (mut doc, page, _) = doc_with_page();
        let err = doc.page(page).printnl("x", PrintOptions::new()).unwrap_err();
        assert!(matches!(err, Error::NoFontSelected));
    }

    #[test]
    fn test_printnl_drops_trailing_newline() {
        let (mut doc, page, font) = doc_with_page();
        let n = doc
            .page(page)
            .printnl("a\nb\n", PrintOptions::new().with_font(font))
            .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn test_color_component_count_validated() {
        let (mut doc, page, _) = doc_with_page();
        let err = doc.page(page).stroke_color_components(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::ParameterCount { operator: "RG", expected: 3, found: 2 }
        ));
        assert!(doc.page(page).fill_color_components(&[1.0, 0.0, 0.5]).is_ok());
    }

    #[test]
    fn test_draw_image_operator_sequence() {
        let (mut doc, page, _) = doc_with_page();
        let image = doc.add_image(ImageDescriptor::new(100, 50, ColorSpace::DeviceRGB, vec![0u8; 4]));
        doc.page(page)
            .draw_image(image, &ImagePlacement::at(200.0, 300.0).with_scale(2.0, 2.0));
        let stream = page_stream(&doc, page);
        let expected = "q\n1 0 0 1 200 300 cm\n200 0 0 100 cm\n/Im1 Do\nQ\n";
        assert_eq!(stream, expected);
    }

    #[test]
    fn test_draw_image_center_anchor_shifts_back() {
        let (mut doc, page, _) = doc_with_page();
        let image = doc.add_image(ImageDescriptor::new(100, 50, ColorSpace::DeviceRGB, vec![0u8; 4]));
        doc.page(page).draw_image(
            image,
            &ImagePlacement::at(200.0, 300.0).with_anchors(Anchor::Center, Anchor::End),
        );
        let stream = page_stream(&doc, page);
        // Centered horizontally (half of 100) and topped vertically (all of 50).
        assert!(stream.contains("1 0 0 1 150 250 cm"), "stream: {}", stream);
    }

    #[test]
    fn test_draw_image_rotation_uses_radians() {
        let (mut doc, page, _) = doc_with_page();
        let image = doc.add_image(ImageDescriptor::new(10, 10, ColorSpace::DeviceGray, vec![0u8; 4]));
        doc.page(page).draw_image(
            image,
            &ImagePlacement::at(0.0, 0.0).with_rotation(std::f64::consts::FRAC_PI_2),
        );
        let stream = page_stream(&doc, page);
        assert!(stream.contains("0 1 -1 0 0 0 cm"), "stream: {}", stream);
    }

    #[test]
    fn test_draw_image_registers_resource() {
        let (mut doc, page, _) = doc_with_page();
        let image = doc.add_image(ImageDescriptor::new(4, 4, ColorSpace::DeviceGray, vec![0u8; 4]));
        doc.page(page).draw_image(image, &ImagePlacement::default());
        assert!(doc.pages().node(page).resources.has_images());
    }

    #[test]
    fn test_string_width_uses_font_base() {
        let mut doc = Document::new(DocumentConfig::default());
        let helv = doc.font(FontOptions::new());
        let courier = doc.font(FontOptions::new().with_base_font(BaseFont::Courier));
        assert_ne!(
            doc.string_width(helv, "iii").unwrap(),
            doc.string_width(courier, "iii").unwrap()
        );
    }

    #[test]
    fn test_close_requires_media_box() {
        let mut doc = Document::new(DocumentConfig::default());
        doc.new_page(None, PageAttributes::new());
        assert!(matches!(doc.close(), Err(Error::MissingAttribute("MediaBox"))));
    }

    #[test]
    fn test_close_emits_leaf_pages_and_count() {
        let mut doc = Document::new(DocumentConfig::default());
        for _ in 0..3 {
            doc.new_page(None, PageAttributes::letter());
        }
        let bytes = doc.close().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        // Three page objects and a matching root count. Keys are sorted,
        // so /Type closes each page dictionary.
        assert_eq!(text.matches("/Type /Page>>").count(), 3);
        assert_eq!(text.matches("/Type /Pages>>").count(), 1);
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn test_compressed_stream_has_filter() {
        let mut doc = Document::new(DocumentConfig::default().with_compress(true));
        let page = doc.new_page(None, PageAttributes::letter());
        let font = doc.font(FontOptions::new());
        doc.page(page).stringl(font, 12.0, 72.0, 720.0, "squeeze").unwrap();
        let bytes = doc.close().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Filter /FlateDecode"));
        assert!(!text.contains("(squeeze)"));
    }
}

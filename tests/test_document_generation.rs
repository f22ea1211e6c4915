//! End-to-end structure checks on generated documents.

use pdf_forge::{
    Align, Anchor, ColorSpace, Document, DocumentConfig, FontOptions, ImageDescriptor,
    ImagePlacement, PageAttributes, PageMode, PrintOptions, TextBlock, TextOptions,
};

fn sample_document() -> Document {
    let mut doc = Document::new(
        DocumentConfig::new()
            .with_title("Integration sample")
            .with_author("tests")
            .with_page_mode(PageMode::UseOutlines),
    );

    let helvetica = doc.font(FontOptions::new());
    let courier = doc.font(FontOptions::parse("Type1", "WinAnsiEncoding", "Courier").unwrap());

    let first = doc.new_page(None, PageAttributes::letter());
    let second = doc.new_page(None, PageAttributes::a4());

    {
        let mut page = doc.page(first);
        page.stringc(helvetica, 24.0, 306.0, 700.0, "Heading (centered)").unwrap();
        page.string_underline(helvetica, 24.0, 306.0, 700.0, "Heading (centered)", Align::Center)
            .unwrap();
        page.printnl(
            "alpha\nbeta\ngamma",
            PrintOptions::new().with_font(courier).with_position(72.0, 600.0),
        )
        .unwrap();
        page.set_line_width(1.5).line(72.0, 100.0, 540.0, 100.0);
    }
    {
        let mut page = doc.page(second);
        let mut block = TextBlock::new();
        block.font(helvetica).move_abs(50.0, 780.0).show("second page");
        page.draw_text(block);
    }

    doc
}

#[test]
fn test_header_body_and_trailer_layout() {
    let bytes = sample_document().close().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.starts_with("%PDF-1.4\n"));
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/PageMode /UseOutlines"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/Count 2"));
    assert!(text.contains("[0 0 612 792]"));
    assert!(text.contains("[0 0 595 842]"));
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("/BaseFont /Courier"));
    assert!(text.contains("/Title (Integration sample)"));
    assert!(text.ends_with("%%EOF"));
}

#[test]
fn test_xref_offsets_round_trip() {
    // Offsets are byte positions, so the checks run on the raw bytes;
    // a lossy string conversion would shift everything after the
    // binary marker line.
    let bytes = sample_document().close().unwrap();

    let startxref = regex::bytes::Regex::new(r"startxref\n(\d+)\n%%EOF$").unwrap();
    let captures = startxref.captures(&bytes).expect("startxref present");
    let xref_start: usize = String::from_utf8_lossy(&captures[1]).parse().unwrap();
    assert!(bytes[xref_start..].starts_with(b"xref\n"));

    let entry = regex::bytes::Regex::new(r"(?m)^(\d{10}) (\d{5}) ([nf]) $").unwrap();
    let mut object_id = 0u32;
    let mut seen = 0;
    for captures in entry.captures_iter(&bytes[xref_start..]) {
        let offset: usize = String::from_utf8_lossy(&captures[1]).parse().unwrap();
        if &captures[3] == b"f" {
            assert_eq!(object_id, 0, "only object 0 is free");
            assert_eq!(offset, 0);
            assert_eq!(&captures[2], b"65535");
        } else {
            let marker = format!("{} 0 obj", object_id);
            assert_eq!(
                &bytes[offset..offset + marker.len()],
                marker.as_bytes(),
                "xref offset for object {} must point at its marker",
                object_id
            );
            assert_eq!(&captures[2], b"00000");
        }
        object_id += 1;
        seen += 1;
    }

    let size = regex::bytes::Regex::new(r"/Size (\d+)").unwrap();
    let size: u32 = String::from_utf8_lossy(&size.captures(&bytes).unwrap()[1])
        .parse()
        .unwrap();
    assert_eq!(seen, size, "one xref entry per object plus the free head");
}

#[test]
fn test_serialization_is_deterministic() {
    let first = sample_document().close().unwrap();
    let second = sample_document().close().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parentheses_are_escaped_in_output() {
    let bytes = sample_document().close().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Heading \\(centered\\)) Tj"));
}

#[test]
fn test_nested_tree_counts_leaves_only() {
    let mut doc = Document::new(DocumentConfig::new());
    let section = doc.new_page(None, PageAttributes::letter());
    doc.new_page(Some(section), PageAttributes::new());
    doc.new_page(Some(section), PageAttributes::new());
    doc.new_page(None, PageAttributes::letter());

    assert_eq!(doc.page_count(), 3);

    let bytes = doc.close().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    // The intermediate node becomes a tree node, not a displayed page.
    assert_eq!(text.matches("/Type /Page>>").count(), 3);
    assert!(text.contains("/Count 3"));
    assert!(text.contains("/Count 2"));
}

#[test]
fn test_image_xobject_and_invocation() {
    let mut doc = Document::new(DocumentConfig::new());
    let page = doc.new_page(None, PageAttributes::letter());
    let image = doc.add_image(
        ImageDescriptor::new(32, 16, ColorSpace::DeviceRGB, vec![0xAB; 8])
            .with_filter(pdf_forge::ImageFilter::DctDecode),
    );
    doc.page(page).draw_image(
        image,
        &ImagePlacement::at(100.0, 200.0).with_anchors(Anchor::Center, Anchor::Start),
    );

    let bytes = doc.close().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Subtype /Image"));
    assert!(text.contains("/Filter /DCTDecode"));
    assert!(text.contains("/Im1 Do"));
    assert!(text.contains("/XObject"));
}

#[test]
fn test_save_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    sample_document().save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.ends_with(b"%%EOF"));
}

#[test]
fn test_text_options_spacing_appears_in_stream() {
    let mut doc = Document::new(DocumentConfig::new());
    let page = doc.new_page(None, PageAttributes::letter());
    let font = doc.font(FontOptions::new());
    doc.page(page)
        .string(
            font,
            10.0,
            72.0,
            700.0,
            "spaced",
            TextOptions::new().with_char_spacing(0.8),
        )
        .unwrap();

    let bytes = doc.close().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("0.8 Tc"));
}

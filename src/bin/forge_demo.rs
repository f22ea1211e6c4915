//! Generates a small demonstration document exercising text alignment,
//! drawing, and the multi-call text builder.
//!
//! Usage: forge_demo [output.pdf]

use pdf_forge::{
    Align, Document, DocumentConfig, FontOptions, PageAttributes, PageMode, PrintOptions,
    TextBlock, TextOptions,
};

fn main() -> pdf_forge::Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "forge_demo.pdf".to_string());

    let mut doc = Document::new(
        DocumentConfig::new()
            .with_title("pdf_forge demo")
            .with_author("forge_demo")
            .with_page_mode(PageMode::UseNone),
    );

    let page = doc.new_page(None, PageAttributes::letter());
    let helvetica = doc.font(FontOptions::new());

    {
        let mut p = doc.page(page);
        p.stringc(helvetica, 28.0, 306.0, 720.0, "pdf_forge")?;
        p.string_underline(helvetica, 28.0, 306.0, 720.0, "pdf_forge", Align::Center)?;
        p.string(
            helvetica,
            12.0,
            306.0,
            690.0,
            "(assembled programmatically)",
            TextOptions::new().with_align(Align::Center),
        )?;

        p.set_line_width(2.0)
            .set_stroke_gray(0.4)
            .rect(72.0, 72.0, 468.0, 560.0)
            .stroke();

        let mut block = TextBlock::new();
        block
            .font(helvetica)
            .move_abs(90.0, 600.0)
            .leading(16.0)
            .show("Text blocks accumulate operators")
            .newline()
            .show("across multiple calls.");
        p.draw_text(block);

        p.printnl(
            "Line one\nLine two\nLine three",
            PrintOptions::new().with_font(helvetica).with_position(90.0, 540.0),
        )?;
    }

    log::info!("writing {}", output);
    doc.save(&output)?;
    println!("wrote {}", output);
    Ok(())
}

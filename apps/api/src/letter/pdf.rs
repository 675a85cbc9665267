//! PDF emission for a rendered letter.
//!
//! Pipeline: normalize characters -> wrap and paginate -> write a complete PDF
//! (catalog, page tree, one content stream per page, a standard Type1 font in
//! WinAnsiEncoding). Output is deterministic: no timestamps, no random IDs.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::letter::font_metrics::PageConfig;
use crate::letter::layout::{layout_letter, LetterLayout, PageLayout};
use crate::letter::normalize::{encode_win_ansi, normalize_text};
use crate::letter::template::RenderedLetter;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const FONT_RESOURCE: &str = "F1";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to encode page content: {0}")]
    Content(String),

    #[error("failed to serialize PDF: {0}")]
    Write(String),
}

/// A finished PDF. Never partial: either every page was written or an error was returned.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub fn to_document(
    letter: &RenderedLetter,
    config: &PageConfig,
) -> Result<OutputDocument, DocumentError> {
    let normalized = normalize_text(letter.as_str());
    let layout = layout_letter(&normalized, config);
    tracing::debug!(
        pages = layout.page_count(),
        lines = layout.line_count(),
        font = %config.font,
        "letter laid out"
    );

    let bytes = write_pdf(&layout, config)?;
    Ok(OutputDocument {
        bytes,
        page_count: layout.page_count(),
    })
}

fn write_pdf(layout: &LetterLayout, config: &PageConfig) -> Result<Vec<u8>, DocumentError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => config.font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, config)
            .encode()
            .map_err(|e| DocumentError::Content(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<Object>>(),
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::from(config.page_width_pt),
            Object::from(config.page_height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Cover Letter"),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| DocumentError::Write(e.to_string()))?;
    Ok(bytes)
}

/// One text object per page; blank lines only advance the cursor, so they emit nothing.
fn page_content(page: &PageLayout, config: &PageConfig) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![FONT_RESOURCE.into(), config.font_size_pt.into()]),
    ];
    for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                line.x_pt.into(),
                line.baseline_pt.into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::font_metrics::{default_page_config, FontFamily};
    use crate::letter::template::{render_letter, LetterFields};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn page_count_of(bytes: &[u8]) -> usize {
        Document::load_mem(bytes)
            .expect("generated PDF parses")
            .get_pages()
            .len()
    }

    #[test]
    fn test_empty_fields_produce_a_complete_pdf() {
        let letter = render_letter(&LetterFields::default());
        let config = default_page_config(FontFamily::Helvetica);
        let doc = to_document(&letter, &config).unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-"));
        assert_eq!(doc.page_count, 1);
        assert_eq!(page_count_of(&doc.bytes), 1);
    }

    #[test]
    fn test_smart_quote_is_written_as_straight_quote() {
        let fields = LetterFields {
            hiring_manager: "Ms. O\u{2019}Brien".to_string(),
            ..LetterFields::initial()
        };
        let letter = render_letter(&fields);
        let doc = to_document(&letter, &default_page_config(FontFamily::Helvetica)).unwrap();
        assert!(contains(&doc.bytes, b"Dear Ms. O'Brien,"));
        assert!(!contains(&doc.bytes, "\u{2019}".as_bytes()));
    }

    #[test]
    fn test_long_letter_spans_pages() {
        let fields = LetterFields {
            company_value: "rigorous, transparent and client-focused pricing ".repeat(200),
            ..LetterFields::initial()
        };
        let letter = render_letter(&fields);
        let config = default_page_config(FontFamily::Helvetica);
        let doc = to_document(&letter, &config).unwrap();
        assert!(doc.page_count >= 2, "expected multiple pages, got {}", doc.page_count);
        assert_eq!(page_count_of(&doc.bytes), doc.page_count);
    }

    #[test]
    fn test_printable_ascii_fields_never_fail() {
        let ascii: String = (0x20u8..=0x7E).map(char::from).collect();
        let fields = LetterFields {
            hiring_manager: ascii.clone(),
            job_title: ascii.clone(),
            company_name: ascii.clone(),
            platform: ascii.clone(),
            company_value: ascii,
        };
        let letter = render_letter(&fields);
        for font in [FontFamily::Helvetica, FontFamily::Times, FontFamily::Courier] {
            let doc = to_document(&letter, &default_page_config(font)).unwrap();
            assert_eq!(page_count_of(&doc.bytes), doc.page_count);
        }
    }

    #[test]
    fn test_configured_font_is_referenced() {
        let letter = render_letter(&LetterFields::initial());
        let doc = to_document(&letter, &default_page_config(FontFamily::Times)).unwrap();
        assert!(contains(&doc.bytes, b"/Times-Roman"));
        assert!(contains(&doc.bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let letter = render_letter(&LetterFields::initial());
        let config = default_page_config(FontFamily::Helvetica);
        let first = to_document(&letter, &config).unwrap();
        let second = to_document(&letter, &config).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }
}

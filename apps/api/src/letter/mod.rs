// Letter rendering: fields -> template text -> paginated PDF.
// PDF generation is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod normalize;
pub mod pdf;
pub mod template;

// Re-export the public API consumed by the handlers and app state.
pub use font_metrics::{default_page_config, FontFamily, PageConfig};
pub use pdf::{to_document, DocumentError, PDF_CONTENT_TYPE};
pub use template::{render_letter, LetterFields, RenderedLetter};

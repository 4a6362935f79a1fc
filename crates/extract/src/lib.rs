//! Format extractor implementations for groundwork.
//!
//! Each module converts one family of document formats into plain text:
//! plain text and markdown pass through, PDFs lose everything but their
//! text layer, spreadsheets flatten to CSV, slide decks to one line per
//! slide, and so on. Container formats (PDF, DOCX, XLS/XLSX, PPTX) parse
//! on the blocking thread pool so large documents never stall the runtime.

pub mod deck;
pub mod delimited;
pub mod docx;
pub mod pdf;
pub mod plain;
pub mod rtf;
pub mod sheet;
pub mod xml;

use groundwork_core::extract::ExtractorRegistry;
use std::sync::Arc;

pub use deck::SlideDeckExtractor;
pub use delimited::DelimitedExtractor;
pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;
pub use rtf::RtfExtractor;
pub use sheet::SpreadsheetExtractor;
pub use xml::XmlExtractor;

/// Create a registry with every built-in extractor.
///
/// Covered extensions: txt, md, json, pdf, docx, xls, xlsx, csv, pptx,
/// ppsx, xml, rtf. Anything else is reported as unsupported and skipped
/// by the corpus loader.
pub fn default_registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(Arc::new(PlainTextExtractor));
    registry.register(Arc::new(PdfExtractor));
    registry.register(Arc::new(DocxExtractor));
    registry.register(Arc::new(SpreadsheetExtractor));
    registry.register(Arc::new(DelimitedExtractor));
    registry.register(Arc::new(SlideDeckExtractor));
    registry.register(Arc::new(XmlExtractor));
    registry.register(Arc::new(RtfExtractor));
    registry
}

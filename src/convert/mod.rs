// src/convert/mod.rs
pub mod pdf;

use std::path::Path;
use crate::utils::error::ConvertError;

pub use pdf::LopdfConverter;

/// Written between consecutive pages of converted text.
pub const PAGE_SEPARATOR: &str = "\n\n-----\n\n";

/// Turns a PDF into markdown-ish text. Implementations are free to be lossy;
/// callers only rely on line structure and on page numbers surviving as
/// standalone lines.
pub trait MarkdownConverter {
    /// Number of pages in the document.
    fn page_count(&self, path: &Path) -> Result<usize, ConvertError>;

    /// Converts the selected zero-based pages, or every page when `pages` is `None`.
    fn to_markdown(&self, path: &Path, pages: Option<&[usize]>) -> Result<String, ConvertError>;
}

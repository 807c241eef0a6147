// src/convert/pdf.rs
use std::path::Path;

use lopdf::Document;

use crate::convert::{MarkdownConverter, PAGE_SEPARATOR};
use crate::utils::error::ConvertError;

/// Text extraction backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfConverter;

impl LopdfConverter {
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<Document, ConvertError> {
        Document::load(path).map_err(|e| ConvertError::Load {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl MarkdownConverter for LopdfConverter {
    fn page_count(&self, path: &Path) -> Result<usize, ConvertError> {
        let doc = Self::load(path)?;
        Ok(doc.get_pages().len())
    }

    fn to_markdown(&self, path: &Path, pages: Option<&[usize]>) -> Result<String, ConvertError> {
        let doc = Self::load(path)?;

        // get_pages() is keyed by 1-based page number, in document order.
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let selected: Vec<u32> = match pages {
            Some(indices) => indices
                .iter()
                .filter_map(|&index| page_numbers.get(index).copied())
                .collect(),
            None => page_numbers,
        };

        let mut rendered = Vec::with_capacity(selected.len());
        for page in selected {
            let text = doc
                .extract_text(&[page])
                .map_err(|e| ConvertError::Extraction {
                    page,
                    source: e,
                })?;
            tracing::trace!("Extracted {} chars from page {}", text.len(), page);
            rendered.push(text.trim_end().to_string());
        }

        Ok(rendered.join(PAGE_SEPARATOR))
    }
}

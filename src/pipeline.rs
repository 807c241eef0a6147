// src/pipeline.rs
use std::path::Path;

use crate::convert::MarkdownConverter;
use crate::extractors::section::SectionScanner;
use crate::models::{ExtractionMetadata, PageRange, Section};
use crate::storage::{StorageManager, SCAN_TRACE_FILE};
use crate::utils::scan_trace::ScanTrace;
use crate::utils::AppError;

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub page_range: Option<PageRange>,
    /// Also write a scan trace next to the artifacts.
    pub debug: bool,
}

#[derive(Debug)]
pub struct ExtractionOutcome {
    pub metadata: ExtractionMetadata,
    pub sections: Vec<Section>,
}

/// Converts a PDF and writes content.md, sections.json, section-index.json
/// and metadata.json into `output_dir`.
pub fn extract_pdf<C: MarkdownConverter>(
    converter: &C,
    pdf_path: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionOutcome, AppError> {
    if !pdf_path.exists() {
        return Err(AppError::MissingFile { what: "PDF", path: pdf_path.to_path_buf() });
    }

    tracing::info!("Loading PDF: {}", pdf_path.display());
    let total_pages = converter.page_count(pdf_path)?;
    tracing::info!("PDF loaded: {} pages", total_pages);

    let pages = options.page_range.map(|range| {
        let last = (range.end as usize).min(total_pages);
        tracing::info!("Processing pages {} to {}", range.start, last);
        range.page_indices(total_pages)
    });
    if pages.is_none() {
        tracing::info!("Processing all {} pages", total_pages);
    }

    tracing::info!("Extracting text...");
    let md_text = converter.to_markdown(pdf_path, pages.as_deref())?;

    // Nothing is written until conversion has succeeded.
    let storage = StorageManager::new(output_dir)?;
    tracing::info!("Writing artifacts to {}", storage.base_dir().display());
    storage.save_markdown(&md_text)?;

    let start_page = options.page_range.map_or(1, |range| range.start);
    let mut trace = if options.debug { ScanTrace::enabled() } else { ScanTrace::disabled() };
    let sections = SectionScanner::new().scan_traced(&md_text, start_page, &mut trace);

    storage.save_sections(&sections)?;
    storage.save_section_index(&sections)?;

    let metadata = ExtractionMetadata {
        total_pages,
        processed_pages: pages.as_ref().map_or(total_pages, Vec::len),
        page_range: options.page_range,
        sections_found: sections.len(),
        content_length: md_text.chars().count(),
    };
    storage.save_metadata(&metadata)?;

    if options.debug {
        trace.save(storage.path_for(SCAN_TRACE_FILE))?;
    }

    tracing::info!("Extraction complete!");
    tracing::info!("  Total pages: {}", metadata.total_pages);
    tracing::info!("  Processed pages: {}", metadata.processed_pages);
    tracing::info!("  Sections found: {}", metadata.sections_found);
    tracing::info!("  Content size: {} chars", metadata.content_length);

    Ok(ExtractionOutcome { metadata, sections })
}

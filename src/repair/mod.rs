// src/repair/mod.rs
use std::collections::BTreeSet;
use std::fs;

use serde_json::Value;

use crate::config::{ChunkFields, PartSelection, RepairConfig};
use crate::extractors::page_map::{PageMap, PageMapScanner};
use crate::storage::chunks::{load_chunks, save_chunks};
use crate::utils::AppError;

/// Outcome of patching one chunk collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub chunks: usize,
    pub updated: usize,
    /// Section identifiers found on chunks but absent from the page map.
    pub missing: BTreeSet<String>,
}

/// Overwrites chunk page numbers from a page map.
pub struct ChunkPatcher<'a> {
    page_map: &'a PageMap,
    fields: &'a ChunkFields,
}

impl<'a> ChunkPatcher<'a> {
    pub fn new(page_map: &'a PageMap, fields: &'a ChunkFields) -> Self {
        Self { page_map, fields }
    }

    /// Chunks keep their order and every field other than the page number.
    /// Entries that are not objects or carry no string section identifier
    /// are left alone.
    pub fn patch(&self, chunks: &mut [Value]) -> PatchReport {
        let mut report = PatchReport {
            chunks: chunks.len(),
            ..PatchReport::default()
        };

        for chunk in chunks.iter_mut() {
            let Some(record) = chunk.as_object_mut() else {
                continue;
            };
            let section_id = match record.get(&self.fields.section_id).and_then(Value::as_str) {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => continue,
            };

            match self.page_map.get(&section_id) {
                Some(&page) => {
                    let current = record.get(&self.fields.page_number).and_then(Value::as_f64);
                    if current != Some(f64::from(page)) {
                        record.insert(self.fields.page_number.clone(), Value::from(page));
                        report.updated += 1;
                    }
                }
                None => {
                    report.missing.insert(section_id);
                }
            }
        }

        report
    }
}

/// Re-derives page numbers for one part and rewrites its embedded chunk file.
pub fn repair_part(part: u32, config: &RepairConfig) -> Result<PatchReport, AppError> {
    let content_path = config.layout.content_path(part);
    let embedded_path = config.layout.embedded_path(part);

    if !content_path.exists() {
        return Err(AppError::MissingFile { what: "Content file", path: content_path });
    }
    if !embedded_path.exists() {
        return Err(AppError::MissingFile { what: "Embedded file", path: embedded_path });
    }

    tracing::info!("Processing part {}...", part);

    tracing::info!("  Parsing {}...", content_path.display());
    let content = fs::read_to_string(&content_path)?;
    let scanner = PageMapScanner::new(config.profile.clone());
    let section_pages = scanner.scan(&content);
    tracing::info!("  Found {} sections with page numbers", section_pages.len());

    tracing::info!("  Loading {}...", embedded_path.display());
    let mut chunks = load_chunks(&embedded_path)?;
    tracing::info!("  Loaded {} chunks", chunks.len());

    let report = ChunkPatcher::new(&section_pages, &config.fields).patch(&mut chunks);
    tracing::info!("  Updated {} chunks", report.updated);
    if !report.missing.is_empty() {
        tracing::warn!(
            "  {} sections not found in parsed content",
            report.missing.len()
        );
        tracing::debug!("  Missing sections: {:?}", report.missing);
    }

    tracing::info!("  Saving {}...", embedded_path.display());
    save_chunks(&embedded_path, &chunks)?;

    tracing::info!("  Done!");
    Ok(report)
}

/// Repairs each selected part in turn, stopping at the first failure.
pub fn repair_parts(
    selection: PartSelection,
    config: &RepairConfig,
) -> Result<Vec<(u32, PatchReport)>, AppError> {
    selection
        .parts(config.part_count)
        .into_iter()
        .map(|part| repair_part(part, config).map(|report| (part, report)))
        .collect()
}

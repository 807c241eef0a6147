// src/storage/mod.rs
pub mod chunks;

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::models::{ExtractionMetadata, Section, SectionIndexEntry};
use crate::utils::error::StorageError;

pub const CONTENT_FILE: &str = "content.md";
pub const SECTIONS_FILE: &str = "sections.json";
pub const SECTION_INDEX_FILE: &str = "section-index.json";
pub const METADATA_FILE: &str = "metadata.json";
pub const SCAN_TRACE_FILE: &str = "scan-trace.txt";

/// Writes the extraction artifacts into one output directory.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Saves the converted markdown verbatim
    pub fn save_markdown(&self, md_text: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.path_for(CONTENT_FILE);
        fs::write(&file_path, md_text)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved markdown to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves every section with its content
    pub fn save_sections(&self, sections: &[Section]) -> Result<PathBuf, StorageError> {
        let file_path = self.write_json(SECTIONS_FILE, sections)?;
        tracing::info!("Saved {} sections to {}", sections.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves the section index (one entry per section, without content)
    pub fn save_section_index(&self, sections: &[Section]) -> Result<PathBuf, StorageError> {
        let index: Vec<SectionIndexEntry> = sections.iter().map(SectionIndexEntry::from).collect();
        let file_path = self.write_json(SECTION_INDEX_FILE, &index)?;
        tracing::info!("Saved section index to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the extraction summary in JSON format
    pub fn save_metadata(&self, metadata: &ExtractionMetadata) -> Result<PathBuf, StorageError> {
        let file_path = self.write_json(METADATA_FILE, metadata)?;
        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf, StorageError> {
        let file_path = self.path_for(file_name);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageRange;

    fn sample_sections() -> Vec<Section> {
        let mut first = Section::open("1", "Scope", 1);
        first.content = "**1** **Scope**\nThis Standard defines…".to_string();
        let mut second = Section::open("1.1", "Audience", 2);
        second.content = "**1.1** **Audience**".to_string();
        vec![first, second]
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("extracted").join("part1");
        let storage = StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_dir(), nested.as_path());
    }

    #[test]
    fn index_matches_sections() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let sections = sample_sections();

        let sections_path = storage.save_sections(&sections).unwrap();
        let index_path = storage.save_section_index(&sections).unwrap();

        let saved: Vec<Section> =
            serde_json::from_str(&fs::read_to_string(sections_path).unwrap()).unwrap();
        let index: Vec<SectionIndexEntry> =
            serde_json::from_str(&fs::read_to_string(index_path).unwrap()).unwrap();

        assert_eq!(saved, sections);
        assert_eq!(index.len(), saved.len());
        for (entry, section) in index.iter().zip(&saved) {
            assert_eq!(entry.section_id, section.section_id);
            assert_eq!(entry.content_length, section.content.chars().count());
        }
        // Counted in characters, not bytes.
        assert_eq!(index[0].content_length, 38);
    }

    #[test]
    fn markdown_and_metadata_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();

        let md_path = storage.save_markdown("# raw\n").unwrap();
        assert_eq!(fs::read_to_string(md_path).unwrap(), "# raw\n");

        let metadata = ExtractionMetadata {
            total_pages: 5000,
            processed_pages: 101,
            page_range: Some(PageRange { start: 100, end: 200 }),
            sections_found: 12,
            content_length: 6,
        };
        let meta_path = storage.save_metadata(&metadata).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(meta_path).unwrap()).unwrap();
        assert_eq!(json["processedPages"], 101);
        assert_eq!(json["pageRange"], serde_json::json!([100, 200]));
        assert_eq!(json["sectionsFound"], 12);
    }
}

// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every annex identifier ("Annex A", "Annex B", ...).
const ANNEX_PREFIX: &str = "annex";

/// A clause or annex recovered from converted markdown, with its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section_id: String,
    pub title: String,
    pub page_start: u32,
    pub page_end: u32,
    pub content: String,
    pub depth: usize,
    pub parent_id: Option<String>,
}

impl Section {
    /// Opens a section whose depth and parent are derived from its identifier.
    /// Content and the ending page are filled in when the section is closed.
    pub fn open(section_id: &str, title: &str, page_start: u32) -> Self {
        Self {
            section_id: section_id.to_string(),
            title: title.trim().to_string(),
            page_start,
            page_end: page_start,
            content: String::new(),
            depth: section_depth(section_id),
            parent_id: parent_section_id(section_id),
        }
    }

    /// Length of the content in characters, as recorded in the index.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }
}

/// Lightweight projection of a [`Section`] without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionIndexEntry {
    pub section_id: String,
    pub title: String,
    pub depth: usize,
    pub parent_id: Option<String>,
    pub page_start: u32,
    pub page_end: u32,
    pub content_length: usize,
}

impl From<&Section> for SectionIndexEntry {
    fn from(section: &Section) -> Self {
        Self {
            section_id: section.section_id.clone(),
            title: section.title.clone(),
            depth: section.depth,
            parent_id: section.parent_id.clone(),
            page_start: section.page_start,
            page_end: section.page_end,
            content_length: section.content_length(),
        }
    }
}

/// Summary written next to the extracted artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    pub total_pages: usize,
    pub processed_pages: usize,
    pub page_range: Option<PageRange>,
    pub sections_found: usize,
    pub content_length: usize,
}

/// Inclusive, 1-based page range given as `START-END` on the command line.
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Zero-based page indices covered by this range, clamped to the document length.
    pub fn page_indices(&self, total_pages: usize) -> Vec<usize> {
        let first = self.start.saturating_sub(1) as usize;
        let last = (self.end as usize).min(total_pages);
        (first..last).collect()
    }
}

impl From<[u32; 2]> for PageRange {
    fn from([start, end]: [u32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<PageRange> for [u32; 2] {
    fn from(range: PageRange) -> Self {
        [range.start, range.end]
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            format!(
                "Invalid page range: {}. Expected format: START-END (e.g., 100-200)",
                s
            )
        };
        let (start, end) = s.split_once('-').ok_or_else(invalid)?;
        let start: u32 = start.trim().parse().map_err(|_| invalid())?;
        let end: u32 = end.trim().parse().map_err(|_| invalid())?;
        if start == 0 || end < start {
            return Err(invalid());
        }
        Ok(Self { start, end })
    }
}

pub fn is_annex_id(section_id: &str) -> bool {
    section_id
        .get(..ANNEX_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(ANNEX_PREFIX))
}

/// Annexes sit at depth 1; clauses nest one level per dotted component.
pub fn section_depth(section_id: &str) -> usize {
    if is_annex_id(section_id) {
        1
    } else {
        section_id.matches('.').count() + 1
    }
}

/// "12.3.2" -> "12.3"; top-level clauses and annexes have no parent.
pub fn parent_section_id(section_id: &str) -> Option<String> {
    if is_annex_id(section_id) {
        return None;
    }
    section_id
        .rsplit_once('.')
        .map(|(parent, _)| parent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_counts_dotted_components() {
        assert_eq!(section_depth("12"), 1);
        assert_eq!(section_depth("12.3"), 2);
        assert_eq!(section_depth("12.3.2"), 3);
        assert_eq!(section_depth("Annex A"), 1);
        assert_eq!(section_depth("annex B"), 1);
    }

    #[test]
    fn parent_drops_last_component() {
        assert_eq!(parent_section_id("12.3.2").as_deref(), Some("12.3"));
        assert_eq!(parent_section_id("12.3").as_deref(), Some("12"));
        assert_eq!(parent_section_id("12"), None);
        assert_eq!(parent_section_id("Annex C"), None);
    }

    #[test]
    fn page_range_parses_and_rejects() {
        let range: PageRange = "100-200".parse().unwrap();
        assert_eq!(range, PageRange { start: 100, end: 200 });
        assert_eq!(range.to_string(), "100-200");

        for bad in ["100", "a-b", "0-5", "20-10", "1-2-3", ""] {
            assert!(bad.parse::<PageRange>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn page_indices_are_zero_based_and_clamped() {
        let range = PageRange { start: 3, end: 6 };
        assert_eq!(range.page_indices(100), vec![2, 3, 4, 5]);
        assert_eq!(range.page_indices(4), vec![2, 3]);
        assert!(range.page_indices(2).is_empty());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut section = Section::open("12.3", " Overview ", 4);
        section.content = "**12.3** **Overview**\nBody".to_string();
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["sectionId"], "12.3");
        assert_eq!(json["title"], "Overview");
        assert_eq!(json["parentId"], "12");
        assert_eq!(json["pageStart"], 4);

        let entry = SectionIndexEntry::from(&section);
        assert_eq!(entry.content_length, section.content.chars().count());

        let metadata = ExtractionMetadata {
            total_pages: 10,
            processed_pages: 2,
            page_range: Some(PageRange { start: 1, end: 2 }),
            sections_found: 1,
            content_length: 30,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["pageRange"], serde_json::json!([1, 2]));
        assert_eq!(json["totalPages"], 10);
    }
}

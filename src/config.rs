// src/config.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::extractors::page_map::PageMapProfile;

pub const DEFAULT_BASE_DIR: &str = "dev/data";
pub const DEFAULT_PART_COUNT: u32 = 4;
pub const DEFAULT_SECTION_FIELD: &str = "sectionId";
pub const DEFAULT_PAGE_FIELD: &str = "pageNumber";

/// Where the per-part pipeline artifacts live under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartLayout {
    base_dir: PathBuf,
}

impl PartLayout {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base>/extracted/part{N}/content.md`
    pub fn content_path(&self, part: u32) -> PathBuf {
        self.base_dir
            .join("extracted")
            .join(format!("part{}", part))
            .join("content.md")
    }

    /// `<base>/embedded/part{N}-embedded.json`
    pub fn embedded_path(&self, part: u32) -> PathBuf {
        self.base_dir
            .join("embedded")
            .join(format!("part{}-embedded.json", part))
    }
}

impl Default for PartLayout {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}

/// Names of the chunk fields the patcher reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFields {
    pub section_id: String,
    pub page_number: String,
}

impl Default for ChunkFields {
    fn default() -> Self {
        Self {
            section_id: DEFAULT_SECTION_FIELD.to_string(),
            page_number: DEFAULT_PAGE_FIELD.to_string(),
        }
    }
}

/// Everything a page-number repair run needs besides the part selection.
#[derive(Debug, Clone)]
pub struct RepairConfig {
    pub layout: PartLayout,
    pub profile: PageMapProfile,
    pub fields: ChunkFields,
    /// Number of parts covered by `all` (parts are numbered from 1).
    pub part_count: u32,
}

impl RepairConfig {
    pub fn new(layout: PartLayout, profile: PageMapProfile, fields: ChunkFields) -> Self {
        Self {
            layout,
            profile,
            fields,
            part_count: DEFAULT_PART_COUNT,
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self::new(
            PartLayout::default(),
            PageMapProfile::default(),
            ChunkFields::default(),
        )
    }
}

/// `<part-number|all>` as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSelection {
    All,
    One(u32),
}

impl PartSelection {
    pub fn parts(&self, part_count: u32) -> Vec<u32> {
        match self {
            PartSelection::All => (1..=part_count).collect(),
            PartSelection::One(part) => vec![*part],
        }
    }
}

impl FromStr for PartSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(PartSelection::All);
        }
        s.parse::<u32>()
            .map(PartSelection::One)
            .map_err(|_| format!("Invalid part number: {}", s))
    }
}

impl fmt::Display for PartSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSelection::All => write!(f, "all"),
            PartSelection::One(part) => write!(f, "{}", part),
        }
    }
}

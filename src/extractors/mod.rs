// src/extractors/mod.rs
pub mod page;
pub mod page_map;
pub mod patterns;
pub mod section;

// Re-export key extraction types for convenience
pub use page::{PageObservation, PageTracker, PageWindow};
pub use page_map::{PageMap, PageMapProfile, PageMapScanner};
pub use patterns::{HeaderMatch, HeaderMatcher, MatcherSet, SectionKind};
pub use section::SectionScanner;

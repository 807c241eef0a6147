// src/extractors/page_map.rs
use std::collections::BTreeMap;

use regex::Regex;

use crate::extractors::page::{PageObservation, PageTracker, PageWindow};
use crate::extractors::patterns::{is_toc_entry, MatcherSet, DEFAULT_RUNNING_HEADER};
use crate::utils::scan_trace::{ScanEvent, ScanTrace};

/// Section identifier -> page number inferred from a content.md file.
pub type PageMap = BTreeMap<String, u32>;

/// Tunables for re-deriving page numbers from stored markdown.
#[derive(Debug, Clone)]
pub struct PageMapProfile {
    pub start_page: u32,
    /// Added to the tracked page when a header is recorded. The table of
    /// contents of the ECMA-376 parts cites the page after the marker that
    /// precedes a header, hence the default of 1.
    pub page_offset: i32,
    /// Lines matching this pattern are ignored entirely.
    pub running_header: Regex,
    pub window: PageWindow,
}

impl Default for PageMapProfile {
    fn default() -> Self {
        Self {
            start_page: 1,
            page_offset: 1,
            running_header: Regex::new(DEFAULT_RUNNING_HEADER)
                .expect("Failed to compile DEFAULT_RUNNING_HEADER"),
            window: PageWindow::REPAIR,
        }
    }
}

impl PageMapProfile {
    pub fn with_running_header(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.running_header = Regex::new(pattern)?;
        Ok(self)
    }
}

/// Page-number-only variant of the section scan. Keeps no content.
pub struct PageMapScanner {
    matchers: MatcherSet,
    profile: PageMapProfile,
}

impl PageMapScanner {
    pub fn new(profile: PageMapProfile) -> Self {
        Self {
            matchers: MatcherSet::repair(),
            profile,
        }
    }

    pub fn scan(&self, md_text: &str) -> PageMap {
        self.scan_traced(md_text, &mut ScanTrace::disabled())
    }

    /// Later occurrences of an identifier overwrite earlier ones.
    pub fn scan_traced(&self, md_text: &str, trace: &mut ScanTrace) -> PageMap {
        let lines: Vec<&str> = md_text.split('\n').collect();
        let mut tracker = PageTracker::new(self.profile.start_page, self.profile.window);
        let mut section_pages = PageMap::new();

        for (index, line) in lines.iter().enumerate() {
            let stripped = line.trim();
            let line_number = index + 1;

            if self.profile.running_header.is_match(stripped) {
                trace.record(ScanEvent::SkippedRunningHeader { line: line_number });
                continue;
            }

            match tracker.observe(stripped) {
                PageObservation::Accepted(page) => {
                    trace.record(ScanEvent::PageMarker { line: line_number, page: Some(page), accepted: true });
                    continue;
                }
                PageObservation::Rejected(page) => {
                    trace.record(ScanEvent::PageMarker { line: line_number, page, accepted: false });
                }
                PageObservation::NotMarker => {}
            }

            if is_toc_entry(stripped) {
                trace.record(ScanEvent::SkippedTocEntry { line: line_number });
                continue;
            }

            let next = lines.get(index + 1).map(|next| next.trim());
            if let Some(header) = self.matchers.first_match(stripped, next) {
                let page = tracker.current().saturating_add_signed(self.profile.page_offset);
                trace.record(ScanEvent::Header {
                    line: line_number,
                    section_id: header.section_id.clone(),
                    matcher: header.matcher,
                    page,
                });
                if let Some(previous) = section_pages.insert(header.section_id, page) {
                    tracing::trace!("Line {}: overwrote earlier page {}", line_number, previous);
                }
            }
        }

        tracing::debug!("Mapped {} section identifiers to pages", section_pages.len());
        section_pages
    }
}

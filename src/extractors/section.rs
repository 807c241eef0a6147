// src/extractors/section.rs

// --- Imports ---
use crate::extractors::page::{PageObservation, PageTracker, PageWindow};
use crate::extractors::patterns::{HeaderMatch, MatcherSet};
use crate::models::Section;
use crate::utils::scan_trace::{ScanEvent, ScanTrace};

// --- Data Structures ---

/// Section being accumulated until the next header closes it.
struct OpenSection<'a> {
    section: Section,
    lines: Vec<&'a str>,
}

impl<'a> OpenSection<'a> {
    fn start(header: &HeaderMatch, page: u32, header_line: &'a str) -> Self {
        Self {
            section: Section::open(&header.section_id, &header.title, page),
            lines: vec![header_line],
        }
    }

    fn close(self, page_end: u32) -> Section {
        let mut section = self.section;
        section.content = self.lines.join("\n").trim().to_string();
        section.page_end = page_end;
        section
    }
}

// --- Main Scanner Structure ---

/// Splits converted markdown into sections, tracking approximate page numbers.
pub struct SectionScanner {
    matchers: MatcherSet,
    window: PageWindow,
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionScanner {
    pub fn new() -> Self {
        Self {
            matchers: MatcherSet::extraction(),
            window: PageWindow::EXTRACTION,
        }
    }

    pub fn scan(&self, md_text: &str, start_page: u32) -> Vec<Section> {
        self.scan_traced(md_text, start_page, &mut ScanTrace::disabled())
    }

    /// Every line from the first header onward lands in exactly one section.
    /// Lines before the first header are dropped.
    pub fn scan_traced(&self, md_text: &str, start_page: u32, trace: &mut ScanTrace) -> Vec<Section> {
        let lines: Vec<&str> = md_text.split('\n').collect();
        let mut tracker = PageTracker::new(start_page, self.window);
        let mut sections = Vec::new();
        let mut current: Option<OpenSection> = None;

        for (index, &line) in lines.iter().enumerate() {
            let stripped = line.trim();
            let line_number = index + 1;

            // Marker lines stay eligible as headers and as content.
            match tracker.observe(stripped) {
                PageObservation::Accepted(page) => {
                    trace.record(ScanEvent::PageMarker { line: line_number, page: Some(page), accepted: true });
                }
                PageObservation::Rejected(page) => {
                    trace.record(ScanEvent::PageMarker { line: line_number, page, accepted: false });
                }
                PageObservation::NotMarker => {}
            }

            let next = lines.get(index + 1).map(|next| next.trim());
            if let Some(header) = self.matchers.first_match(stripped, next) {
                tracing::trace!(
                    "Line {}: header {} via {} on page {}",
                    line_number,
                    header.section_id,
                    header.matcher,
                    tracker.current()
                );
                trace.record(ScanEvent::Header {
                    line: line_number,
                    section_id: header.section_id.clone(),
                    matcher: header.matcher,
                    page: tracker.current(),
                });

                if let Some(open) = current.take() {
                    sections.push(open.close(tracker.current()));
                }
                current = Some(OpenSection::start(&header, tracker.current(), line));
            } else if let Some(open) = current.as_mut() {
                open.lines.push(line);
            }
        }

        if let Some(open) = current {
            sections.push(open.close(tracker.current()));
        }

        tracing::debug!("Scanned {} lines into {} sections", lines.len(), sections.len());
        sections
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_bold_headers_open_sections() {
        let md = "**12.3**\n**Overview**\nSome text\n**12.4**\n**Details**\nMore text";
        let sections = SectionScanner::new().scan(md, 1);

        assert_eq!(sections.len(), 2);
        let first = &sections[0];
        assert_eq!(first.section_id, "12.3");
        assert_eq!(first.title, "Overview");
        assert_eq!(first.depth, 2);
        assert_eq!(first.parent_id.as_deref(), Some("12"));
        assert_eq!((first.page_start, first.page_end), (1, 1));
        assert_eq!(first.content, "**12.3**\n**Overview**\nSome text");

        let second = &sections[1];
        assert_eq!(second.section_id, "12.4");
        assert_eq!(second.depth, 2);
        assert_eq!(second.parent_id.as_deref(), Some("12"));
        assert_eq!((second.page_start, second.page_end), (1, 1));
        assert_eq!(second.content, "**12.4**\n**Details**\nMore text");
    }

    #[test]
    fn preamble_is_dropped_and_content_reconstructs_the_rest() {
        let md = "Foreword\nintro line\n**1** **Scope**\nscope body\n\n**2** **Conformance**\nconformance body";
        let sections = SectionScanner::new().scan(md, 1);

        let rebuilt: Vec<&str> = sections.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(
            rebuilt.join("\n"),
            "**1** **Scope**\nscope body\n**2** **Conformance**\nconformance body"
        );
        assert!(sections.iter().all(|s| !s.content.contains("Foreword")));
    }

    #[test]
    fn page_markers_set_start_and_end_pages() {
        let md = "**5** **Alpha**\ntext\n2\nmore\n**5.1** **Beta**\n3\nbody\n2020\nAnnex A (normative) Schemas\ntail";
        let sections = SectionScanner::new().scan(md, 1);

        assert_eq!(sections.len(), 3);
        assert_eq!((sections[0].page_start, sections[0].page_end), (1, 2));
        assert_eq!((sections[1].page_start, sections[1].page_end), (2, 3));
        assert_eq!(sections[1].parent_id.as_deref(), Some("5"));

        // 2020 is outside the window, so the annex stays on page 3.
        let annex = &sections[2];
        assert_eq!(annex.section_id, "Annex A");
        assert_eq!(annex.title, "normative");
        assert_eq!(annex.depth, 1);
        assert_eq!(annex.parent_id, None);
        assert_eq!((annex.page_start, annex.page_end), (3, 3));
    }

    #[test]
    fn repeated_identifiers_are_kept() {
        let md = "**7** **Intro**\na\n**7** **Intro**\nb";
        let sections = SectionScanner::new().scan(md, 4);
        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| s.section_id == "7" && s.page_start == 4));
        assert_eq!(sections[1].content, "**7** **Intro**\nb");
    }

    #[test]
    fn text_without_headers_yields_nothing() {
        assert!(SectionScanner::new().scan("just\nsome\ntext", 1).is_empty());
        assert!(SectionScanner::new().scan("", 1).is_empty());
    }

    #[test]
    fn trace_records_headers_and_markers() {
        let mut trace = ScanTrace::enabled();
        SectionScanner::new().scan_traced("**1** **Scope**\n2\n999", 1, &mut trace);
        let events = trace.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], ScanEvent::Header { section_id, .. } if section_id == "1"));
        assert!(matches!(events[1], ScanEvent::PageMarker { page: Some(2), accepted: true, .. }));
        assert!(matches!(events[2], ScanEvent::PageMarker { page: Some(999), accepted: false, .. }));
    }
}

// src/utils/scan_trace.rs
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use crate::utils::error::StorageError;

/// One decision taken by a scanner while walking the converted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    PageMarker {
        line: usize,
        page: Option<u32>,
        accepted: bool,
    },
    Header {
        line: usize,
        section_id: String,
        matcher: &'static str,
        page: u32,
    },
    SkippedTocEntry {
        line: usize,
    },
    SkippedRunningHeader {
        line: usize,
    },
}

impl ScanEvent {
    fn describe(&self) -> String {
        match self {
            ScanEvent::PageMarker { line, page, accepted } => {
                let value = page.map_or_else(|| "overflow".to_string(), |p| p.to_string());
                let verdict = if *accepted { "accepted" } else { "rejected" };
                format!("{:>7}  page marker {} {}", line, value, verdict)
            }
            ScanEvent::Header { line, section_id, matcher, page } => {
                format!("{:>7}  header {} [{}] page {}", line, section_id, matcher, page)
            }
            ScanEvent::SkippedTocEntry { line } => format!("{:>7}  skipped toc entry", line),
            ScanEvent::SkippedRunningHeader { line } => {
                format!("{:>7}  skipped running header", line)
            }
        }
    }
}

/// Collects scan events when enabled; a disabled trace drops them.
#[derive(Debug, Default)]
pub struct ScanTrace {
    enabled: bool,
    events: Vec<ScanEvent>,
}

impl ScanTrace {
    pub fn enabled() -> Self {
        Self { enabled: true, events: Vec::new() }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ScanEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    pub fn render(&self) -> String {
        let headers = self
            .events
            .iter()
            .filter(|e| matches!(e, ScanEvent::Header { .. }))
            .count();
        let mut out = format!("# scan trace: {} events, {} headers\n", self.events.len(), headers);
        for event in &self.events {
            let _ = writeln!(out, "{}", event.describe());
        }
        out
    }

    /// Saves the rendered trace for debugging header and page detection.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let path = path.as_ref();
        fs::write(path, self.render())?;
        tracing::info!("Saved scan trace to {}", path.display());
        Ok(())
    }
}

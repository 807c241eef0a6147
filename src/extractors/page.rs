// src/extractors/page.rs

/// Acceptance rule for candidate page markers relative to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Candidates must be below `current + span`.
    pub span: u32,
    /// Whether a candidate equal to the current page is accepted.
    pub allow_equal: bool,
    /// Longest digit string treated as a marker; `None` for no limit.
    pub max_digits: Option<usize>,
}

impl PageWindow {
    /// Markers in freshly converted text: close together, up to four digits.
    pub const EXTRACTION: PageWindow = PageWindow {
        span: 10,
        allow_equal: false,
        max_digits: Some(4),
    };

    /// Markers in stored content.md files are sparser.
    pub const REPAIR: PageWindow = PageWindow {
        span: 50,
        allow_equal: true,
        max_digits: None,
    };

    pub fn accepts(&self, current: u32, candidate: u32) -> bool {
        let lower_ok = if self.allow_equal {
            candidate >= current
        } else {
            candidate > current
        };
        lower_ok && u64::from(candidate) < u64::from(current) + u64::from(self.span)
    }

    /// Reads a trimmed line as a marker candidate. Lines that overflow `u32`
    /// still count as markers but carry no usable value.
    fn parse_candidate(&self, line: &str) -> Option<Option<u32>> {
        if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if self.max_digits.is_some_and(|max| line.len() > max) {
            return None;
        }
        Some(line.parse().ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageObservation {
    NotMarker,
    Accepted(u32),
    /// A digit-only line outside the window; `None` when it does not fit a page number.
    Rejected(Option<u32>),
}

/// Running page counter fed one trimmed line at a time.
#[derive(Debug, Clone)]
pub struct PageTracker {
    current: u32,
    window: PageWindow,
}

impl PageTracker {
    pub fn new(start_page: u32, window: PageWindow) -> Self {
        Self {
            current: start_page,
            window,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn observe(&mut self, line: &str) -> PageObservation {
        match self.window.parse_candidate(line) {
            None => PageObservation::NotMarker,
            Some(Some(candidate)) if self.window.accepts(self.current, candidate) => {
                tracing::trace!("Page marker {} accepted (was {})", candidate, self.current);
                self.current = candidate;
                PageObservation::Accepted(candidate)
            }
            Some(candidate) => PageObservation::Rejected(candidate),
        }
    }
}

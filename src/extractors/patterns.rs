// src/extractors/patterns.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns for Header Matching (Lazy Static) ---
// Every header pattern is case-insensitive and is tested against the trimmed line.

// **12.3.2** **Title** (trailing text allowed)
static BOLD_INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(\d+(?:\.\d+)*)\*\*\s*\*\*([^*]+)\*\*")
        .expect("Failed to compile BOLD_INLINE_RE")
});

// **12.3.2** **Title** and nothing after it
static BOLD_INLINE_ANCHORED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(\d+(?:\.\d+)*)\*\*\s*\*\*([^*]+)\*\*$")
        .expect("Failed to compile BOLD_INLINE_ANCHORED_RE")
});

// **12.3.2** alone, title expected on the following line
static BOLD_ID_ONLY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(\d+(?:\.\d+)*)\*\*$").expect("Failed to compile BOLD_ID_ONLY_RE")
});

static BOLD_TITLE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\*\*([^*]+)\*\*$").expect("Failed to compile BOLD_TITLE_LINE_RE")
});

// 12.3.2 Title
static PLAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)*)\s+([A-Z][^\n]+)").expect("Failed to compile PLAIN_RE")
});

// # **12.3.2. Title** or # **12. Title**
static HASH_BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#+\s*\*\*(\d+(?:\.\d+)*)\.?\s+([^*]+)\*\*$")
        .expect("Failed to compile HASH_BOLD_RE")
});

// Annex A (normative) Title, optionally wrapped in single asterisks
static ANNEX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*?(Annex\s+[A-Z])\*?\s*(?:\(([^)]+)\))?\s*(.*)$")
        .expect("Failed to compile ANNEX_RE")
});

// **Annex A** **(normative)** Title
static ANNEX_BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*(Annex\s+[A-Z])\*\*\s*(?:\*\*)?(?:\(([^)]+)\))?(?:\*\*)?\s*(.*)$")
        .expect("Failed to compile ANNEX_BOLD_RE")
});

// 12.3 Title ........ 45
static TOC_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:\.\d+)*\s+.+\.{2,}\s*\d+$").expect("Failed to compile TOC_ENTRY_RE")
});

/// Running header printed at the top of every page of the ECMA-376 parts.
pub const DEFAULT_RUNNING_HEADER: &str = r"^ECMA-376 Part \d";

// --- Data Structures ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Clause,
    Annex,
}

/// A line recognised as a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub section_id: String,
    pub title: String,
    pub kind: SectionKind,
    /// Name of the matcher that fired, for tracing.
    pub matcher: &'static str,
}

/// How a matcher reads its capture groups.
#[derive(Debug, Clone, Copy)]
enum MatchShape {
    /// Group 1 is the identifier, group 2 the title.
    IdTitle,
    /// The line holds only the identifier; the next line must be a bold title.
    IdThenTitleLine,
    /// Group 1 is the annex label, group 2 the optional qualifier.
    Annex,
}

pub struct HeaderMatcher {
    name: &'static str,
    regex: &'static Regex,
    shape: MatchShape,
}

impl HeaderMatcher {
    fn new(name: &'static str, regex: &'static Lazy<Regex>, shape: MatchShape) -> Self {
        Self {
            name,
            regex: Lazy::force(regex),
            shape,
        }
    }

    pub fn bold_inline() -> Self {
        Self::new("bold-inline", &BOLD_INLINE_RE, MatchShape::IdTitle)
    }

    /// Same as [`HeaderMatcher::bold_inline`] but nothing may follow the title.
    pub fn bold_inline_anchored() -> Self {
        Self::new("bold-inline", &BOLD_INLINE_ANCHORED_RE, MatchShape::IdTitle)
    }

    pub fn bold_split() -> Self {
        Self::new("bold-split", &BOLD_ID_ONLY_RE, MatchShape::IdThenTitleLine)
    }

    pub fn plain() -> Self {
        Self::new("plain", &PLAIN_RE, MatchShape::IdTitle)
    }

    pub fn hash_bold() -> Self {
        Self::new("hash-bold", &HASH_BOLD_RE, MatchShape::IdTitle)
    }

    pub fn annex() -> Self {
        Self::new("annex", &ANNEX_RE, MatchShape::Annex)
    }

    pub fn annex_bold() -> Self {
        Self::new("annex-bold", &ANNEX_BOLD_RE, MatchShape::Annex)
    }

    /// Tests a trimmed line. `next` is the following line (trimmed), if any.
    pub fn try_match(&self, line: &str, next: Option<&str>) -> Option<HeaderMatch> {
        let caps = self.regex.captures(line)?;
        let section_id = caps.get(1)?.as_str().to_string();

        let (title, kind) = match self.shape {
            MatchShape::IdTitle => (
                caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
                SectionKind::Clause,
            ),
            MatchShape::IdThenTitleLine => {
                let title_caps = BOLD_TITLE_LINE_RE.captures(next?)?;
                (title_caps[1].trim().to_string(), SectionKind::Clause)
            }
            MatchShape::Annex => (
                caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
                SectionKind::Annex,
            ),
        };

        Some(HeaderMatch {
            section_id,
            title,
            kind,
            matcher: self.name,
        })
    }
}

/// Ordered header matchers; the first one that fires wins.
pub struct MatcherSet {
    matchers: Vec<HeaderMatcher>,
}

impl MatcherSet {
    pub fn new(matchers: Vec<HeaderMatcher>) -> Self {
        Self { matchers }
    }

    /// Header styles found in the body text of the extracted parts.
    pub fn extraction() -> Self {
        Self::new(vec![
            HeaderMatcher::bold_inline(),
            HeaderMatcher::bold_split(),
            HeaderMatcher::plain(),
            HeaderMatcher::annex(),
        ])
    }

    /// Header styles used when re-deriving page numbers, including the
    /// `# **12.3. Title**` form of Parts 2 to 4.
    // bold-split is shared with extraction so split `**12.3**` / `**Title**`
    // headers get pages too; it can change which chunks are patched.
    pub fn repair() -> Self {
        Self::new(vec![
            HeaderMatcher::bold_inline_anchored(),
            HeaderMatcher::bold_split(),
            HeaderMatcher::hash_bold(),
            HeaderMatcher::annex_bold(),
        ])
    }

    pub fn first_match(&self, line: &str, next: Option<&str>) -> Option<HeaderMatch> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.try_match(line, next))
    }
}

/// `12.3 Title ........ 45`
pub fn is_toc_entry(line: &str) -> bool {
    TOC_ENTRY_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_inline_captures_id_and_title() {
        let m = MatcherSet::extraction()
            .first_match("**12.3.2** **Paragraph Properties**", None)
            .unwrap();
        assert_eq!(m.section_id, "12.3.2");
        assert_eq!(m.title, "Paragraph Properties");
        assert_eq!(m.kind, SectionKind::Clause);
        assert_eq!(m.matcher, "bold-inline");
    }

    #[test]
    fn bold_split_needs_a_bold_title_on_the_next_line() {
        let set = MatcherSet::extraction();
        let m = set.first_match("**12.3**", Some("**Overview**")).unwrap();
        assert_eq!(m.section_id, "12.3");
        assert_eq!(m.title, "Overview");
        assert_eq!(m.matcher, "bold-split");

        assert!(set.first_match("**12.3**", Some("plain text")).is_none());
        assert!(set.first_match("**12.3**", None).is_none());
    }

    #[test]
    fn plain_header_requires_letter_after_id() {
        let set = MatcherSet::extraction();
        let m = set.first_match("17.3.1 Paragraphs", None).unwrap();
        assert_eq!(m.section_id, "17.3.1");
        assert_eq!(m.title, "Paragraphs");
        assert_eq!(m.matcher, "plain");

        assert!(set.first_match("42", None).is_none());
        assert!(set.first_match("12 345", None).is_none());
    }

    #[test]
    fn annex_title_is_the_qualifier() {
        let set = MatcherSet::extraction();
        let m = set.first_match("Annex A (normative) Schemas", None).unwrap();
        assert_eq!(m.section_id, "Annex A");
        assert_eq!(m.title, "normative");
        assert_eq!(m.kind, SectionKind::Annex);

        let bare = set.first_match("*Annex B*", None).unwrap();
        assert_eq!(bare.section_id, "Annex B");
        assert_eq!(bare.title, "");
    }

    #[test]
    fn first_match_wins_in_declared_order() {
        // Matches both bold-inline and (with a bold next line) bold-split shapes.
        let m = MatcherSet::extraction()
            .first_match("**1** **Scope**", Some("**Other**"))
            .unwrap();
        assert_eq!(m.matcher, "bold-inline");
        assert_eq!(m.title, "Scope");
    }

    #[test]
    fn repair_set_recognises_hash_bold_and_anchors_inline() {
        let set = MatcherSet::repair();
        let m = set.first_match("## **12.3.2. Run Properties**", None).unwrap();
        assert_eq!(m.section_id, "12.3.2");
        assert_eq!(m.title, "Run Properties");
        assert_eq!(m.matcher, "hash-bold");

        let m = set.first_match("# **12. Title**", None).unwrap();
        assert_eq!(m.section_id, "12");

        assert!(set.first_match("**12.3** **Title** trailing", None).is_none());
        assert!(set.first_match("12.3 Plain Title", None).is_none());

        let m = set.first_match("**12.3**", Some("**Overview**")).unwrap();
        assert_eq!((m.section_id.as_str(), m.matcher), ("12.3", "bold-split"));

        let annex = set.first_match("**Annex C** **(informative)** Extras", None).unwrap();
        assert_eq!(annex.section_id, "Annex C");
        assert_eq!(annex.title, "informative");
    }

    #[test]
    fn toc_entries_need_dot_leaders() {
        assert!(is_toc_entry("12.3 Overview ........ 45"));
        assert!(is_toc_entry("1 Scope .. 1"));
        assert!(!is_toc_entry("12.3 Overview 45"));
        assert!(!is_toc_entry("**12.3** **Overview**"));
    }
}

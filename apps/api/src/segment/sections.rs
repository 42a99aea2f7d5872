//! Section heading detection and body slicing.

use std::collections::BTreeMap;

/// Heading keywords, in match priority order. A line is tagged with the
/// first keyword it contains.
pub const SECTION_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "education",
    "skills",
    "projects",
    "summary",
    "profile",
    "contact",
];

/// Lines this long or longer are prose, never headings.
const MAX_HEADING_LEN: usize = 50;

/// Keyword → line index of its first heading occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    headings: BTreeMap<&'static str, usize>,
}

impl SectionIndex {
    /// Scans lines top to bottom. Later duplicate headings for an already
    /// indexed keyword are ignored.
    pub fn build(lines: &[String]) -> Self {
        let mut headings = BTreeMap::new();

        for (idx, line) in lines.iter().enumerate() {
            if line.chars().count() >= MAX_HEADING_LEN {
                continue;
            }
            let lower = line.to_lowercase();
            if let Some(keyword) = SECTION_KEYWORDS.iter().find(|k| lower.contains(*k)) {
                headings.entry(*keyword).or_insert(idx);
            }
        }

        Self { headings }
    }

    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.headings.get(keyword).copied()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.headings.keys().copied()
    }

    /// Body lines of the first present start keyword.
    ///
    /// The body ends at the next indexed heading of any keyword, not only at
    /// `_end_keywords`; the parameter documents caller intent.
    pub fn slice<'a>(
        &self,
        lines: &'a [String],
        start_keywords: &[&str],
        _end_keywords: &[&str],
    ) -> &'a [String] {
        let Some(start) = start_keywords.iter().find_map(|k| self.get(k)) else {
            return &[];
        };

        let end = self
            .headings
            .values()
            .copied()
            .filter(|&idx| idx > start)
            .min()
            .unwrap_or(lines.len())
            .min(lines.len());

        let body_start = (start + 1).min(end);
        &lines[body_start..end]
    }
}

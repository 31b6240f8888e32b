// Splits a project's long description into titled sections
//
// Titles are written as **Title** and own everything up to the next title.
// Lines starting with "-" inside a section are bullets.
//
// Two passes: find every marker span first, then pair each marker with the
// text that follows it.

use crate::content::Section;
use regex::Regex;
use std::sync::LazyLock;

// **Title**, where the title is one or more non-'*' chars (newlines included)
const MARKER_PATTERN: &str = r"\*\*([^*]+)\*\*";

// Compiled once. None only if the pattern above is broken.
static MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(MARKER_PATTERN).ok());

// A **Title** occurrence. Byte offsets into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerSpan {
    start: usize,
    end: usize,
    title_start: usize,
    title_end: usize,
}

pub struct SectionParser;

impl SectionParser {
    /// Parse a long description into sections
    ///
    /// Never fails. Text before the first title is dropped (see `preamble`),
    /// and a title at the very end of the text gets empty content.
    ///
    /// # Examples
    /// ```
    /// use folio_lib::core::SectionParser;
    ///
    /// let sections = SectionParser::parse("**Impact**\n- faster reviews\n- fewer bugs");
    /// assert_eq!(sections.len(), 1);
    /// assert_eq!(sections[0].title, "Impact");
    /// assert_eq!(
    ///     sections[0].bullets.as_deref(),
    ///     Some(&["faster reviews".to_string(), "fewer bugs".to_string()][..])
    /// );
    /// ```
    pub fn parse(text: &str) -> Vec<Section> {
        if text.is_empty() {
            return Vec::new();
        }

        let markers = find_markers(text);

        markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let content_end = markers.get(i + 1).map_or(text.len(), |next| next.start);
                let title = text[marker.title_start..marker.title_end].trim();
                let content = text[marker.end..content_end].trim();
                build_section(title, content)
            })
            .collect()
    }

    /// Same as `parse`, for descriptions that may be missing entirely
    pub fn parse_opt(text: Option<&str>) -> Vec<Section> {
        text.map(Self::parse).unwrap_or_default()
    }

    /// The text that comes before the first title, trimmed
    ///
    /// Returns None when it's empty. With no titles at all, the whole text
    /// is the preamble.
    pub fn preamble(text: &str) -> Option<&str> {
        let end = find_markers(text).first().map_or(text.len(), |m| m.start);
        let preamble = text[..end].trim();

        if preamble.is_empty() {
            None
        } else {
            Some(preamble)
        }
    }
}

fn build_section(title: &str, content: &str) -> Section {
    let bullets: Vec<String> = content
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix('-'))
        .map(|rest| rest.trim().to_string())
        .collect();

    Section {
        title: title.to_string(),
        content: content.to_string(),
        bullets: if bullets.is_empty() { None } else { Some(bullets) },
    }
}

// Leftmost-first, non-overlapping, as the regex engine finds them
fn find_markers(text: &str) -> Vec<MarkerSpan> {
    let Some(marker) = MARKER.as_ref() else {
        return Vec::new();
    };

    marker
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?;
            Some(MarkerSpan {
                start: whole.start(),
                end: whole.end(),
                title_start: title.start(),
                title_end: title.end(),
            })
        })
        .collect()
}

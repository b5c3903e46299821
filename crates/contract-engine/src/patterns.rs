//! Vocabularies, regex patterns and text scanning helpers shared by the pipeline stages

use lazy_static::lazy_static;
use regex::Regex;

/// Seed vocabulary of phrases that raise a clause's risk level
pub const RISK_PHRASES: &[&str] = &[
    "shall not be liable",
    "sole discretion",
    "indemnify and hold harmless",
    "without limitation",
    "material breach",
    "immediately terminate",
    "liquidated damages",
    "consequential damages",
    "unlimited liability",
    "waives any right",
    "irrevocable",
    "exclusive remedy",
];

/// Words whose meaning is left to interpretation
pub const AMBIGUOUS_TERMS: &[&str] = &[
    "reasonable",
    "promptly",
    "substantial",
    "material",
    "appropriate",
];

/// Heading titles that open a definitions scope
pub const DEFINITION_HEADINGS: &[&str] = &["Definitions", "Defined Terms", "Interpretation"];

/// Markers of boilerplate clauses
pub const STANDARD_MARKERS: &[&str] = &["standard", "usual", "customary"];

/// Sentence-initial words stripped from the front of a capitalized run
pub const LEADING_FUNCTION_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "Each", "Every", "Any", "All", "A", "An", "Such",
    "No", "Its", "Their", "Our", "In", "On", "Upon", "If", "For", "Unless", "Where", "When", "By",
    "To", "Of",
];

lazy_static! {
    /// `#` to `######`, whitespace, then a title
    pub static ref HEADING_PATTERN: Regex = Regex::new(r"^(#{1,6})[ \t]+(\S.*)$").unwrap();

    /// `"Term" means ...` up to the next period or line break
    pub static ref QUOTED_DEFINITION_PATTERN: Regex = Regex::new(
        r#"["“]([^"“”\n]+)["”]\s+(?:means|shall mean|refers to|is defined as)\b([^.\n]*)"#
    )
    .unwrap();

    /// Closing quote and defining verb left after a term that the quoted pass skipped
    pub static ref DEFINITION_LEAD_PATTERN: Regex = Regex::new(
        r#"^["”]?[\s:]*(?:(?:means|shall mean|refers to|is defined as)\b)?\s*"#
    )
    .unwrap();

    pub static ref EXECUTION_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:signatures?|executed|signed\s+by|in\s+witness\s+whereof)\b").unwrap();

    /// `1.1`, `2.3.4.` at the start of a line
    pub static ref NUMBERED_CLAUSE_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\d+(?:\.\d+)+\.?(?:[ \t]|$)").unwrap();

    /// `(a)`, `(iv)` at the start of a line
    pub static ref LETTERED_CLAUSE_PATTERN: Regex =
        Regex::new(r"(?m)^[ \t]*\((?:[a-z]|[ivx]+)\)(?:[ \t]|$)").unwrap();

    /// `WHEREAS ...` or a run-in caption such as `Confidentiality. The ...`
    pub static ref CAPITALIZED_OPENER_PATTERN: Regex = Regex::new(
        r"(?m)^[ \t]*(?:[A-Z]{2,}\b|[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*\.[ \t]+[A-Z])"
    )
    .unwrap();

    pub static ref DEONTIC_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:shall|agrees?\s+to|represents\s+and\s+warrants)\b").unwrap();

    /// Two or more capitalized words on one line
    pub static ref CAPITALIZED_RUN_PATTERN: Regex =
        Regex::new(r"\b[A-Z][A-Za-z0-9'’-]*(?:[ \t]+[A-Z][A-Za-z0-9'’-]*)+").unwrap();

    static ref CAPITALIZED_WORD_PATTERN: Regex = Regex::new(r"[A-Z][A-Za-z0-9'’-]*").unwrap();

    /// `[Party Name]`; the optional `(` marks a link target, which is not a placeholder
    pub static ref BRACKET_PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\[([^\[\]\n]+)\](\()?").unwrap();

    pub static ref DOUBLE_BRACE_PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\{\{([^{}\n]+)\}\}").unwrap();
}

/// A run of capitalized words found in a section's concatenated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapitalizedRun<'a> {
    pub offset: usize,
    pub text: &'a str,
    pub followed_by_colon: bool,
}

/// Every capitalized multi-word run, with leading function words removed.
///
/// Runs made only of all-caps words are captions, not terms, and are skipped.
pub fn capitalized_runs(text: &str) -> Vec<CapitalizedRun<'_>> {
    let mut runs = Vec::new();

    for m in CAPITALIZED_RUN_PATTERN.find_iter(text) {
        let words: Vec<regex::Match<'_>> = CAPITALIZED_WORD_PATTERN.find_iter(m.as_str()).collect();
        let lead = words
            .iter()
            .take_while(|w| LEADING_FUNCTION_WORDS.contains(&w.as_str()))
            .count();
        let kept = &words[lead..];

        if kept.len() < 2 {
            continue;
        }
        if kept.iter().all(|w| !w.as_str().chars().any(char::is_lowercase)) {
            continue;
        }

        let offset = m.start() + kept[0].start();
        runs.push(CapitalizedRun {
            offset,
            text: &text[offset..m.end()],
            followed_by_colon: text[m.end()..].starts_with(':'),
        });
    }

    runs
}

/// Capitalized runs that read like term uses: not labels (`Term:`) and not
/// inside a placeholder.
pub fn term_candidates(text: &str) -> Vec<CapitalizedRun<'_>> {
    let placeholders = placeholder_ranges(text);
    capitalized_runs(text)
        .into_iter()
        .filter(|run| !run.followed_by_colon)
        .filter(|run| {
            !placeholders
                .iter()
                .any(|(start, end)| run.offset >= *start && run.offset < *end)
        })
        .collect()
}

/// Byte ranges of every placeholder, delimiters included.
pub fn placeholder_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = BRACKET_PLACEHOLDER_PATTERN
        .captures_iter(text)
        .filter(|caps| caps.get(2).is_none())
        .filter_map(|caps| caps.get(0))
        .map(|m| (m.start(), m.end()))
        .collect();
    ranges.extend(
        DOUBLE_BRACE_PLACEHOLDER_PATTERN
            .find_iter(text)
            .map(|m| (m.start(), m.end())),
    );
    ranges.sort_unstable();
    ranges
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Offsets of `needle` in `haystack` where it is not part of a longer word.
///
/// Each call is a fresh scan from the start of `haystack`.
pub fn find_whole_word<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let searchable = !needle.is_empty();
    haystack
        .match_indices(needle)
        .filter(move |_| searchable)
        .filter_map(move |(offset, _)| {
            let before = haystack[..offset].chars().next_back();
            let after = haystack[offset + needle.len()..].chars().next();
            let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
            bounded.then_some(offset)
        })
}

/// Lowercases and collapses whitespace so phrases match across line breaks.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whole-phrase, case-insensitive containment. `haystack` must already be normalized.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let phrase = normalize(phrase);
    let found = find_whole_word(haystack, &phrase).next().is_some();
    found
}

/// `reasonable` -> `reasonably`, `material` -> `materially`.
pub fn adverb_form(word: &str) -> Option<String> {
    if word.ends_with("ly") {
        None
    } else if let Some(stem) = word.strip_suffix("le") {
        Some(format!("{}ly", stem))
    } else {
        Some(format!("{}ly", word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_texts(text: &str) -> Vec<&str> {
        capitalized_runs(text).into_iter().map(|r| r.text).collect()
    }

    #[test]
    fn test_heading_pattern() {
        let caps = HEADING_PATTERN.captures("## Definitions").unwrap();
        assert_eq!(&caps[1], "##");
        assert_eq!(&caps[2], "Definitions");

        assert!(HEADING_PATTERN.is_match("###### Six"));
        assert!(!HEADING_PATTERN.is_match("####### Seven"));
        assert!(!HEADING_PATTERN.is_match("#NoSpace"));
        assert!(!HEADING_PATTERN.is_match("##   "));
    }

    #[test]
    fn test_quoted_definition_pattern() {
        let text = "\"Confidential Information\" means any information disclosed. Other text.";
        let caps = QUOTED_DEFINITION_PATTERN.captures(text).unwrap();
        assert_eq!(&caps[1], "Confidential Information");
        assert_eq!(caps[2].trim(), "any information disclosed");

        let curly = "“Services” shall mean the work described in Schedule 1.";
        assert!(QUOTED_DEFINITION_PATTERN.is_match(curly));
        assert!(!QUOTED_DEFINITION_PATTERN.is_match("\"Services\" are described below."));
    }

    #[test]
    fn test_quoted_definition_stops_at_line_break() {
        let text = "\"Fees\" means the amounts due;\n\"Term\" means one year";
        let found: Vec<(String, String)> = QUOTED_DEFINITION_PATTERN
            .captures_iter(text)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Fees".to_string(), "the amounts due;".to_string()),
                ("Term".to_string(), "one year".to_string()),
            ]
        );
    }

    #[test]
    fn test_clause_marker_patterns() {
        assert!(NUMBERED_CLAUSE_PATTERN.is_match("1.1 The Supplier will deliver"));
        assert!(NUMBERED_CLAUSE_PATTERN.is_match("intro\n  2.3.4. Payment"));
        assert!(!NUMBERED_CLAUSE_PATTERN.is_match("Version 1.1 of the form"));

        assert!(LETTERED_CLAUSE_PATTERN.is_match("(a) first item"));
        assert!(LETTERED_CLAUSE_PATTERN.is_match("(iv) fourth item"));
        assert!(!LETTERED_CLAUSE_PATTERN.is_match("see (a) above"));

        assert!(CAPITALIZED_OPENER_PATTERN.is_match("WHEREAS the parties wish"));
        assert!(CAPITALIZED_OPENER_PATTERN.is_match("Confidentiality. The Recipient will"));
        assert!(!CAPITALIZED_OPENER_PATTERN.is_match("Hello world"));

        assert!(DEONTIC_PATTERN.is_match("The Tenant SHALL pay"));
        assert!(DEONTIC_PATTERN.is_match("Buyer agrees to purchase"));
        assert!(!DEONTIC_PATTERN.is_match("marshall law"));
    }

    #[test]
    fn test_capitalized_runs_drop_function_words() {
        assert_eq!(
            run_texts("The Recipient shall keep Confidential Information secret."),
            vec!["Confidential Information"]
        );
        assert_eq!(run_texts("Party A shall pay."), vec!["Party A"]);
        assert_eq!(run_texts("If Any Party Breaches"), vec!["Party Breaches"]);
    }

    #[test]
    fn test_capitalized_runs_skip_captions_and_mark_labels() {
        assert!(run_texts("WHEREAS THE PARTIES agree").is_empty());

        let runs = capitalized_runs("Effective Date: the first day");
        assert_eq!(runs.len(), 1);
        assert!(runs[0].followed_by_colon);
        assert!(term_candidates("Effective Date: the first day").is_empty());
    }

    #[test]
    fn test_capitalized_run_offsets_are_byte_offsets() {
        let text = "Café clause: see Master Agreement";
        let runs = capitalized_runs(text);
        assert_eq!(runs.len(), 1);
        assert_eq!(&text[runs[0].offset..runs[0].offset + runs[0].text.len()], "Master Agreement");
    }

    #[test]
    fn test_term_candidates_ignore_placeholders() {
        let text = "Signed for [Party Name] by Acme Holdings";
        let candidates: Vec<&str> = term_candidates(text).into_iter().map(|r| r.text).collect();
        assert_eq!(candidates, vec!["Acme Holdings"]);
    }

    #[test]
    fn test_placeholder_ranges_skip_links() {
        let text = "See [the portal](https://example.com) and {{start_date}}";
        let ranges = placeholder_ranges(text);
        assert_eq!(ranges.len(), 1);
        let (start, end) = ranges[0];
        assert_eq!(&text[start..end], "{{start_date}}");
    }

    #[test]
    fn test_find_whole_word() {
        let hay = "Party A and Party AB and Party A's";
        let hits: Vec<usize> = find_whole_word(hay, "Party A").collect();
        assert_eq!(hits, vec![0, 25]);
        assert_eq!(find_whole_word(hay, "").count(), 0);
    }

    #[test]
    fn test_contains_phrase_spans_line_breaks() {
        let hay = normalize("The Supplier shall not\nbe   liable for delays");
        assert!(contains_phrase(&hay, "shall not be liable"));
        assert!(contains_phrase(&hay, "SHALL NOT BE LIABLE"));
        assert!(!contains_phrase(&hay, "sole discretion"));
    }

    #[test]
    fn test_adverb_form() {
        assert_eq!(adverb_form("reasonable").as_deref(), Some("reasonably"));
        assert_eq!(adverb_form("material").as_deref(), Some("materially"));
        assert_eq!(adverb_form("promptly"), None);
    }
}

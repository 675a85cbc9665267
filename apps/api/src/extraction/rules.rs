//! Line rules shared by the extraction strategies.
//!
//! Every rule scans lines in order and stops at the first hit, so the earliest
//! line always wins and no line is consulted again once a field is set.

use std::sync::LazyLock;

use regex::Regex;

/// Lines mentioning a job title label. Matches anywhere in the line, like the
/// label search it replaces ("Role:", "Job Title -", "The role: ...").
static JOB_TITLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)job title|role").expect("valid job title regex"));

/// `at <Capitalized name>` where the name may continue with word characters,
/// spaces, `&` and `-`.
pub static CAPITALIZED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bat\s+([A-Z][\w &\-]*)").expect("valid company regex"));

/// Minimum word count (exclusive) for a line to read as a value phrase.
pub const VALUE_PHRASE_MIN_WORDS: usize = 5;

/// Title-cased job title lines must have this many words.
const TITLE_LINE_WORDS: std::ops::RangeInclusive<usize> = 2..=6;

/// First labelled line's text after its last colon. A label with nothing after
/// it does not count, and scanning continues.
pub fn labelled_job_title(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| JOB_TITLE_LABEL.is_match(line))
        .map(|line| after_last_colon(line))
        .find(|title| !title.is_empty())
        .map(str::to_string)
}

/// First line that is title-cased and has a plausible job title length.
pub fn title_case_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .find(|line| {
            TITLE_LINE_WORDS.contains(&line.split_whitespace().count()) && is_title_case(line)
        })
        .map(str::to_string)
}

/// First capture group of `pattern` over the lines, trimmed. Empty captures are skipped.
pub fn first_capture(lines: &[&str], pattern: &Regex) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .find(|capture| !capture.is_empty())
}

/// Up to `limit` trimmed lines with more than `VALUE_PHRASE_MIN_WORDS` words.
pub fn long_lines(lines: &[&str], limit: usize) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.split_whitespace().count() > VALUE_PHRASE_MIN_WORDS)
        .take(limit)
        .map(|line| line.trim().to_string())
        .collect()
}

pub fn after_last_colon(line: &str) -> &str {
    line.rsplit(':').next().unwrap_or(line).trim()
}

/// Title case as in "Senior Pricing Analyst": every cased run starts with an
/// upper-case letter followed only by lower-case ones, and at least one letter
/// is cased. Non-letters ("&", "-", digits) reset the run.
pub fn is_title_case(s: &str) -> bool {
    let mut any_cased = false;
    let mut in_cased_run = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if in_cased_run {
                return false;
            }
            in_cased_run = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !in_cased_run {
                return false;
            }
            in_cased_run = true;
            any_cased = true;
        } else {
            in_cased_run = false;
        }
    }
    any_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_job_title_takes_text_after_last_colon() {
        let lines = ["Position details", "Job Title: Pricing: Senior Actuary "];
        assert_eq!(labelled_job_title(&lines).as_deref(), Some("Senior Actuary"));
    }

    #[test]
    fn test_labelled_job_title_without_colon_uses_whole_line() {
        let lines = ["  Actuarial Role  "];
        assert_eq!(labelled_job_title(&lines).as_deref(), Some("Actuarial Role"));
    }

    #[test]
    fn test_labelled_job_title_is_case_insensitive() {
        let lines = ["JOB TITLE: Valuation Analyst"];
        assert_eq!(
            labelled_job_title(&lines).as_deref(),
            Some("Valuation Analyst")
        );
    }

    #[test]
    fn test_labelled_job_title_skips_empty_label() {
        let lines = ["Role:", "Job title: Pension Consultant"];
        assert_eq!(
            labelled_job_title(&lines).as_deref(),
            Some("Pension Consultant")
        );
    }

    #[test]
    fn test_labelled_job_title_first_match_wins() {
        let lines = ["Job Title: First Analyst", "Role: Second Analyst"];
        assert_eq!(labelled_job_title(&lines).as_deref(), Some("First Analyst"));
    }

    #[test]
    fn test_title_case_line_word_bounds() {
        assert_eq!(title_case_line(&["Actuary"]), None);
        assert_eq!(
            title_case_line(&["Actuary", "Senior Pricing Actuary"]).as_deref(),
            Some("Senior Pricing Actuary")
        );
        assert_eq!(
            title_case_line(&["One Two Three Four Five Six Seven"]),
            None
        );
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("Senior Pricing Analyst"));
        assert!(is_title_case("Pricing & Risk Analyst"));
        assert!(is_title_case("Analyst - Life Pricing"));
        assert!(!is_title_case("Analyst II"));
        assert!(!is_title_case("Senior pricing analyst"));
        assert!(!is_title_case("SQL Developer"));
        assert!(!is_title_case("1234 5678"));
        assert!(!is_title_case(""));
    }

    #[test]
    fn test_capitalized_at_requires_word_boundary_and_capital() {
        let lines = ["Great Team Spirit", "We work at pace", "Join us at Acme Corp, London"];
        assert_eq!(
            first_capture(&lines, &CAPITALIZED_AT).as_deref(),
            Some("Acme Corp")
        );
    }

    #[test]
    fn test_capitalized_at_keeps_ampersand_and_hyphen() {
        let lines = ["Analyst at Marsh & McLennan-Agency today"];
        assert_eq!(
            first_capture(&lines, &CAPITALIZED_AT).as_deref(),
            Some("Marsh & McLennan-Agency today")
        );
    }

    #[test]
    fn test_long_lines_limit_and_trim() {
        let lines = [
            "  one two three four five six  ",
            "short line",
            "a b c d e f",
            "g h i j k l",
            "m n o p q r",
        ];
        assert_eq!(
            long_lines(&lines, 3),
            vec!["one two three four five six", "a b c d e f", "g h i j k l"]
        );
    }

    #[test]
    fn test_long_lines_needs_more_than_five_words() {
        assert!(long_lines(&["one two three four five"], 3).is_empty());
    }
}

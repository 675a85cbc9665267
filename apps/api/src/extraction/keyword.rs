//! Plain regex strategy: label lines first, then a word-bounded `at <name>` match.
//! No title-case fallback, so unlabelled postings keep the default title.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::fields::{ExtractedFields, JobDescription};
use crate::extraction::rules::{after_last_colon, first_capture, labelled_job_title, long_lines};
use crate::extraction::{ExtractionStrategy, FieldExtractor};

pub const MAX_VALUE_PHRASES: usize = 3;

static COMPANY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(company|company name|employer)\s*:").expect("valid label regex")
});

/// Letters, spaces and `&` after `at`; any case.
static LOOSE_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bat\s([A-Za-z &]+)").expect("valid company regex"));

pub struct KeywordExtractor;

impl FieldExtractor for KeywordExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Keyword
    }

    fn extract(&self, jd: &JobDescription<'_>) -> ExtractedFields {
        let lines = jd.lines();
        let job_title = labelled_job_title(lines);
        let company_name = labelled_company(lines).or_else(|| first_capture(lines, &LOOSE_AT));
        let value_phrases = long_lines(lines, MAX_VALUE_PHRASES);

        ExtractedFields::from_parts(job_title, company_name, value_phrases)
    }
}

fn labelled_company(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|line| COMPANY_LABEL.is_match(line))
        .map(|line| after_last_colon(line))
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

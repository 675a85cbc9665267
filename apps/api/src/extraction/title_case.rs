//! Default strategy: labelled job title with a title-cased line fallback,
//! capitalized `at <Name>` company, long lines as value phrases.

use crate::extraction::fields::{ExtractedFields, JobDescription};
use crate::extraction::rules::{
    first_capture, labelled_job_title, long_lines, title_case_line, CAPITALIZED_AT,
};
use crate::extraction::{ExtractionStrategy, FieldExtractor};

pub const MAX_VALUE_PHRASES: usize = 3;

pub struct TitleCaseExtractor;

impl FieldExtractor for TitleCaseExtractor {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::TitleCase
    }

    fn extract(&self, jd: &JobDescription<'_>) -> ExtractedFields {
        let lines = jd.lines();
        let job_title = labelled_job_title(lines).or_else(|| title_case_line(lines));
        let company_name = first_capture(lines, &CAPITALIZED_AT);
        let value_phrases = long_lines(lines, MAX_VALUE_PHRASES);

        ExtractedFields::from_parts(job_title, company_name, value_phrases)
    }
}

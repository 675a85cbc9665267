//! Extraction input and output types.

use serde::{Deserialize, Serialize};

pub const DEFAULT_JOB_TITLE: &str = "Actuarial Analyst";
pub const DEFAULT_COMPANY_NAME: &str = "Your Company";
pub const DEFAULT_VALUE_PHRASE: &str = "innovative actuarial services";

/// Separator used when value phrases are shown as one "company value" string.
pub const VALUE_PHRASE_SEPARATOR: &str = ", ";

/// A pasted job description, viewed as its ordered lines. Borrowed from the
/// request body and dropped once extraction returns.
#[derive(Debug, Clone)]
pub struct JobDescription<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> JobDescription<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: split_lines(text),
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Characters that end a line. `\r\n` counts as one break.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}',
];

/// Splits pasted text into lines on any Unicode line break, not only `\n`.
/// A trailing break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Best-effort fields seeded from a job description. Always complete: every
/// field that nothing matched holds its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub job_title: String,
    pub company_name: String,
    pub value_phrases: Vec<String>,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            job_title: DEFAULT_JOB_TITLE.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            value_phrases: vec![DEFAULT_VALUE_PHRASE.to_string()],
        }
    }
}

impl ExtractedFields {
    /// Assembles the triple, substituting defaults for anything unmatched.
    pub fn from_parts(
        job_title: Option<String>,
        company_name: Option<String>,
        value_phrases: Vec<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            job_title: job_title
                .filter(|t| !t.is_empty())
                .unwrap_or(defaults.job_title),
            company_name: company_name
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.company_name),
            value_phrases: if value_phrases.is_empty() {
                defaults.value_phrases
            } else {
                value_phrases
            },
        }
    }

    /// The value phrases as one display string, e.g. for the letter's company value slot.
    pub fn company_value(&self) -> String {
        self.value_phrases.join(VALUE_PHRASE_SEPARATOR)
    }
}

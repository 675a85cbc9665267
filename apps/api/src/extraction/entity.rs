//! Entity strategy: prefers an organization entity for the company name and
//! noun chunks for the value phrases.
//!
//! The language model is a seam: anything implementing `PhraseTagger` can be
//! plugged in. `RuleBasedTagger` is the built-in, dependency-free tagger: it
//! finds capitalized runs (entities) and stopword-delimited runs (chunks).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::extraction::fields::{split_lines, ExtractedFields, JobDescription};
use crate::extraction::rules::{first_capture, labelled_job_title, title_case_line, CAPITALIZED_AT};
use crate::extraction::{ExtractionStrategy, FieldExtractor};

pub const MAX_VALUE_PHRASES: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Tagger seam
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Organization,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Named-entity and noun-phrase segmentation. Results are in document order.
pub trait PhraseTagger: Send + Sync {
    fn entities(&self, text: &str) -> Vec<Entity>;
    fn noun_chunks(&self, text: &str) -> Vec<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// EntityExtractor
// ────────────────────────────────────────────────────────────────────────────

pub struct EntityExtractor<T: PhraseTagger> {
    tagger: T,
}

impl<T: PhraseTagger> EntityExtractor<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }
}

impl<T: PhraseTagger> FieldExtractor for EntityExtractor<T> {
    fn strategy(&self) -> ExtractionStrategy {
        ExtractionStrategy::Entity
    }

    fn extract(&self, jd: &JobDescription<'_>) -> ExtractedFields {
        let lines = jd.lines();
        let job_title = labelled_job_title(lines).or_else(|| title_case_line(lines));

        let company_name = self
            .tagger
            .entities(jd.text())
            .into_iter()
            .find(|e| e.label == EntityLabel::Organization && !e.text.trim().is_empty())
            .map(|e| e.text.trim().to_string())
            .or_else(|| first_capture(lines, &CAPITALIZED_AT));

        let value_phrases: Vec<String> = self
            .tagger
            .noun_chunks(jd.text())
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .take(MAX_VALUE_PHRASES)
            .collect();

        ExtractedFields::from_parts(job_title, company_name, value_phrases)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedTagger
// ────────────────────────────────────────────────────────────────────────────

pub struct RuleBasedTagger;

/// Words that introduce an employer on their own: "at Acme", "join Acme".
/// "with" and "for" are not here: "with Excel and R" is no employer, so runs
/// after them only count through `ORG_SUFFIXES`.
const ORG_INTRODUCERS: &[&str] = &["at", "join"];

/// Lower-case words allowed between two capitalized words of one entity.
const ENTITY_CONNECTORS: &[&str] = &["&", "of", "and", "de"];

const ORG_SUFFIXES: &[&str] = &[
    "inc", "incorporated", "llc", "llp", "ltd", "limited", "plc", "corp", "corporation", "co",
    "company", "group", "partners", "holdings", "associates", "consulting", "insurance",
    "assurance", "reinsurance", "re", "bank", "capital", "solutions", "technologies", "gmbh",
    "ag", "sa", "bv",
];

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "our", "your", "their", "its", "his",
    "her", "my", "we", "you", "they", "he", "she", "it", "i", "us", "them", "who", "which",
    "what", "where", "when", "why", "how", "and", "or", "but", "nor", "so", "yet", "if", "then",
    "than", "as", "at", "by", "for", "from", "in", "into", "of", "on", "onto", "to", "with",
    "within", "without", "about", "across", "after", "before", "between", "during", "over",
    "under", "through", "up", "out", "will", "would", "can", "could", "should", "shall", "may",
    "might", "must", "is", "are", "was", "were", "be", "been", "being", "am", "has", "have",
    "had", "do", "does", "did", "not", "no", "also", "very", "more", "most", "such", "all",
    "any", "each", "every", "both", "few", "many", "much", "other", "some", "own", "same",
    "only", "just", "join", "including", "like", "&",
];

/// Characters that close a phrase when a token ends with them.
const PHRASE_BREAKS: &[char] = &[',', ':', ';', '(', ')', '"'];

impl PhraseTagger for RuleBasedTagger {
    fn entities(&self, text: &str) -> Vec<Entity> {
        sentences(text).flat_map(sentence_entities).collect()
    }

    fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        sentences(text)
            .flat_map(sentence_chunks)
            .filter(|chunk| seen.insert(chunk.to_lowercase()))
            .collect()
    }
}

/// Splits on line breaks and on sentence punctuation followed by whitespace.
fn sentences(text: &str) -> impl Iterator<Item = Vec<&str>> {
    split_lines(text).into_iter().flat_map(|line| {
        let mut out: Vec<Vec<&str>> = vec![Vec::new()];
        for token in line.split_whitespace() {
            if let Some(current) = out.last_mut() {
                current.push(token);
            }
            if token.ends_with(['.', '!', '?']) {
                out.push(Vec::new());
            }
        }
        out.into_iter().filter(|s| !s.is_empty())
    })
}

fn clean(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric() && c != '&')
}

fn closes_phrase(token: &str) -> bool {
    token.ends_with(PHRASE_BREAKS) || token.starts_with(['(', '"'])
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_one_of(word: &str, list: &[&str]) -> bool {
    let lower = word.to_lowercase();
    list.contains(&lower.as_str())
}

fn sentence_entities(tokens: Vec<&str>) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if !is_capitalized(clean(tokens[i])) {
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i + 1;
        if !closes_phrase(tokens[i]) {
            let mut j = i + 1;
            while j < tokens.len() {
                let word = clean(tokens[j]);
                if is_capitalized(word) {
                    end = j + 1;
                    if closes_phrase(tokens[j]) {
                        break;
                    }
                    j += 1;
                } else if is_one_of(word, ENTITY_CONNECTORS)
                    && !closes_phrase(tokens[j])
                    && tokens.get(j + 1).is_some_and(|next| is_capitalized(clean(next)))
                {
                    j += 1;
                } else {
                    break;
                }
            }
        }
        i = end;

        let mut words: Vec<&str> = tokens[start..end].iter().map(|t| clean(t)).collect();
        let mut introduced = start > 0 && is_one_of(clean(tokens[start - 1]), ORG_INTRODUCERS);

        // Sentence-initial "Join Acme Group" / "The Acme Group".
        while let Some(first) = words.first() {
            if is_one_of(first, ORG_INTRODUCERS) {
                introduced = true;
                words.remove(0);
            } else if is_one_of(first, STOPWORDS) {
                words.remove(0);
            } else {
                break;
            }
        }
        if words.is_empty() {
            continue;
        }

        let has_suffix = words
            .last()
            .is_some_and(|last| is_one_of(last, ORG_SUFFIXES));
        let label = if has_suffix || introduced {
            EntityLabel::Organization
        } else {
            EntityLabel::Other
        };

        entities.push(Entity {
            text: words.join(" "),
            label,
        });
    }
    entities
}

fn sentence_chunks(tokens: Vec<&str>) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    let mut flush = |current: &mut Vec<&str>, is_label: bool| {
        if current.len() >= 2 && !is_label {
            chunks.push(current.join(" "));
        }
        current.clear();
    };

    for token in tokens {
        let word = clean(token);
        if word.is_empty() || is_one_of(word, STOPWORDS) {
            flush(&mut current, false);
            continue;
        }
        current.push(word);
        if closes_phrase(token) {
            // "Job Title:" style labels are not phrases.
            flush(&mut current, token.ends_with(':'));
        }
    }
    flush(&mut current, false);
    chunks
}

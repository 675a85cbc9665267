// Field extraction: job description text -> best-effort letter fields.
// Three interchangeable strategies behind `FieldExtractor`; none of them can fail.

pub mod entity;
pub mod fields;
pub mod handlers;
pub mod keyword;
pub mod rules;
pub mod title_case;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use fields::{ExtractedFields, JobDescription};

use crate::extraction::entity::{EntityExtractor, RuleBasedTagger};
use crate::extraction::keyword::KeywordExtractor;
use crate::extraction::title_case::TitleCaseExtractor;

/// Which heuristic derives the fields. A configuration choice, not a correctness one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Labelled lines and a loose `at <Name>` pattern.
    Keyword,
    /// Labelled lines, title-cased line fallback, capitalized `at <Name>` pattern.
    #[default]
    TitleCase,
    /// Organization entities and noun chunks from a `PhraseTagger`.
    Entity,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Keyword => "keyword",
            ExtractionStrategy::TitleCase => "title_case",
            ExtractionStrategy::Entity => "entity",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "keyword" | "regex" => Ok(ExtractionStrategy::Keyword),
            "title_case" | "titlecase" => Ok(ExtractionStrategy::TitleCase),
            "entity" | "nlp" => Ok(ExtractionStrategy::Entity),
            other => Err(format!(
                "unknown extraction strategy '{other}' (expected keyword, title_case or entity)"
            )),
        }
    }
}

/// The extractor trait. Implement this to swap heuristics without touching
/// the handlers or the letter renderer.
///
/// Carried in `AppState` as `Arc<dyn FieldExtractor>`.
pub trait FieldExtractor: Send + Sync {
    fn strategy(&self) -> ExtractionStrategy;

    /// Never fails: fields that nothing matched fall back to their defaults.
    fn extract(&self, jd: &JobDescription<'_>) -> ExtractedFields;
}

/// Builds the extractor for a strategy. Construction is cheap, so per-request
/// overrides build a fresh one.
pub fn build_extractor(strategy: ExtractionStrategy) -> Arc<dyn FieldExtractor> {
    match strategy {
        ExtractionStrategy::Keyword => Arc::new(KeywordExtractor),
        ExtractionStrategy::TitleCase => Arc::new(TitleCaseExtractor),
        ExtractionStrategy::Entity => Arc::new(EntityExtractor::new(RuleBasedTagger)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ExtractionStrategy; 3] = [
        ExtractionStrategy::Keyword,
        ExtractionStrategy::TitleCase,
        ExtractionStrategy::Entity,
    ];

    #[test]
    fn test_strategy_parses_aliases() {
        assert_eq!("regex".parse::<ExtractionStrategy>(), Ok(ExtractionStrategy::Keyword));
        assert_eq!(
            "Title-Case".parse::<ExtractionStrategy>(),
            Ok(ExtractionStrategy::TitleCase)
        );
        assert_eq!("nlp".parse::<ExtractionStrategy>(), Ok(ExtractionStrategy::Entity));
        assert!("spacy".parse::<ExtractionStrategy>().is_err());
    }

    #[test]
    fn test_strategy_serde_is_snake_case() {
        let json = serde_json::to_string(&ExtractionStrategy::TitleCase).unwrap();
        assert_eq!(json, r#""title_case""#);
        let parsed: ExtractionStrategy = serde_json::from_str(r#""entity""#).unwrap();
        assert_eq!(parsed, ExtractionStrategy::Entity);
    }

    #[test]
    fn test_build_extractor_reports_its_strategy() {
        for strategy in ALL {
            assert_eq!(build_extractor(strategy).strategy(), strategy);
        }
    }

    #[test]
    fn test_every_strategy_defaults_on_empty_input() {
        let jd = JobDescription::new("");
        for strategy in ALL {
            let fields = build_extractor(strategy).extract(&jd);
            assert_eq!(fields, ExtractedFields::default(), "strategy {strategy}");
        }
    }

    #[test]
    fn test_every_strategy_returns_non_empty_fields() {
        let inputs = [
            "",
            "\n\n   \n",
            "Role:",
            "at",
            "a b c d e f g h",
            "Job Title: Pricing Actuary\nGreat team at Acme Corp\nWe value innovation and long-term client relationships",
            "Join Zurich Insurance Group as a Senior Pricing Analyst. We care about integrity.",
        ];
        for strategy in ALL {
            let extractor = build_extractor(strategy);
            for input in inputs {
                let fields = extractor.extract(&JobDescription::new(input));
                assert!(!fields.job_title.is_empty(), "{strategy}: {input:?}");
                assert!(!fields.company_name.is_empty(), "{strategy}: {input:?}");
                assert!(!fields.value_phrases.is_empty(), "{strategy}: {input:?}");
                assert!(fields.value_phrases.iter().all(|p| !p.is_empty()));
            }
        }
    }

    #[test]
    fn test_every_strategy_is_idempotent() {
        let text = "Senior Pricing Actuary\nYou will join the team at Northwind Re\n\
                    We build transparent pricing models for commercial property clients\n\
                    Our culture values mentoring, curiosity and long-term thinking";
        for strategy in ALL {
            let extractor = build_extractor(strategy);
            let jd = JobDescription::new(text);
            assert_eq!(extractor.extract(&jd), extractor.extract(&jd), "{strategy}");
        }
    }
}

//! The fixed cover letter template and single-pass placeholder substitution.

use serde::{Deserialize, Serialize};

use crate::extraction::ExtractedFields;

/// The letter body. Exactly five placeholders: `{hiring_manager}`, `{job_title}`,
/// `{company_name}`, `{platform}`, `{company_value}`.
pub const LETTER_TEMPLATE: &str = include_str!("../../assets/cover_letter.txt");

pub const DEFAULT_HIRING_MANAGER: &str = "Recruitment Team";
pub const DEFAULT_PLATFORM: &str = "LinkedIn";

/// The five editable letter fields. Missing JSON fields read as empty strings,
/// and an empty string renders as nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterFields {
    pub hiring_manager: String,
    pub job_title: String,
    pub company_name: String,
    pub platform: String,
    pub company_value: String,
}

impl LetterFields {
    /// Seed values for a fresh editing session.
    pub fn initial() -> Self {
        Self {
            hiring_manager: DEFAULT_HIRING_MANAGER.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            ..Self::default()
        }
    }

    /// Overwrites the fields extraction can seed. Hiring manager and platform are left alone.
    pub fn apply_extracted(&mut self, extracted: &ExtractedFields) {
        self.job_title = extracted.job_title.clone();
        self.company_name = extracted.company_name.clone();
        self.company_value = extracted.company_value();
    }

    fn value_of(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            "hiring_manager" => Some(&self.hiring_manager),
            "job_title" => Some(&self.job_title),
            "company_name" => Some(&self.company_name),
            "platform" => Some(&self.platform),
            "company_value" => Some(&self.company_value),
            _ => None,
        }
    }
}

/// The template with every placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderedLetter(String);

impl RenderedLetter {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn render_letter(fields: &LetterFields) -> RenderedLetter {
    RenderedLetter(fill_placeholders(LETTER_TEMPLATE, fields))
}

/// Replaces `{name}` occurrences in one left-to-right pass. Substituted text is
/// never rescanned, so a field containing "{platform}" stays literal. Braces
/// that do not form a known placeholder are copied through.
fn fill_placeholders(template: &str, fields: &LetterFields) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let substituted = after_open.find('}').and_then(|close| {
            fields
                .value_of(&after_open[..close])
                .map(|value| (value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDERS: [&str; 5] = [
        "hiring_manager",
        "job_title",
        "company_name",
        "platform",
        "company_value",
    ];

    fn sample_fields() -> LetterFields {
        LetterFields {
            hiring_manager: "Ms. Rivera".to_string(),
            job_title: "Pricing Actuary".to_string(),
            company_name: "Acme Corp".to_string(),
            platform: "Indeed".to_string(),
            company_value: "transparent pricing".to_string(),
        }
    }

    #[test]
    fn test_template_has_exactly_the_five_placeholders() {
        for name in PLACEHOLDERS {
            assert!(
                LETTER_TEMPLATE.contains(&format!("{{{name}}}")),
                "template is missing {{{name}}}"
            );
        }
        let rendered = render_letter(&sample_fields());
        assert!(!rendered.as_str().contains('{'));
        assert!(!rendered.as_str().contains('}'));
    }

    #[test]
    fn test_every_field_appears_verbatim() {
        let fields = sample_fields();
        let letter = render_letter(&fields);
        for name in PLACEHOLDERS {
            let value = fields.value_of(name).unwrap();
            assert!(letter.as_str().contains(value), "{name} missing from letter");
        }
        assert!(letter.as_str().starts_with("Dear Ms. Rivera,"));
    }

    #[test]
    fn test_empty_fields_render_blank() {
        let letter = render_letter(&LetterFields::default());
        assert!(letter.as_str().starts_with("Dear ,"));
        assert!(letter.as_str().contains("in the  position at , as advertised on ."));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let fields = LetterFields {
            company_value: "{platform} and {unknown}".to_string(),
            platform: "LinkedIn".to_string(),
            ..LetterFields::default()
        };
        let letter = render_letter(&fields);
        assert!(letter.as_str().contains("reputation for {platform} and {unknown},"));
    }

    #[test]
    fn test_unknown_and_unclosed_braces_are_kept() {
        let fields = sample_fields();
        assert_eq!(
            fill_placeholders("{x} {job_title} {", &fields),
            "{x} Pricing Actuary {"
        );
        assert_eq!(fill_placeholders("{{platform}}", &fields), "{Indeed}");
    }

    #[test]
    fn test_initial_fields() {
        let fields = LetterFields::initial();
        assert_eq!(fields.hiring_manager, "Recruitment Team");
        assert_eq!(fields.platform, "LinkedIn");
        assert!(fields.job_title.is_empty());
        assert!(fields.company_name.is_empty());
        assert!(fields.company_value.is_empty());
    }

    #[test]
    fn test_apply_extracted_keeps_manager_and_platform() {
        let mut fields = LetterFields::initial();
        fields.hiring_manager = "Dr. Chen".to_string();
        let extracted = ExtractedFields {
            job_title: "Pricing Actuary".to_string(),
            company_name: "Acme Corp".to_string(),
            value_phrases: vec!["innovation".to_string(), "client focus".to_string()],
        };
        fields.apply_extracted(&extracted);
        assert_eq!(fields.hiring_manager, "Dr. Chen");
        assert_eq!(fields.platform, "LinkedIn");
        assert_eq!(fields.job_title, "Pricing Actuary");
        assert_eq!(fields.company_name, "Acme Corp");
        assert_eq!(fields.company_value, "innovation, client focus");
    }

    #[test]
    fn test_missing_json_fields_are_empty() {
        let fields: LetterFields = serde_json::from_str(r#"{"job_title":"Analyst"}"#).unwrap();
        assert_eq!(fields.job_title, "Analyst");
        assert!(fields.hiring_manager.is_empty());
        assert!(fields.platform.is_empty());
    }
}

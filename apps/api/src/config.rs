use anyhow::{bail, Context, Result};

use crate::extraction::ExtractionStrategy;
use crate::letter::FontFamily;

pub const DEFAULT_PDF_FILE_NAME: &str = "Cover_Letter.pdf";

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub extraction_strategy: ExtractionStrategy,
    pub letter_font: FontFamily,
    /// Download name for the exported letter.
    pub pdf_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            extraction_strategy: ExtractionStrategy::default(),
            letter_font: FontFamily::default(),
            pdf_file_name: DEFAULT_PDF_FILE_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let extraction_strategy = match lookup("EXTRACTION_STRATEGY") {
            Some(raw) => raw
                .parse::<ExtractionStrategy>()
                .map_err(anyhow::Error::msg)
                .context("EXTRACTION_STRATEGY is invalid")?,
            None => defaults.extraction_strategy,
        };

        let letter_font = match lookup("LETTER_FONT") {
            Some(raw) => raw
                .parse::<FontFamily>()
                .map_err(anyhow::Error::msg)
                .context("LETTER_FONT is invalid")?,
            None => defaults.letter_font,
        };

        let pdf_file_name = lookup("PDF_FILE_NAME").unwrap_or(defaults.pdf_file_name);
        validate_file_name(&pdf_file_name)
            .with_context(|| format!("PDF_FILE_NAME '{pdf_file_name}' is invalid"))?;

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            extraction_strategy,
            letter_font,
            pdf_file_name,
        })
    }
}

/// The name ends up inside a quoted Content-Disposition header value.
fn validate_file_name(name: &str) -> Result<()> {
    if !name.to_ascii_lowercase().ends_with(".pdf") || name.len() <= ".pdf".len() {
        bail!("file name must end in .pdf");
    }
    if let Some(c) = name
        .chars()
        .find(|&c| !(' '..='~').contains(&c) || matches!(c, '"' | '\\' | '/'))
    {
        bail!("file name contains unsupported character {c:?}");
    }
    Ok(())
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::render::TemplateVariant;

/// Application configuration loaded from environment variables.
/// Everything is optional; bad values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Text-generation credential. Absent means the assistant falls back.
    pub gemini_api_key: Option<String>,
    pub polish_enabled: bool,
    pub generate_enabled: bool,
    pub template: TemplateVariant,
    pub export_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let template = match get("RESUMOTION_TEMPLATE") {
            Some(raw) => raw
                .parse::<TemplateVariant>()
                .with_context(|| format!("RESUMOTION_TEMPLATE has unknown value '{raw}'"))?,
            None => TemplateVariant::default(),
        };

        Ok(Config {
            gemini_api_key: get("GEMINI_API_KEY")
                .or_else(|| get("API_KEY"))
                .filter(|k| !k.trim().is_empty()),
            polish_enabled: optional_flag(&get, "RESUMOTION_POLISH_ENABLED")?,
            generate_enabled: optional_flag(&get, "RESUMOTION_GENERATE_ENABLED")?,
            template,
            export_dir: get("RESUMOTION_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn optional_flag(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match get(key) {
        None => Ok(false),
        Some(raw) => parse_flag(&raw).with_context(|| format!("{key} must be a boolean")),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(!config.polish_enabled);
        assert!(!config.generate_enabled);
        assert_eq!(config.template, TemplateVariant::ModernTech);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_api_key_fallback() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "k2")])).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("k2"));
        let config =
            Config::from_lookup(lookup(&[("API_KEY", "k2"), ("GEMINI_API_KEY", "k1")])).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("k1"));
    }

    #[test]
    fn test_flags_and_template() {
        let config = Config::from_lookup(lookup(&[
            ("RESUMOTION_POLISH_ENABLED", "true"),
            ("RESUMOTION_GENERATE_ENABLED", "0"),
            ("RESUMOTION_TEMPLATE", "executive-suite"),
            ("RESUMOTION_EXPORT_DIR", "/tmp/out"),
        ]))
        .unwrap();
        assert!(config.polish_enabled);
        assert!(!config.generate_enabled);
        assert_eq!(config.template, TemplateVariant::ExecutiveSuite);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = Config::from_lookup(lookup(&[("RESUMOTION_POLISH_ENABLED", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("RESUMOTION_POLISH_ENABLED"));
        let err = Config::from_lookup(lookup(&[("RESUMOTION_TEMPLATE", "fancy")])).unwrap_err();
        assert!(err.to_string().contains("fancy"));
    }
}

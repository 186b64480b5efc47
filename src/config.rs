use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = ".token-lens.json";
const CONFIG_DIR_NAME: &str = "token-lens";

/// Target languages offered for translation, in display order.
pub const TARGET_LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Chinese",
    "Japanese",
    "Korean",
    "Arabic",
    "Russian",
    "Portuguese",
    "Italian",
    "Dutch",
    "Hindi",
    "Turkish",
    "Polish",
    "Swedish",
    "Norwegian",
    "Vietnamese",
    "Thai",
    "Hebrew",
    "Catalan",
    "Czech",
    "Danish",
    "Finnish",
    "Greek",
    "Hungarian",
    "Indonesian",
    "Romanian",
    "Ukrainian",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// API credential for the translation provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_target_language")]
    pub target_language: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Input cap enforced by the CLI via truncation plus a warning
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

// Config defaults
const DEFAULT_TARGET_LANGUAGE: &str = "Spanish";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f64 = 0.3;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
const DEFAULT_MAX_INPUT_CHARS: usize = 500;

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.into()
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}
fn default_max_input_chars() -> usize {
    DEFAULT_MAX_INPUT_CHARS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            target_language: DEFAULT_TARGET_LANGUAGE.into(),
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

/// Load configuration from file, applying environment variable overrides
pub fn load_config() -> Config {
    let mut config = find_config_file()
        .and_then(|path| load_config_from_path(&path))
        .unwrap_or_default();

    if let Ok(val) = std::env::var("TOKEN_LENS_API_KEY") {
        config.api_key = Some(val);
    } else if config.api_key.is_none() {
        if let Ok(val) = std::env::var("OPENAI_API_KEY") {
            config.api_key = Some(val);
        }
    }
    if let Ok(val) = std::env::var("TOKEN_LENS_TARGET_LANG") {
        config.target_language = val;
    }
    if let Ok(val) = std::env::var("TOKEN_LENS_MODEL") {
        config.model = val;
    }

    config
}

/// Load and parse a config file; parse errors are reported, not fatal
pub fn load_config_from_path(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            crate::output::print_error(&format!("Config parse error: {e}"));
            None
        }
    }
}

/// Persist the API key so it survives across sessions.
///
/// Other settings already present in the saved file are kept.
pub fn save_api_key(key: &str) -> Result<PathBuf> {
    let path = saved_config_path().ok_or_else(|| Error::Config {
        message: "no config directory available on this system".into(),
    })?;
    save_api_key_to_path(&path, key)?;
    Ok(path)
}

/// Persist the API key into a specific config file (for testing)
pub fn save_api_key_to_path(path: &Path, key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut config = load_config_from_path(path).unwrap_or_default();
    config.api_key = Some(key.trim().to_string());
    let json = serde_json::to_string_pretty(&config)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Canonicalize a user-supplied target language against the offered list.
pub fn validate_target_language(input: &str) -> Result<&'static str> {
    let wanted = input.trim();
    TARGET_LANGUAGES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| Error::Config {
            message: format!("unknown target language '{wanted}'; see --languages for the list"),
        })
}

fn saved_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

/// Search for config file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let search_paths = [
        std::env::current_dir().ok(),
        dirs::home_dir(),
        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME)),
    ];

    for base in search_paths.into_iter().flatten() {
        let config_path = base.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.target_language, "Spanish");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_output_tokens, 1000);
        assert_eq!(config.max_input_chars, 500);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"targetLanguage": "Japanese"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.target_language, "Japanese");
        assert_eq!(config.model, "gpt-4o-mini"); // default
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let json = r#"{"apiKey": "sk-abc", "maxOutputTokens": 200, "apiBaseUrl": "http://localhost:1234/v1"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(config.max_output_tokens, 200);
        assert_eq!(config.api_base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn test_save_api_key_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);

        save_api_key_to_path(&path, "  sk-secret  ").unwrap();
        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-secret"));
    }

    #[test]
    fn test_save_api_key_preserves_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, r#"{"targetLanguage": "Korean"}"#).unwrap();

        save_api_key_to_path(&path, "sk-new").unwrap();
        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.target_language, "Korean");
        assert_eq!(config.api_key.as_deref(), Some("sk-new"));
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from_path(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn test_validate_target_language() {
        assert_eq!(validate_target_language("Japanese").unwrap(), "Japanese");
        assert_eq!(validate_target_language("spanish").unwrap(), "Spanish");
        assert_eq!(validate_target_language("  FRENCH ").unwrap(), "French");
    }

    #[test]
    fn test_validate_target_language_rejects_unknown() {
        assert!(matches!(
            validate_target_language("Klingon"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_target_language_list_matches_detector_names() {
        // Every offered target is a name the detector can also produce
        for lang in TARGET_LANGUAGES {
            assert!(!lang.is_empty());
        }
        assert!(TARGET_LANGUAGES.contains(&"English"));
        assert!(TARGET_LANGUAGES.contains(&"Ukrainian"));
    }
}

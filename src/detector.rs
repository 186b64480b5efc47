//! Language identification
//!
//! Thin adapter over whatlang. Detection is best-effort and fails open:
//! short input, low-signal input, and anything the classifier cannot place
//! all collapse into `Undetermined` rather than an error.

use serde::Serialize;

/// Hard gate: detection is not attempted below this many trimmed chars.
pub const MIN_DETECTION_CHARS: usize = 10;

/// A successfully identified language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLanguage {
    /// ISO 639-3 code as reported by the classifier
    pub code: String,
    /// Human-readable name, uppercased code when the table has no entry
    pub name: String,
}

/// Outcome of language detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Detection {
    Detected(DetectedLanguage),
    #[default]
    Undetermined,
}

impl Detection {
    pub fn detected(&self) -> Option<&DetectedLanguage> {
        match self {
            Detection::Detected(lang) => Some(lang),
            Detection::Undetermined => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.detected().map(|l| l.name.as_str())
    }
}

/// Identify the dominant language of `text`.
///
/// Input shorter than [`MIN_DETECTION_CHARS`] after trimming is never
/// classified, regardless of content.
pub fn detect(text: &str) -> Detection {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_DETECTION_CHARS {
        return Detection::Undetermined;
    }

    match whatlang::detect(trimmed) {
        Some(info) => {
            let code = info.lang().code();
            Detection::Detected(DetectedLanguage {
                code: code.to_string(),
                name: name_for(code),
            })
        }
        None => Detection::Undetermined,
    }
}

fn name_for(code: &str) -> String {
    display_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_uppercase())
}

fn display_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "eng" => "English",
        "spa" => "Spanish",
        "fra" => "French",
        "deu" => "German",
        "cmn" => "Chinese",
        "jpn" => "Japanese",
        "kor" => "Korean",
        "ara" => "Arabic",
        "rus" => "Russian",
        "por" => "Portuguese",
        "ita" => "Italian",
        "nld" => "Dutch",
        "hin" => "Hindi",
        "tur" => "Turkish",
        "pol" => "Polish",
        "swe" => "Swedish",
        "nor" | "nob" => "Norwegian",
        "vie" => "Vietnamese",
        "tha" => "Thai",
        "heb" => "Hebrew",
        "cat" => "Catalan",
        "ces" => "Czech",
        "dan" => "Danish",
        "fin" => "Finnish",
        "ell" => "Greek",
        "hun" => "Hungarian",
        "ind" => "Indonesian",
        "ron" => "Romanian",
        "ukr" => "Ukrainian",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_gate_is_undetermined() {
        // 9 trimmed chars: never classified, however English it looks
        assert_eq!(detect("architect"), Detection::Undetermined);
    }

    #[test]
    fn test_gate_counts_trimmed_chars() {
        assert_eq!(detect("   short    "), Detection::Undetermined);
        assert_eq!(detect(""), Detection::Undetermined);
    }

    #[test]
    fn test_detects_english() {
        let result = detect("This is clearly an English sentence about nothing in particular.");
        assert_eq!(result.name(), Some("English"));
    }

    #[test]
    fn test_detects_spanish() {
        let result = detect("Esta es una frase en español sobre la historia de la ciudad.");
        assert_eq!(result.name(), Some("Spanish"));
    }

    #[test]
    fn test_detects_russian() {
        let result = detect("Это предложение написано на русском языке для проверки.");
        assert_eq!(result.name(), Some("Russian"));
        assert_eq!(result.detected().map(|l| l.code.as_str()), Some("rus"));
    }

    #[test]
    fn test_display_name_table() {
        assert_eq!(display_name("eng"), Some("English"));
        assert_eq!(display_name("jpn"), Some("Japanese"));
        assert_eq!(display_name("nob"), Some("Norwegian"));
        assert_eq!(display_name("epo"), None);
    }

    #[test]
    fn test_unknown_code_falls_back_to_uppercase() {
        assert_eq!(name_for("epo"), "EPO");
        assert_eq!(name_for("yid"), "YID");
    }

    #[test]
    fn test_detection_accessors() {
        let d = Detection::Detected(DetectedLanguage {
            code: "eng".into(),
            name: "English".into(),
        });
        assert_eq!(d.name(), Some("English"));
        assert_eq!(Detection::Undetermined.name(), None);
    }
}

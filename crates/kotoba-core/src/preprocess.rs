use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default JP preprocessor: missing input becomes empty, then NFKC
    fn process(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };

        if text.trim().is_empty() {
            return String::new();
        }

        // Half-width katakana and full-width ASCII fold into their canonical forms
        text.nfkc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Leaves text untouched apart from treating missing input as empty
pub struct RawPreprocessor;
impl Preprocessor for RawPreprocessor {
    fn process(&self, text: Option<&str>) -> String {
        text.unwrap_or_default().to_string()
    }
}

/// Pull segmentable text out of an arbitrary JSON payload.
///
/// Only strings carry text; null, numbers, arrays and objects yield `None`.
pub fn coerce_text(value: &serde_json::Value) -> Option<&str> {
    value.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_input_is_empty() {
        assert_eq!(DefaultPreprocessor.process(None), "");
        assert_eq!(DefaultPreprocessor.process(Some("   \n")), "");
        assert_eq!(RawPreprocessor.process(None), "");
    }

    #[test]
    fn nfkc_folds_half_width_katakana() {
        assert_eq!(DefaultPreprocessor.process(Some("ｺｰﾋｰ")), "コーヒー");
        assert_eq!(RawPreprocessor.process(Some("ｺｰﾋｰ")), "ｺｰﾋｰ");
    }

    #[test]
    fn only_json_strings_coerce() {
        assert_eq!(coerce_text(&json!("日本語")), Some("日本語"));
        assert_eq!(coerce_text(&json!(null)), None);
        assert_eq!(coerce_text(&json!(42)), None);
        assert_eq!(coerce_text(&json!({"text": "x"})), None);
    }
}

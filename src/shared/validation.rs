use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating slug fields (categories, content, series)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "world-news", "tutorials", "how-to-2024"
    /// - Invalid: "-news", "news-", "news--item", "News", "news_item"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating language codes in localized maps
    /// BCP-47-ish: two/three letter primary tag, optional region subtag
    /// - Valid: "en", "es", "fr", "pt-BR", "zh-Hans"
    /// - Invalid: "e", "english", "EN_us", ""
    pub static ref LANGUAGE_CODE_REGEX: Regex =
        Regex::new(r"^[a-z]{2,3}(?:-[A-Za-z0-9]{2,8})*$").unwrap();
}

/// Validates a localized-string map: a non-empty JSON object whose keys are
/// language codes and whose values are non-empty strings.
pub fn localized_map(value: &serde_json::Value) -> Result<(), ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::new("localized_map_not_object"))?;

    if obj.is_empty() {
        return Err(ValidationError::new("localized_map_empty"));
    }

    for (lang, text) in obj {
        if !LANGUAGE_CODE_REGEX.is_match(lang) {
            return Err(ValidationError::new("localized_map_bad_language"));
        }
        match text.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Err(ValidationError::new("localized_map_bad_value")),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("world-news"));
        assert!(SLUG_REGEX.is_match("tutorials"));
        assert!(SLUG_REGEX.is_match("how-to-2024"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-news")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("news-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("news--item")); // double hyphen
        assert!(!SLUG_REGEX.is_match("News")); // uppercase
        assert!(!SLUG_REGEX.is_match("news_item")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_language_code_regex() {
        assert!(LANGUAGE_CODE_REGEX.is_match("en"));
        assert!(LANGUAGE_CODE_REGEX.is_match("spa"));
        assert!(LANGUAGE_CODE_REGEX.is_match("pt-BR"));
        assert!(LANGUAGE_CODE_REGEX.is_match("zh-Hans"));

        assert!(!LANGUAGE_CODE_REGEX.is_match("e"));
        assert!(!LANGUAGE_CODE_REGEX.is_match("english"));
        assert!(!LANGUAGE_CODE_REGEX.is_match("EN_us"));
        assert!(!LANGUAGE_CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_localized_map_accepts_valid_maps() {
        assert!(localized_map(&json!({"en": "News"})).is_ok());
        assert!(localized_map(&json!({"en": "News", "fr": "Actualités"})).is_ok());
    }

    #[test]
    fn test_localized_map_rejects_bad_shapes() {
        assert!(localized_map(&json!("News")).is_err()); // not an object
        assert!(localized_map(&json!({})).is_err()); // empty
        assert!(localized_map(&json!({"english": "News"})).is_err()); // bad key
        assert!(localized_map(&json!({"en": ""})).is_err()); // empty value
        assert!(localized_map(&json!({"en": 42})).is_err()); // non-string value
    }
}

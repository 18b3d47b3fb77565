//! Unit tests for recipe error types

#[cfg(test)]
mod tests {
    use crate::recipe::error::RecipeError;
    use std::error::Error;

    #[test]
    fn test_missing_field_error() {
        let error = RecipeError::MissingField("title");
        assert_eq!(error.to_string(), "Missing required field: title");
    }

    #[test]
    fn test_unknown_tag_error() {
        let error = RecipeError::UnknownTag("Brunch".to_string());
        assert_eq!(error.to_string(), "Unknown tag 'Brunch'");
    }

    #[test]
    fn test_unknown_difficulty_display() {
        let error = RecipeError::UnknownDifficulty("extreme".to_string());
        let display = format!("{error}");
        assert!(display.contains("extreme"));
        assert!(display.contains("easy, medium or hard"));
    }

    #[test]
    fn test_unknown_sort_key_display() {
        let error = RecipeError::UnknownSortKey("rating".to_string());
        assert!(error.to_string().contains("'rating'"));
    }

    #[test]
    fn test_error_source_none() {
        let error = RecipeError::MissingField("description");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_debug() {
        let error = RecipeError::UnknownTag("x".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("UnknownTag"));
    }
}

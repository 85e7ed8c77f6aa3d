//! Parse LLM output into a classification result

use crate::error::ClassifierError;
use crate::types::ClassificationCandidate;
use librarian_domain::ClassificationResult;
use serde_json::Value;

/// Parse an LLM response into a validated classification
///
/// Accepts a bare JSON object or one wrapped in a markdown code block.
/// Text that is not JSON is a [`ClassifierError::JsonParse`]; JSON of the
/// wrong shape (arrays, missing or extra fields, unknown categories, unsafe
/// names) is a [`ClassifierError::InvalidFormat`].
pub fn parse_llm_response(response: &str) -> Result<ClassificationResult, ClassifierError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    if !json.is_object() {
        return Err(ClassifierError::InvalidFormat(
            "Expected JSON object".to_string(),
        ));
    }

    let candidate: ClassificationCandidate = serde_json::from_value(json)
        .map_err(|e| ClassifierError::InvalidFormat(e.to_string()))?;

    candidate.validate().map_err(ClassifierError::InvalidFormat)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ClassifierError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ClassifierError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence and, if present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use librarian_domain::DocumentCategory;

    const VALID: &str = r#"{
        "docType": "paper",
        "description": "This paper by John Doe and Jane Smith (2021) revisits neural language models.",
        "newFileName": "2021_doe_smith_revisiting_nplms.pdf",
        "pathToFile": "./paper/"
    }"#;

    #[test]
    fn test_parse_valid_json() {
        let result = parse_llm_response(VALID).unwrap();
        assert_eq!(result.category, DocumentCategory::Paper);
        assert_eq!(result.proposed_name(), "2021_doe_smith_revisiting_nplms.pdf");
        assert!(result.description.contains("John Doe"));
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = format!("```json\n{}\n```", VALID);
        assert!(parse_llm_response(&response).is_ok());
    }

    #[test]
    fn test_parse_unterminated_code_block() {
        let response = format!("```\n{}", VALID);
        assert!(parse_llm_response(&response).is_ok());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_llm_response("This is not JSON");
        assert!(matches!(result, Err(ClassifierError::JsonParse(_))));
    }

    #[test]
    fn test_parse_json_not_object() {
        let response = format!("[{}]", VALID);
        let result = parse_llm_response(&response);
        assert!(matches!(result, Err(ClassifierError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_missing_field() {
        let response = r#"{"docType": "paper", "description": "x", "newFileName": "a.pdf"}"#;
        let err = parse_llm_response(response).unwrap_err();
        assert!(err.to_string().contains("pathToFile"));
    }

    #[test]
    fn test_parse_extra_field_rejected() {
        let response = r#"{"docType": "paper", "description": "x", "newFileName": "a.pdf",
            "pathToFile": "./paper/", "confidence": 0.9}"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ClassifierError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_wrong_field_type() {
        let response = r#"{"docType": 3, "description": "x", "newFileName": "a.pdf", "pathToFile": "./paper/"}"#;
        assert!(parse_llm_response(response).is_err());
    }

    #[test]
    fn test_parse_category_not_coerced() {
        let response = r#"{"docType": "Research Paper", "description": "x", "newFileName": "a.pdf", "pathToFile": "./paper/"}"#;
        let err = parse_llm_response(response).unwrap_err();
        assert!(err.to_string().contains("Research Paper"));
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_empty_fence() {
        assert!(extract_json("```").is_err());
    }
}

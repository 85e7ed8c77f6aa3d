//! Integration tests for the Classifier

#[cfg(test)]
mod tests {
    use crate::{Classifier, ClassifierConfig, ClassifierError};
    use librarian_domain::DocumentCategory;
    use librarian_llm::MockProvider;
    use std::time::Duration;

    const PAPER: &str = r#"{
        "docType": "paper",
        "description": "This paper by John Doe (2021) studies example selection.",
        "newFileName": "2021_doe_example.pdf",
        "pathToFile": "./paper/"
    }"#;

    const TEXTBOOK: &str = r#"{
        "docType": "textbook",
        "description": "'Grokking Deep Learning' by Andrew Trask (2019) teaches neural networks from scratch.",
        "newFileName": "2019_trask_grokking_deep_learning.pdf",
        "pathToFile": "./textbook/"
    }"#;

    #[tokio::test]
    async fn test_full_classification_flow() {
        let classifier = Classifier::new(MockProvider::new(PAPER), ClassifierConfig::default());

        let result = classifier
            .classify("Abstract: we study example selection ...")
            .await
            .unwrap();

        assert_eq!(result.category, DocumentCategory::Paper);
        assert_eq!(result.destination_path(), "./paper/2021_doe_example.pdf");
        assert!(result.description.contains("2021"));
    }

    #[tokio::test]
    async fn test_classification_routed_by_content() {
        let mut llm = MockProvider::new(PAPER);
        llm.respond_when_contains("Preface", TEXTBOOK);
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let book = classifier.classify("Preface. This book teaches").await.unwrap();
        let paper = classifier.classify("Abstract. We propose").await.unwrap();

        assert_eq!(book.category, DocumentCategory::Textbook);
        assert_eq!(paper.category, DocumentCategory::Paper);
    }

    #[tokio::test]
    async fn test_classification_with_code_fence() {
        let response = format!("```json\n{}\n```", PAPER);
        let classifier = Classifier::new(MockProvider::new(response), ClassifierConfig::default());
        assert!(classifier.classify("text").await.is_ok());
    }

    #[tokio::test]
    async fn test_classification_with_invalid_json() {
        let classifier = Classifier::new(
            MockProvider::new("This is not JSON"),
            ClassifierConfig::default(),
        );

        let result = classifier.classify("text").await;
        assert!(matches!(result, Err(ClassifierError::JsonParse(_))));
    }

    #[tokio::test]
    async fn test_classification_with_mismatched_directory() {
        let response = PAPER.replace("./paper/", "./textbook/");
        let classifier = Classifier::new(MockProvider::new(response), ClassifierConfig::default());

        let result = classifier.classify("text").await;
        assert!(matches!(result, Err(ClassifierError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_classification_with_path_traversal_name() {
        let response = PAPER.replace("2021_doe_example.pdf", "../../etc/passwd");
        let classifier = Classifier::new(MockProvider::new(response), ClassifierConfig::default());

        assert!(classifier.classify("text").await.is_err());
    }

    #[tokio::test]
    async fn test_llm_error_propagates() {
        let mut llm = MockProvider::new(PAPER);
        llm.fail_when_contains("broken");
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        let result = classifier.classify("a broken document").await;
        match result {
            Err(ClassifierError::Llm(msg)) => assert!(msg.contains("Mock error")),
            other => panic!("expected LLM error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classification_timeout() {
        let llm = MockProvider::new(PAPER).with_latency(Duration::from_millis(1500));
        let config = ClassifierConfig {
            classification_timeout_secs: 1,
            ..Default::default()
        };
        let classifier = Classifier::new(llm, config);

        let result = classifier.classify("text").await;
        assert!(matches!(result, Err(ClassifierError::Timeout(1))));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = ClassifierConfig {
            classification_timeout_secs: 0,
            ..Default::default()
        };
        let llm = MockProvider::new(PAPER);
        let probe = llm.clone();
        let classifier = Classifier::new(llm, config);

        let result = classifier.classify("text").await;
        assert!(matches!(result, Err(ClassifierError::Config(_))));
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_long_text_is_truncated() {
        let llm = MockProvider::new(PAPER);
        let probe = llm.clone();
        let config = ClassifierConfig {
            max_text_length: 100,
            ..Default::default()
        };
        let classifier = Classifier::new(llm, config);

        let text = format!("{}{}", "a".repeat(100), "TAIL_MARKER");
        classifier.classify(&text).await.unwrap();

        let prompt = probe.last_prompt().unwrap();
        assert!(prompt.contains(&"a".repeat(100)));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_one_call_per_classification() {
        let llm = MockProvider::new(PAPER);
        let probe = llm.clone();
        let classifier = Classifier::new(llm, ClassifierConfig::default());

        for _ in 0..3 {
            classifier.classify("text").await.unwrap();
        }
        assert_eq!(probe.call_count(), 3);
    }
}

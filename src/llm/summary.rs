//! Contract summary requests.

use std::sync::Arc;

use tracing::{debug, info};

use super::client::{
    ChatMessage, ChatRequest, LlmConfig, LlmError, TextGenerator, CONTRACT_SUMMARY_PROMPT,
    TEXT_SLOT,
};

/// The contract template with document text in its slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt(String);

impl SummaryPrompt {
    pub fn new(text: &str) -> Self {
        Self(CONTRACT_SUMMARY_PROMPT.replacen(TEXT_SLOT, text, 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> ChatMessage {
        ChatMessage::user(self.0)
    }
}

/// Builds summary requests and sends them to a text generator.
#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    model: String,
    max_tokens: u32,
}

impl Summarizer {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &LlmConfig) -> Self {
        Self {
            generator,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// A single-message request carrying the filled-in template.
    pub fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![SummaryPrompt::new(text).into_message()],
            max_tokens: self.max_tokens,
        }
    }

    /// Summarize extracted document text, returning the first choice trimmed.
    pub async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        let request = self.build_request(text);
        info!(
            "Requesting summary from {} ({} chars of document text)",
            self.model,
            text.len()
        );

        let response = self.generator.complete(&request).await?;
        let summary = response
            .first_content()
            .ok_or(LlmError::EmptyResponse)?
            .trim()
            .to_string();

        debug!("Summary received: {} chars", summary.len());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::{ChatChoice, ChatResponse, ChoiceMessage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generator that records requests and replies with a fixed outcome.
    struct FakeGenerator {
        reply: Option<Vec<&'static str>>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl FakeGenerator {
        fn replying(choices: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(choices),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(choices) => Ok(ChatResponse {
                    choices: choices
                        .iter()
                        .map(|c| ChatChoice {
                            message: ChoiceMessage {
                                content: Some(c.to_string()),
                            },
                        })
                        .collect(),
                }),
                None => Err(LlmError::Api("HTTP 429: quota exceeded".to_string())),
            }
        }
    }

    #[test]
    fn test_prompt_has_text_in_slot() {
        let prompt = SummaryPrompt::new("Party A and Party B agree...");
        assert!(prompt.as_str().contains("    Text:\n    Party A and Party B agree...\n    "));
        assert!(!prompt.as_str().contains(TEXT_SLOT));
        assert!(prompt.as_str().starts_with("\n    Objective:"));
    }

    #[test]
    fn test_prompt_text_is_not_reinterpreted() {
        let prompt = SummaryPrompt::new("clause {text} [[parties]]");
        assert!(prompt.as_str().ends_with("clause {text} [[parties]]\n    "));
    }

    #[test]
    fn test_template_sections() {
        for label in [
            "<strong>Purpose:</strong>",
            "<strong>Confidentiality:</strong>",
            "<strong>Term Date:</strong>",
            "<strong>Termination Conditions:</strong>",
            "<strong>Representation:</strong>",
            "<strong>Guarantees and Warranties:</strong>",
            "<strong>Ownership:</strong>",
            "<strong>Definitions:</strong>",
            "<strong>Use and Care:</strong>",
            "<strong>Disclosure Obligations:</strong>",
            "<strong>Non-Solicitation:</strong>",
            "<strong>Securities Compliance:</strong>",
            "<strong>Amendment Summary:</strong>",
            "<strong>Governing Law:</strong>",
            "<strong>Notices and Execution:</strong>",
        ] {
            assert!(CONTRACT_SUMMARY_PROMPT.contains(label), "missing {}", label);
        }
        assert_eq!(CONTRACT_SUMMARY_PROMPT.matches(TEXT_SLOT).count(), 1);
    }

    #[test]
    fn test_build_request_shape() {
        let summarizer = Summarizer::new(FakeGenerator::replying(vec![]), &LlmConfig::default());
        let request = summarizer.build_request("body");

        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.max_tokens, 1500);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, SummaryPrompt::new("body").as_str());
    }

    #[tokio::test]
    async fn test_summarize_trims_first_choice() {
        let generator = FakeGenerator::replying(vec!["\n  <strong>This is an NDA</strong>\n\n", "other"]);
        let summarizer = Summarizer::new(generator.clone(), &LlmConfig::default());

        let summary = summarizer.summarize("contract text").await.unwrap();
        assert_eq!(summary, "<strong>This is an NDA</strong>");
        assert_eq!(generator.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_choices_is_an_error() {
        let summarizer = Summarizer::new(FakeGenerator::replying(vec![]), &LlmConfig::default());
        let err = summarizer.summarize("text").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_service_error_not_retried() {
        let generator = FakeGenerator::failing();
        let summarizer = Summarizer::new(generator.clone(), &LlmConfig::default());

        let err = summarizer.summarize("text").await.unwrap_err();
        assert!(matches!(err, LlmError::Api(_)));
        assert_eq!(generator.seen.lock().unwrap().len(), 1);
    }
}

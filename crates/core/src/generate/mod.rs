pub mod fallback;
pub mod llm;
pub mod response;

use std::sync::Arc;

use tracing::{info, warn};

use crate::{config::QuizgenConfig, error::GenerationError, types::QuizDraft};

pub use fallback::{Analysis, Category, QuestionStyle, analyze_transcript, generate_fallback};
pub use llm::{ChatCompletionsClient, LlmClient, build_quiz_prompt};
pub use response::{extract_json_object, parse_quiz_response};

/// Produces a quiz from a transcript, with the LLM when configured and the
/// heuristic generator otherwise. `generate` never fails.
pub struct QuestionGenerator {
    llm: Option<Arc<dyn LlmClient>>,
}

impl QuestionGenerator {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    pub fn fallback_only() -> Self {
        Self { llm: None }
    }

    /// LLM client only when a real credential is available.
    pub fn from_config(config: &QuizgenConfig) -> Self {
        let llm = config.credential().map(|api_key| {
            Arc::new(ChatCompletionsClient::new(config.provider, api_key)) as Arc<dyn LlmClient>
        });
        Self { llm }
    }

    pub fn uses_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn generate(&self, video_title: &str, transcript: &str) -> QuizDraft {
        let Some(llm) = &self.llm else {
            info!("no LLM credential configured, using heuristic quiz generation");
            return generate_fallback(video_title, transcript);
        };

        match generate_with_llm(llm.as_ref(), video_title, transcript).await {
            Ok(quiz) => {
                info!(questions = quiz.questions.len(), "quiz generated by LLM");
                quiz
            }
            Err(e) => {
                warn!(error = %e, "LLM quiz generation failed, using heuristic fallback");
                generate_fallback(video_title, transcript)
            }
        }
    }
}

async fn generate_with_llm(
    llm: &dyn LlmClient,
    video_title: &str,
    transcript: &str,
) -> Result<QuizDraft, GenerationError> {
    let prompt = build_quiz_prompt(video_title, transcript);
    let response_text = llm.complete(&prompt).await?;
    parse_quiz_response(&response_text, video_title)
}

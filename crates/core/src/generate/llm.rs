use async_trait::async_trait;
use tracing::debug;

use crate::{error::GenerationError, provider::Provider};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// OpenAI-compatible `/chat/completions` client.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
}

impl ChatCompletionsClient {
    pub fn new(provider: Provider, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let config = self.provider.config();

        debug!(provider = self.provider.name(), model = config.model, "requesting quiz");

        let response = self
            .client
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": config.model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "temperature": 0.3,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GenerationError::InvalidApiResponse(response.clone()))?;

        Ok(content.trim().to_string())
    }
}

pub fn build_quiz_prompt(video_title: &str, transcript: &str) -> String {
    format!(
        r#"
Create a quiz with 10 questions based on the following video transcript.

VIDEO TITLE: {title}

TRANSCRIPT:
{transcript}

TASK:
Create 10 diverse and challenging questions that directly relate to the video content. The questions should:

1. Be specific to the video content
2. Have different difficulty levels (easy to hard)
3. Use different question types (facts, comprehension, analysis)
4. Be interesting and educational

FORMAT:
Respond ONLY with a valid JSON object in the following structure:
{{
    "title": "Quiz: {title}",
    "description": "A challenging quiz based on the video '{title}'",
    "questions": [
        {{
            "question_title": "Here is the question",
            "question_options": [
                "Answer A",
                "Answer B",
                "Answer C",
                "Answer D"
            ],
            "answer": "The correct answer"
        }}
    ]
}}

IMPORTANT:
- Create exactly 10 questions
- Each question must have 4 distinct answer options
- The answer must repeat one of the options word for word
- Use only information from the transcript
- Respond ONLY with the JSON, no additional explanations
"#,
        title = video_title,
        transcript = transcript
    )
}

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{error::PersistError, types::QuizDraft};

/// Quiz as stored rows: one record per question and per option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub questions: Vec<QuestionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question_title: String,
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub option_text: String,
    pub is_correct: bool,
}

impl QuizRecord {
    /// `is_correct` is exact string equality with the draft's answer.
    pub fn from_draft(draft: &QuizDraft, video_url: &str) -> Self {
        let questions = draft
            .questions
            .iter()
            .map(|question| QuestionRecord {
                question_title: question.question_title.clone(),
                options: question
                    .question_options
                    .iter()
                    .map(|option| OptionRecord {
                        option_text: option.clone(),
                        is_correct: *option == question.answer,
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            video_url: video_url.to_string(),
            questions,
        }
    }
}

/// Save a quiz to a file
pub async fn save_quiz(quiz: &QuizDraft, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(quiz)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

/// Load a quiz from a cached file
pub async fn load_quiz(path: &Path) -> Result<QuizDraft, PersistError> {
    let json_content = fs::read_to_string(path).await?;
    let quiz: QuizDraft = serde_json::from_str(&json_content)?;
    Ok(quiz)
}

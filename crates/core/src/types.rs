use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Downloaded media ready for transcription.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub size: u64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_title: String,
    pub question_options: Vec<String>,
    pub answer: String,
}

impl QuizDraft {
    pub const QUESTION_COUNT: usize = 10;

    pub fn default_title(video_title: &str) -> String {
        format!("Quiz: {}", video_title)
    }

    pub fn default_description(video_title: &str) -> String {
        format!("An intelligent quiz based on the video \"{}\"", video_title)
    }
}

impl QuestionDraft {
    pub const OPTION_COUNT: usize = 4;

    /// Exactly four pairwise distinct options, one of which is the answer.
    pub fn is_well_formed(&self) -> bool {
        let options = &self.question_options;
        options.len() == Self::OPTION_COUNT
            && options
                .iter()
                .enumerate()
                .all(|(i, option)| !options[..i].contains(option))
            && options.iter().filter(|o| **o == self.answer).count() == 1
    }
}

use std::collections::BTreeMap;

use crate::{error::SessionError, types::QuizDraft};

/// Progress of one person working through a quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: QuizDraft,
    current_question_index: usize,
    answers: BTreeMap<usize, String>,
    completed: bool,
}

impl QuizSession {
    pub fn new(quiz: QuizDraft) -> Self {
        let completed = quiz.questions.is_empty();
        Self {
            quiz,
            current_question_index: 0,
            answers: BTreeMap::new(),
            completed,
        }
    }

    pub fn quiz(&self) -> &QuizDraft {
        &self.quiz
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    /// Record (or overwrite) the answer to `index`.
    pub fn submit_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        if self.completed {
            return Err(SessionError::Completed);
        }
        let question = self
            .quiz
            .questions
            .get(index)
            .ok_or(SessionError::NoSuchQuestion {
                index,
                total: self.total_questions(),
            })?;
        if !question.question_options.iter().any(|o| o == option) {
            return Err(SessionError::UnknownOption {
                index,
                option: option.to_string(),
            });
        }

        self.answers.insert(index, option.to_string());
        Ok(())
    }

    /// Move to the next question, completing the session after the last one.
    pub fn advance(&mut self) {
        if self.completed {
            return;
        }
        if self.current_question_index + 1 < self.total_questions() {
            self.current_question_index += 1;
        } else {
            self.completed = true;
        }
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn score(&self) -> usize {
        self.answers
            .iter()
            .filter(|(index, option)| {
                self.quiz
                    .questions
                    .get(**index)
                    .is_some_and(|q| q.answer == **option)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionDraft;

    fn quiz(questions: usize) -> QuizDraft {
        QuizDraft {
            title: "Quiz: Test".to_string(),
            description: String::new(),
            questions: (0..questions)
                .map(|i| QuestionDraft {
                    question_title: format!("Q{}", i),
                    question_options: vec![
                        "right".to_string(),
                        "wrong a".to_string(),
                        "wrong b".to_string(),
                        "wrong c".to_string(),
                    ],
                    answer: "right".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn advancing_past_last_question_completes() {
        let mut session = QuizSession::new(quiz(2));
        session.advance();
        assert_eq!(session.current_question_index(), 1);
        assert!(!session.is_completed());
        session.advance();
        assert!(session.is_completed());
        assert_eq!(session.current_question_index(), 1);
    }

    #[test]
    fn reanswering_overwrites_and_scores_latest() {
        let mut session = QuizSession::new(quiz(2));
        session.submit_answer(0, "wrong a").unwrap();
        session.submit_answer(0, "right").unwrap();
        session.submit_answer(1, "wrong b").unwrap();
        assert_eq!(session.answer_for(0), Some("right"));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn unknown_option_and_question_are_rejected() {
        let mut session = QuizSession::new(quiz(1));
        assert_eq!(
            session.submit_answer(0, "Right"),
            Err(SessionError::UnknownOption {
                index: 0,
                option: "Right".to_string()
            })
        );
        assert_eq!(
            session.submit_answer(3, "right"),
            Err(SessionError::NoSuchQuestion { index: 3, total: 1 })
        );
    }

    #[test]
    fn completed_session_refuses_answers() {
        let mut session = QuizSession::new(quiz(1));
        session.advance();
        assert_eq!(session.submit_answer(0, "right"), Err(SessionError::Completed));
    }
}

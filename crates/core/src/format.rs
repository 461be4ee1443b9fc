use crate::types::QuizDraft;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Format a quiz as human-readable markdown, marking correct options
pub fn format_quiz_readable(quiz: &QuizDraft) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", quiz.title));
    output.push_str(&quiz.description);
    output.push_str("\n\n");

    for (i, question) in quiz.questions.iter().enumerate() {
        output.push_str(&format!("## {}. {}\n\n", i + 1, question.question_title));
        for (label, option) in OPTION_LABELS.iter().zip(&question.question_options) {
            let marker = if *option == question.answer { "✓" } else { " " };
            output.push_str(&format!("{} {}) {}\n", marker, label, option));
        }
        output.push('\n');
    }

    output
}

/// Option label for the `index`-th option (`A`..`D`).
pub fn option_label(index: usize) -> Option<char> {
    OPTION_LABELS.get(index).copied()
}

/// Parse a user-typed label (`a`, `B`, `3`) back into an option index.
pub fn parse_option_label(input: &str) -> Option<usize> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return (1..=OPTION_LABELS.len()).contains(&n).then(|| n - 1);
    }
    let mut chars = input.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    OPTION_LABELS.iter().position(|l| *l == c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionDraft;

    #[test]
    fn marks_only_the_correct_option() {
        let quiz = QuizDraft {
            title: "Quiz: Rust".to_string(),
            description: "About Rust".to_string(),
            questions: vec![QuestionDraft {
                question_title: "Who owns the value?".to_string(),
                question_options: vec![
                    "The binding".to_string(),
                    "The heap".to_string(),
                    "The stack".to_string(),
                    "Nobody".to_string(),
                ],
                answer: "The binding".to_string(),
            }],
        };

        let text = format_quiz_readable(&quiz);
        assert!(text.contains("## 1. Who owns the value?"));
        assert!(text.contains("✓ A) The binding"));
        assert!(text.contains("  B) The heap"));
    }

    #[test]
    fn labels_parse_from_letters_and_numbers() {
        assert_eq!(parse_option_label("b"), Some(1));
        assert_eq!(parse_option_label(" D "), Some(3));
        assert_eq!(parse_option_label("1"), Some(0));
        assert_eq!(parse_option_label("5"), None);
        assert_eq!(parse_option_label("ab"), None);
        assert_eq!(option_label(2), Some('C'));
    }
}

use serde_json::Value;

use crate::{
    error::GenerationError,
    types::{QuestionDraft, QuizDraft},
};

/// Slice from the first `{` to the last `}` of a free-form model reply.
pub fn extract_json_object(response_text: &str) -> Option<&str> {
    let start = response_text.find('{')?;
    let end = response_text.rfind('}')?;
    (end > start).then(|| &response_text[start..=end])
}

/// Parse and validate a model reply into a draft.
pub fn parse_quiz_response(
    response_text: &str,
    video_title: &str,
) -> Result<QuizDraft, GenerationError> {
    let json = extract_json_object(response_text).ok_or(GenerationError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)?;
    validate_quiz_value(&value, video_title)
}

pub fn validate_quiz_value(value: &Value, video_title: &str) -> Result<QuizDraft, GenerationError> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid("top level is not an object"))?;
    let questions = object
        .get("questions")
        .ok_or_else(|| invalid("missing \"questions\""))?
        .as_array()
        .ok_or_else(|| invalid("\"questions\" is not a list"))?;

    if questions.len() != QuizDraft::QUESTION_COUNT {
        return Err(invalid(format!(
            "expected {} questions, got {}",
            QuizDraft::QUESTION_COUNT,
            questions.len()
        )));
    }

    let questions = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            validate_question(q)
                .map_err(|reason| invalid(format!("question {}: {}", i + 1, reason)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let title = string_field(object.get("title"))
        .unwrap_or_else(|| QuizDraft::default_title(video_title));
    let description = string_field(object.get("description"))
        .unwrap_or_else(|| QuizDraft::default_description(video_title));

    Ok(QuizDraft {
        title,
        description,
        questions,
    })
}

fn validate_question(value: &Value) -> Result<QuestionDraft, String> {
    let object = value.as_object().ok_or("not an object")?;

    let question_title = object
        .get("question_title")
        .ok_or("missing \"question_title\"")?
        .as_str()
        .ok_or("\"question_title\" is not a string")?;
    let options = object
        .get("question_options")
        .ok_or("missing \"question_options\"")?
        .as_array()
        .ok_or("\"question_options\" is not a list")?;
    let answer = object
        .get("answer")
        .ok_or("missing \"answer\"")?
        .as_str()
        .ok_or("\"answer\" is not a string")?;

    if options.len() != QuestionDraft::OPTION_COUNT {
        return Err(format!(
            "expected {} options, got {}",
            QuestionDraft::OPTION_COUNT,
            options.len()
        ));
    }

    let question_options = options
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or("an option is not a string")?;

    let question = QuestionDraft {
        question_title: question_title.to_string(),
        question_options,
        answer: answer.to_string(),
    };

    if !question.is_well_formed() {
        return Err("options repeat or the answer is not one of them".to_string());
    }

    Ok(question)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn invalid(reason: impl Into<String>) -> GenerationError {
    GenerationError::InvalidQuiz {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose_and_fences() {
        let reply = "Sure! Here it is:\n```json\n{\"a\": {\"b\": 1}}\n```\nEnjoy.";
        assert_eq!(extract_json_object(reply), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn no_braces_means_no_object() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        let value = serde_json::json!([1, 2, 3]);
        assert!(validate_quiz_value(&value, "t").is_err());
    }

    #[test]
    fn missing_questions_key_is_rejected() {
        let value = serde_json::json!({"title": "x"});
        assert!(matches!(
            validate_quiz_value(&value, "t"),
            Err(GenerationError::InvalidQuiz { .. })
        ));
    }
}

use quizgen_core::{QuestionDraft, QuizDraft, QuizRecord, load_quiz, save_quiz};

fn draft() -> QuizDraft {
    QuizDraft {
        title: "Quiz: Photosynthese".to_string(),
        description: "An intelligent quiz based on the video \"Photosynthese\"".to_string(),
        questions: vec![QuestionDraft {
            question_title: "Was braucht eine Pflanze?".to_string(),
            question_options: vec![
                "Licht".to_string(),
                "licht".to_string(),
                "Licht ".to_string(),
                "Dunkelheit".to_string(),
            ],
            answer: "Licht".to_string(),
        }],
    }
}

#[test]
fn given_draft_when_mapping_to_records_then_only_exact_answer_match_is_correct() {
    let record = QuizRecord::from_draft(&draft(), "https://youtu.be/abc");

    assert_eq!(record.video_url, "https://youtu.be/abc");
    assert_eq!(record.title, "Quiz: Photosynthese");
    let options = &record.questions[0].options;
    assert_eq!(options.len(), 4);
    let correct: Vec<_> = options
        .iter()
        .filter(|o| o.is_correct)
        .map(|o| o.option_text.as_str())
        .collect();
    assert_eq!(correct, vec!["Licht"]);
}

#[tokio::test]
async fn given_saved_quiz_when_loading_then_it_matches_and_parent_dirs_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache").join("quiz.json");

    save_quiz(&draft(), &path).await.unwrap();
    let loaded = load_quiz(&path).await.unwrap();

    assert_eq!(loaded, draft());
}

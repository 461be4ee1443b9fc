use quizgen_core::generate::fallback::{
    Analysis, Category, QuestionStyle, analyze_transcript, answer_preview, classify_sentence,
    generate_fallback,
};
use quizgen_core::QuizDraft;

const RICH_TRANSCRIPT: &str = "Das zentrale Thema ist die Energiegewinnung der Pflanzen. \
Ein wichtiger Punkt betrifft das Chlorophyll in den Blättern. \
Der Sprecher sagt, dass Licht der entscheidende Faktor ist. \
Die Forscherin glaubt an eine effizientere Nutzung der Energie. \
Zum Beispiel nutzen Algen ebenfalls das Sonnenlicht. \
Ein weiteres Beispiel sind Kakteen in der Wüste. \
Das Fazit lautet: ohne Licht kein Leben auf der Erde. \
Deshalb sollten wir die Wälder schützen und pflegen. \
Im Vergleich zu Tieren brauchen Pflanzen kein Futter. \
Schattenpflanzen benötigen weniger Licht als Sonnenpflanzen.";

fn assert_invariants(quiz: &QuizDraft) {
    assert_eq!(quiz.questions.len(), 10);
    for q in &quiz.questions {
        assert_eq!(q.question_options.len(), 4);
        assert!(q.is_well_formed(), "malformed question: {:?}", q);
        assert!(q.question_options.contains(&q.answer));
    }
}

#[test]
fn given_short_german_transcript_when_analyzing_then_sentences_land_in_topic_and_example() {
    let transcript =
        "Der Kern des Videos ist Photosynthese. Ein Beispiel dafür ist die Lichtreaktion.";

    let analysis = analyze_transcript(transcript);

    assert_eq!(analysis.main_topics, vec!["Der Kern des Videos ist Photosynthese"]);
    assert_eq!(
        analysis.examples,
        vec!["Ein Beispiel dafür ist die Lichtreaktion."]
    );
    assert!(analysis.key_arguments.is_empty());
    assert!(analysis.statistics.is_empty());
    assert!(analysis.comparisons.is_empty());
    assert!(analysis.conclusions.is_empty());
}

#[test]
fn given_short_german_transcript_when_generating_then_comprehension_answer_previews_topic() {
    let transcript =
        "Der Kern des Videos ist Photosynthese. Ein Beispiel dafür ist die Lichtreaktion.";

    let quiz = generate_fallback("Photosynthese", transcript);

    assert_invariants(&quiz);
    assert_eq!(quiz.title, "Quiz: Photosynthese");
    let comprehension = &quiz.questions[0];
    assert_eq!(
        comprehension.question_title,
        "What is said about the main topic in this video?"
    );
    assert_eq!(
        comprehension.answer,
        answer_preview("Der Kern des Videos ist Photosynthese")
    );
    assert_eq!(comprehension.answer, "Der Kern des Videos ist Photosynthese");
    assert_eq!(
        quiz.questions[1].question_title,
        "What concrete example is mentioned in this video?"
    );
}

#[test]
fn given_empty_transcript_when_generating_then_quiz_is_still_complete() {
    let quiz = generate_fallback("Leeres Video", "");

    assert_invariants(&quiz);
    assert_eq!(quiz.description, QuizDraft::default_description("Leeres Video"));
}

#[test]
fn given_whitespace_and_empty_title_when_generating_then_quiz_is_still_complete() {
    assert_invariants(&generate_fallback("", "   \n\t  "));
}

#[test]
fn given_rich_transcript_when_generating_then_all_questions_come_from_transcript() {
    let analysis = analyze_transcript(RICH_TRANSCRIPT);
    assert_eq!(analysis.main_topics.len(), 2);
    assert_eq!(analysis.key_arguments.len(), 2);
    assert_eq!(analysis.examples.len(), 2);
    assert_eq!(analysis.conclusions.len(), 2);
    assert_eq!(analysis.comparisons.len(), 2);

    let quiz = generate_fallback("Photosynthese", RICH_TRANSCRIPT);

    assert_invariants(&quiz);
    for (i, question) in quiz.questions.iter().enumerate() {
        let style = QuestionStyle::ROTATION[i % 5];
        let sentence = &analysis.bucket(style.source())[i / 5];
        assert_eq!(question.answer, answer_preview(sentence));
    }
    assert_ne!(quiz.questions[0].answer, quiz.questions[5].answer);
    assert_ne!(
        quiz.questions[0].question_title,
        quiz.questions[5].question_title
    );
}

#[test]
fn given_long_sentence_when_previewing_then_eight_words_and_ellipsis() {
    let quiz = generate_fallback(
        "Video",
        "Das zentrale Thema dieses Videos ist die Frage nach der Energie im Alltag",
    );

    assert_eq!(
        quiz.questions[0].answer,
        "Das zentrale Thema dieses Videos ist die Frage..."
    );
}

#[test]
fn given_sentences_of_twenty_chars_or_less_when_analyzing_then_they_are_dropped() {
    let analysis = analyze_transcript("Kern ist kurz. Ein Beispiel, kurz");
    assert_eq!(analysis, Analysis::default());
}

#[test]
fn given_overlapping_keywords_when_classifying_then_priority_order_decides() {
    // "behauptet" contains "haupt", so the topic bucket wins over arguments
    assert_eq!(
        classify_sentence("Der Sprecher behauptet etwas Neues"),
        Some(Category::MainTopic)
    );
    assert_eq!(
        classify_sentence("Sie meint, es sind 30 jahre vergangen"),
        Some(Category::KeyArgument)
    );
    assert_eq!(
        classify_sentence("Es dauerte 30% länger, mehr als gedacht"),
        Some(Category::Statistic)
    );
    assert_eq!(
        classify_sentence("Weniger ist deshalb oft mehr"),
        Some(Category::Comparison)
    );
    assert_eq!(
        classify_sentence("Deshalb zum Beispiel das Ergebnis"),
        Some(Category::Conclusion)
    );
    assert_eq!(classify_sentence("Nichts davon passt hier rein"), None);
}

//! Credential-free quiz synthesis.
//!
//! Sentences of the transcript are sorted into keyword buckets, then five
//! question styles take turns turning bucket sentences into questions. Gaps are
//! filled with generic questions about the video, so this path always yields a
//! complete quiz, even for an empty transcript.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{QuestionDraft, QuizDraft};

const MIN_SENTENCE_CHARS: usize = 20;
const PREVIEW_WORDS: usize = 8;

const MAIN_TOPIC_KEYWORDS: &[&str] = &["haupt", "wichtig", "zentral", "kern"];
const ARGUMENT_KEYWORDS: &[&str] = &["argument", "behaupt", "sagt", "meint", "glaubt"];
const COMPARISON_KEYWORDS: &[&str] = &[
    "vergleich",
    "anders",
    "ähnlich",
    "mehr",
    "weniger",
    "besser",
    "schlechter",
];
const CONCLUSION_KEYWORDS: &[&str] = &[
    "schluss",
    "folgerung",
    "fazit",
    "zusammenfassung",
    "daher",
    "deshalb",
];
const EXAMPLE_KEYWORDS: &[&str] = &["beispiel", "etwa", "zum beispiel", "wie"];

static STATISTIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?(?:%|prozent|jahre?|monate?|tage?)")
        .expect("statistics pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MainTopic,
    KeyArgument,
    Statistic,
    Comparison,
    Conclusion,
    Example,
}

/// Transcript sentences grouped by what they seem to express.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub main_topics: Vec<String>,
    pub key_arguments: Vec<String>,
    pub statistics: Vec<String>,
    pub comparisons: Vec<String>,
    pub conclusions: Vec<String>,
    pub examples: Vec<String>,
}

impl Analysis {
    pub fn bucket(&self, category: Category) -> &[String] {
        match category {
            Category::MainTopic => &self.main_topics,
            Category::KeyArgument => &self.key_arguments,
            Category::Statistic => &self.statistics,
            Category::Comparison => &self.comparisons,
            Category::Conclusion => &self.conclusions,
            Category::Example => &self.examples,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::MainTopic => &mut self.main_topics,
            Category::KeyArgument => &mut self.key_arguments,
            Category::Statistic => &mut self.statistics,
            Category::Comparison => &mut self.comparisons,
            Category::Conclusion => &mut self.conclusions,
            Category::Example => &mut self.examples,
        }
    }
}

/// First matching category wins, checked in a fixed priority order.
pub fn classify_sentence(sentence: &str) -> Option<Category> {
    let lower = sentence.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if mentions(MAIN_TOPIC_KEYWORDS) {
        Some(Category::MainTopic)
    } else if mentions(ARGUMENT_KEYWORDS) {
        Some(Category::KeyArgument)
    } else if STATISTIC_PATTERN.is_match(&lower) {
        Some(Category::Statistic)
    } else if mentions(COMPARISON_KEYWORDS) {
        Some(Category::Comparison)
    } else if mentions(CONCLUSION_KEYWORDS) {
        Some(Category::Conclusion)
    } else if mentions(EXAMPLE_KEYWORDS) {
        Some(Category::Example)
    } else {
        None
    }
}

pub fn analyze_transcript(transcript: &str) -> Analysis {
    let mut analysis = Analysis::default();

    for sentence in transcript.split(". ") {
        let sentence = sentence.trim();
        if sentence.chars().count() <= MIN_SENTENCE_CHARS {
            continue;
        }
        if let Some(category) = classify_sentence(sentence) {
            analysis.bucket_mut(category).push(sentence.to_string());
        }
    }

    analysis
}

/// First eight words followed by `...`, or the whole sentence if it is shorter.
pub fn answer_preview(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(PREVIEW_WORDS).collect();
    if words.len() == PREVIEW_WORDS {
        format!("{}...", words.join(" "))
    } else {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStyle {
    Comprehension,
    Analysis,
    Application,
    Evaluation,
    Synthesis,
}

impl QuestionStyle {
    pub const ROTATION: [QuestionStyle; 5] = [
        QuestionStyle::Comprehension,
        QuestionStyle::Analysis,
        QuestionStyle::Application,
        QuestionStyle::Evaluation,
        QuestionStyle::Synthesis,
    ];

    pub fn source(self) -> Category {
        match self {
            QuestionStyle::Comprehension => Category::MainTopic,
            QuestionStyle::Analysis => Category::KeyArgument,
            QuestionStyle::Application => Category::Example,
            QuestionStyle::Evaluation => Category::Conclusion,
            QuestionStyle::Synthesis => Category::Comparison,
        }
    }

    fn title(self, round: usize) -> &'static str {
        match (self, round) {
            (QuestionStyle::Comprehension, 0) => "What is said about the main topic in this video?",
            (QuestionStyle::Comprehension, _) => "What else is said about the main topic in this video?",
            (QuestionStyle::Analysis, 0) => "What is argued in this video?",
            (QuestionStyle::Analysis, _) => "Which further argument is made in this video?",
            (QuestionStyle::Application, 0) => "What concrete example is mentioned in this video?",
            (QuestionStyle::Application, _) => "Which other example is mentioned in this video?",
            (QuestionStyle::Evaluation, 0) => "What concrete conclusion is drawn in this video?",
            (QuestionStyle::Evaluation, _) => "Which further conclusion is drawn in this video?",
            (QuestionStyle::Synthesis, 0) => "What concrete comparison is made in this video?",
            (QuestionStyle::Synthesis, _) => "Which other comparison is made in this video?",
        }
    }

    fn distractors(self) -> [&'static str; 4] {
        match self {
            QuestionStyle::Comprehension => [
                "Something else is said",
                "The topic is not mentioned",
                "There is no clear main topic",
                "The video does not discuss this",
            ],
            QuestionStyle::Analysis => [
                "A different argument is presented",
                "No argument is presented",
                "The argument is unclear",
                "The video only lists facts",
            ],
            QuestionStyle::Application => [
                "A different example is mentioned",
                "No example is mentioned",
                "The example is unclear",
                "The video stays abstract",
            ],
            QuestionStyle::Evaluation => [
                "A different conclusion is drawn",
                "No conclusion is drawn",
                "The conclusion is unclear",
                "The video ends without a summary",
            ],
            QuestionStyle::Synthesis => [
                "A different comparison is made",
                "No comparison is made",
                "The comparison is unclear",
                "Nothing is compared",
            ],
        }
    }

    /// Question built from the `round`-th sentence of this style's bucket.
    pub fn question(self, analysis: &Analysis, round: usize) -> Option<QuestionDraft> {
        let sentence = analysis.bucket(self.source()).get(round)?;
        let answer = answer_preview(sentence);
        Some(question_with_distractors(
            self.title(round),
            answer,
            &self.distractors(),
        ))
    }
}

fn question_with_distractors(title: &str, answer: String, pool: &[&str]) -> QuestionDraft {
    let mut question_options = Vec::with_capacity(QuestionDraft::OPTION_COUNT);
    question_options.push(answer.clone());
    for distractor in pool {
        if question_options.len() == QuestionDraft::OPTION_COUNT {
            break;
        }
        if !question_options.iter().any(|o| o == distractor) {
            question_options.push(distractor.to_string());
        }
    }

    QuestionDraft {
        question_title: title.to_string(),
        question_options,
        answer,
    }
}

/// (question, answer, distractors) about the video itself, used for padding.
const GENERIC_QUESTIONS: [(&str, &str, [&str; 4]); QuizDraft::QUESTION_COUNT] = [
    (
        "Where does the content of this quiz come from?",
        "From the video's transcript",
        ["From a random website", "From an unrelated book", "It is made up", "From a dictionary"],
    ),
    (
        "What is the best way to prepare for this quiz?",
        "Watching the video attentively",
        ["Skipping the video", "Reading only the title", "Guessing every answer", "Muting the audio"],
    ),
    (
        "What kind of content does this video provide?",
        "Information on its topic",
        ["Only music", "No content at all", "Unrelated advertising", "A blank screen"],
    ),
    (
        "What should you do if a question remains unclear?",
        "Rewatch the relevant part of the video",
        ["Ignore the video", "Pick an answer at random", "Skip the quiz entirely", "Close the app"],
    ),
    (
        "What does a quiz about a video help you with?",
        "Checking what you remember",
        ["Editing the video", "Uploading videos", "Changing the video title", "Nothing at all"],
    ),
    (
        "When is the best moment to take this quiz?",
        "Right after watching the video",
        ["Before the video exists", "Without ever watching it", "Only at midnight", "Never"],
    ),
    (
        "How are the answers in this quiz checked?",
        "Against the content of the video",
        ["By coin flip", "By answer length", "By alphabetical order", "They are never checked"],
    ),
    (
        "What helps most when reviewing the video's topic?",
        "Taking short notes while watching",
        ["Watching at maximum speed", "Reading the comments only", "Looking at the thumbnail", "Turning the video off"],
    ),
    (
        "What is a good way to go deeper into the video's topic?",
        "Looking up the key terms it mentions",
        ["Forgetting the key terms", "Avoiding related sources", "Only reading the title", "Deleting your notes"],
    ),
    (
        "What should you do after finishing this quiz?",
        "Review the questions you missed",
        ["Delete the quiz", "Stop learning the topic", "Ignore your results", "Forget the video"],
    ),
];

fn generic_question(index: usize, video_title: &str) -> QuestionDraft {
    let (title, answer, distractors) = GENERIC_QUESTIONS[index % GENERIC_QUESTIONS.len()];
    let title = if video_title.trim().is_empty() {
        title.to_string()
    } else {
        format!("{} ({})", title, video_title.trim())
    };
    question_with_distractors(&title, answer.to_string(), &distractors)
}

/// Build a full quiz from the transcript alone. Never fails.
pub fn generate_fallback(video_title: &str, transcript: &str) -> QuizDraft {
    let analysis = analyze_transcript(transcript);
    let rotation = QuestionStyle::ROTATION;

    let mut questions: Vec<QuestionDraft> = (0..QuizDraft::QUESTION_COUNT)
        .filter_map(|i| rotation[i % rotation.len()].question(&analysis, i / rotation.len()))
        .collect();

    let derived = questions.len();
    let mut padding = 0;
    while questions.len() < QuizDraft::QUESTION_COUNT {
        questions.push(generic_question(padding, video_title));
        padding += 1;
    }

    debug!(derived, padding, "fallback quiz assembled");

    QuizDraft {
        title: QuizDraft::default_title(video_title),
        description: QuizDraft::default_description(video_title),
        questions,
    }
}

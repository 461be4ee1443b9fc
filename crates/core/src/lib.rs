//! Quizgen Core Library
//!
//! Turns a YouTube video into a multiple-choice quiz: download the audio with
//! yt-dlp, transcribe it with Whisper, and ask an LLM (or a keyword heuristic)
//! for ten questions.

pub mod acquire;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod persist;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod source;
pub mod transcribe;
pub mod types;

// Re-export commonly used items at crate root
pub use acquire::{DownloadStrategy, MediaAcquirer, MediaDownloader, YtDlpDownloader};
pub use cache::{get_cache_dir, get_model_dir, get_quiz_path, get_root_cache_dir};
pub use config::QuizgenConfig;
pub use error::{
    AcquisitionError, DownloadError, GenerationError, PersistError, PipelineError, SessionError,
    TranscriptionError,
};
pub use format::format_quiz_readable;
pub use generate::{LlmClient, QuestionGenerator};
pub use persist::{QuizRecord, load_quiz, save_quiz};
pub use pipeline::QuizPipeline;
pub use provider::{Provider, ProviderConfig};
pub use session::QuizSession;
pub use source::is_supported_video_url;
pub use transcribe::{
    LazyModel, ModelLoader, SpeechRecognizer, Transcriber, WhisperModelLoader, WhisperRecognizer,
};
pub use types::{AudioArtifact, QuestionDraft, QuizDraft, Transcript};

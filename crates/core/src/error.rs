use std::path::PathBuf;
use thiserror::Error;

/// A single download strategy failed.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("failed to launch downloader: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("downloader needs ffmpeg/ffprobe, which is not available: {reason}")]
    MissingDecoder { reason: String },

    #[error("downloader exited with {status}: {reason}")]
    Failed { status: String, reason: String },
}

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("all formats failed for {url} ({attempts} attempted)")]
    AllFormatsFailed { url: String, attempts: usize },

    #[error("IO error while preparing download: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("audio file not found: {0}")]
    MissingFile(PathBuf),

    #[error("audio file is empty: {0}")]
    EmptyFile(PathBuf),

    #[error("audio conversion failed for {audio_path}: {reason}")]
    ConversionFailed { audio_path: PathBuf, reason: String },

    #[error("model download failed for {url}: {reason}")]
    ModelDownloadFailed { url: String, reason: String },

    #[error("failed to load whisper model: {0}")]
    ModelLoadFailed(String),

    #[error("speech recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors on the LLM path of question generation. Never surfaced to callers;
/// the generator degrades to the heuristic fallback instead.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidApiResponse(serde_json::Value),

    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("quiz rejected: {reason}")]
    InvalidQuiz { reason: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("workspace error: {0}")]
    Workspace(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("quiz session is already completed")]
    Completed,

    #[error("question {index} does not exist (quiz has {total})")]
    NoSuchQuestion { index: usize, total: usize },

    #[error("\"{option}\" is not an option of question {index}")]
    UnknownOption { index: usize, option: String },
}

use std::path::PathBuf;

use crate::{cache::get_root_cache_dir, provider::Provider};

pub const DEFAULT_LANGUAGE: &str = "de";
pub const DEFAULT_WHISPER_MODEL: &str = "ggml-tiny.bin";
pub const DEFAULT_SOCKET_TIMEOUT_SECS: u32 = 30;
pub const DEFAULT_RETRIES: u32 = 2;

/// Runtime settings for a quiz pipeline.
///
/// `Default` reads the `QUIZGEN_*` environment variables; the CLI overrides
/// individual fields from its flags.
#[derive(Debug, Clone)]
pub struct QuizgenConfig {
    /// Speech recognition language, fixed rather than auto-detected.
    pub language: String,
    pub whisper_model: String,
    pub use_gpu: bool,
    pub provider: Provider,
    /// Explicit key; when unset the provider's env var is consulted.
    pub api_key: Option<String>,
    pub ffmpeg_location: Option<PathBuf>,
    pub socket_timeout_secs: u32,
    pub retries: u32,
    pub cache_root: PathBuf,
}

impl Default for QuizgenConfig {
    fn default() -> Self {
        Self {
            language: env_or("QUIZGEN_LANGUAGE", DEFAULT_LANGUAGE),
            whisper_model: env_or("QUIZGEN_WHISPER_MODEL", DEFAULT_WHISPER_MODEL),
            use_gpu: std::env::var("QUIZGEN_USE_GPU")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            provider: std::env::var("QUIZGEN_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            api_key: None,
            ffmpeg_location: std::env::var_os("QUIZGEN_FFMPEG").map(PathBuf::from),
            socket_timeout_secs: DEFAULT_SOCKET_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            cache_root: std::env::var_os("QUIZGEN_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(get_root_cache_dir),
        }
    }
}

impl QuizgenConfig {
    /// The usable LLM credential, if any.
    pub fn credential(&self) -> Option<String> {
        self.provider.resolve_api_key(self.api_key.as_deref())
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

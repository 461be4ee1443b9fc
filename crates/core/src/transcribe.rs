use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::{fs, process::Command, sync::OnceCell};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::{
    cache::get_model_dir,
    config::QuizgenConfig,
    error::TranscriptionError,
    types::Transcript,
};

const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<String, TranscriptionError>;
}

/// Produces a speech model. Called at most once per successful load.
#[async_trait]
pub trait ModelLoader<M>: Send + Sync {
    async fn load(&self) -> Result<M, TranscriptionError>;
}

/// A model loaded on first use and shared afterwards.
///
/// Concurrent first calls wait on the same load. A failed load leaves the
/// cell empty, so the next call tries again.
pub struct LazyModel<M> {
    loader: Box<dyn ModelLoader<M>>,
    cell: OnceCell<Arc<M>>,
}

impl<M: Send + Sync + 'static> LazyModel<M> {
    pub fn new(loader: impl ModelLoader<M> + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<M>, TranscriptionError> {
        self.cell
            .get_or_try_init(|| async { self.loader.load().await.map(Arc::new) })
            .await
            .cloned()
    }
}

/// Turns an audio artifact into plain text in a fixed language.
pub struct Transcriber {
    recognizer: Arc<dyn SpeechRecognizer>,
    language: String,
}

impl Transcriber {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, language: impl Into<String>) -> Self {
        Self {
            recognizer,
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError> {
        let metadata = fs::metadata(audio_path)
            .await
            .map_err(|_| TranscriptionError::MissingFile(audio_path.to_path_buf()))?;
        if metadata.len() == 0 {
            return Err(TranscriptionError::EmptyFile(audio_path.to_path_buf()));
        }

        let text = self.recognizer.recognize(audio_path, &self.language).await?;
        let text = text.trim().to_string();

        info!(chars = text.len(), language = %self.language, "transcription completed");

        Ok(Transcript {
            text,
            language: self.language.clone(),
        })
    }
}

/// Fetches the ggml model if needed and loads it into a whisper context.
pub struct WhisperModelLoader {
    model_dir: PathBuf,
    model_name: String,
    use_gpu: bool,
}

impl WhisperModelLoader {
    pub fn new(model_dir: PathBuf, model_name: impl Into<String>, use_gpu: bool) -> Self {
        Self {
            model_dir,
            model_name: model_name.into(),
            use_gpu,
        }
    }
}

#[async_trait]
impl ModelLoader<WhisperContext> for WhisperModelLoader {
    async fn load(&self) -> Result<WhisperContext, TranscriptionError> {
        let model_path = ensure_model(&self.model_dir, &self.model_name).await?;
        info!(model = %model_path.display(), "loading whisper model");

        let use_gpu = self.use_gpu;
        tokio::task::spawn_blocking(move || {
            let model_path_str = model_path.to_string_lossy();
            let ctx_params = WhisperContextParameters {
                use_gpu,
                ..Default::default()
            };
            WhisperContext::new_with_params(&model_path_str, ctx_params)
        })
        .await
        .map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?
        .map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))
    }
}

/// whisper.cpp through `whisper-rs`.
///
/// The model is loaded on the first `recognize` call and kept for the lifetime
/// of this instance.
pub struct WhisperRecognizer {
    model: LazyModel<WhisperContext>,
}

impl WhisperRecognizer {
    pub fn new(model_dir: PathBuf, model_name: impl Into<String>, use_gpu: bool) -> Self {
        Self::with_loader(WhisperModelLoader::new(model_dir, model_name, use_gpu))
    }

    pub fn with_loader(loader: impl ModelLoader<WhisperContext> + 'static) -> Self {
        Self {
            model: LazyModel::new(loader),
        }
    }

    pub fn from_config(config: &QuizgenConfig) -> Self {
        Self::new(
            get_model_dir(&config.cache_root),
            config.whisper_model.clone(),
            config.use_gpu,
        )
    }
}

#[async_trait]
impl SpeechRecognizer for WhisperRecognizer {
    async fn recognize(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<String, TranscriptionError> {
        let wav_path = audio_path.with_extension("16k.wav");
        convert_to_wav(audio_path, &wav_path).await?;

        let ctx = self.model.get().await?;
        let language = language.to_string();

        tokio::task::spawn_blocking(move || run_whisper(&ctx, &wav_path, &language))
            .await
            .map_err(|e| TranscriptionError::RecognitionFailed(e.to_string()))?
    }
}

fn run_whisper(
    ctx: &WhisperContext,
    wav_path: &Path,
    language: &str,
) -> Result<String, TranscriptionError> {
    let samples = read_samples(wav_path)?;
    debug!(samples = samples.len(), "running whisper");

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_language(Some(language));
    params.set_translate(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_special(false);
    params.set_print_timestamps(false);

    let mut state = ctx
        .create_state()
        .map_err(|e| TranscriptionError::RecognitionFailed(e.to_string()))?;
    state
        .full(params, &samples)
        .map_err(|e| TranscriptionError::RecognitionFailed(e.to_string()))?;

    let mut text = String::new();
    for segment in state.as_iter() {
        if let Ok(seg_text) = segment.to_str() {
            text.push_str(seg_text);
        }
    }

    Ok(text)
}

fn read_samples(wav_path: &Path) -> Result<Vec<f32>, TranscriptionError> {
    let mut reader = hound::WavReader::open(wav_path)
        .map_err(|e| TranscriptionError::RecognitionFailed(format!("invalid WAV: {}", e)))?;
    reader
        .samples::<i16>()
        .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| TranscriptionError::RecognitionFailed(format!("invalid WAV: {}", e)))
}

/// Re-encode any audio/video container to 16 kHz mono PCM using ffmpeg
pub async fn convert_to_wav(input: &Path, output: &Path) -> Result<(), TranscriptionError> {
    let result = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .arg("-vn")
        .arg("-acodec")
        .arg("pcm_s16le")
        .arg("-ar")
        .arg("16000")
        .arg("-ac")
        .arg("1")
        .arg(output)
        .output()
        .await?;

    if !result.status.success() {
        return Err(TranscriptionError::ConversionFailed {
            audio_path: input.to_path_buf(),
            reason: String::from_utf8_lossy(&result.stderr).to_string(),
        });
    }

    Ok(())
}

/// Make sure the whisper model exists locally, fetching it on first use.
pub async fn ensure_model(model_dir: &Path, model_name: &str) -> Result<PathBuf, TranscriptionError> {
    let download_url = format!("{}/{}", MODEL_BASE_URL, model_name);

    if !model_dir.exists() {
        fs::create_dir_all(model_dir).await?;
    }

    let model_path = model_dir.join(model_name);
    if !model_path.exists() {
        info!(url = %download_url, "downloading whisper model");
        let partial = model_path.with_extension("part");
        let output = Command::new("curl")
            .arg("-fL")
            .arg(&download_url)
            .arg("-o")
            .arg(&partial)
            .output()
            .await?;

        if !output.status.success() {
            let _ = fs::remove_file(&partial).await;
            return Err(TranscriptionError::ModelDownloadFailed {
                url: download_url,
                reason: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }
        fs::rename(&partial, &model_path).await?;
    }

    Ok(model_path)
}

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    acquire::{MediaAcquirer, YtDlpDownloader},
    cache::get_workspace_root,
    config::QuizgenConfig,
    error::PipelineError,
    generate::QuestionGenerator,
    transcribe::{Transcriber, WhisperRecognizer},
    types::QuizDraft,
};

/// Download, transcribe, generate. One fresh workspace per run, always removed.
pub struct QuizPipeline {
    acquirer: MediaAcquirer,
    transcriber: Transcriber,
    generator: QuestionGenerator,
    workspace_root: PathBuf,
}

impl QuizPipeline {
    pub fn new(
        acquirer: MediaAcquirer,
        transcriber: Transcriber,
        generator: QuestionGenerator,
        workspace_root: PathBuf,
    ) -> Self {
        Self {
            acquirer,
            transcriber,
            generator,
            workspace_root,
        }
    }

    /// yt-dlp, whisper and the configured LLM provider.
    pub fn from_config(config: &QuizgenConfig) -> Self {
        let acquirer = MediaAcquirer::new(Box::new(YtDlpDownloader::from_config(config)));
        let recognizer = Arc::new(WhisperRecognizer::from_config(config));
        let transcriber = Transcriber::new(recognizer, config.language.clone());
        let generator = QuestionGenerator::from_config(config);

        Self::new(
            acquirer,
            transcriber,
            generator,
            get_workspace_root(&config.cache_root),
        )
    }

    pub fn generator(&self) -> &QuestionGenerator {
        &self.generator
    }

    pub async fn run(&self, video_url: &str) -> Result<QuizDraft, PipelineError> {
        let workspace = self.workspace_root.join(Uuid::new_v4().to_string());
        fs::create_dir_all(&workspace).await?;

        let result = self.run_in(video_url, &workspace).await;

        if let Err(e) = fs::remove_dir_all(&workspace).await {
            warn!(workspace = %workspace.display(), error = %e, "failed to remove workspace");
        }

        result
    }

    async fn run_in(&self, video_url: &str, workspace: &Path) -> Result<QuizDraft, PipelineError> {
        let artifact = self.acquirer.acquire(video_url, workspace).await?;
        info!(title = %artifact.title, bytes = artifact.size, "audio ready");

        let transcript = self.transcriber.transcribe(&artifact.path).await?;

        Ok(self
            .generator
            .generate(&artifact.title, &transcript.text)
            .await)
    }
}

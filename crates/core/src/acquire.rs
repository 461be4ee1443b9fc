use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, process::Command};
use tracing::{debug, info, warn};

use crate::{
    config::QuizgenConfig,
    error::{AcquisitionError, DownloadError},
    types::AudioArtifact,
};

/// File extensions the transcriber can take as input.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "m4a", "webm", "ogg", "wav", "mp4"];

/// One format-selection policy tried against the media service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadStrategy {
    pub selector: &'static str,
    /// Convert the download to mp3 after fetching it.
    pub extract_audio: bool,
}

impl DownloadStrategy {
    const fn audio(selector: &'static str) -> Self {
        Self {
            selector,
            extract_audio: true,
        }
    }

    const fn video(selector: &'static str) -> Self {
        Self {
            selector,
            extract_audio: false,
        }
    }
}

/// Smallest audio first, then preferred containers, then any video as a last resort.
pub fn default_strategies() -> Vec<DownloadStrategy> {
    vec![
        DownloadStrategy::audio("worstaudio"),
        DownloadStrategy::audio("bestaudio[ext=m4a]"),
        DownloadStrategy::audio("bestaudio[ext=webm]"),
        DownloadStrategy::audio("bestaudio"),
        DownloadStrategy::video("worst[ext=mp4]"),
        DownloadStrategy::video("worst"),
    ]
}

#[derive(Debug, Clone, Default)]
pub struct DownloadOutcome {
    pub title: Option<String>,
}

#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Download `url` with `strategy` into `output_dir`.
    async fn download(
        &self,
        url: &str,
        strategy: &DownloadStrategy,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError>;
}

/// `yt-dlp` driven as a subprocess.
pub struct YtDlpDownloader {
    socket_timeout_secs: u32,
    retries: u32,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlpDownloader {
    pub fn new(socket_timeout_secs: u32, retries: u32, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            socket_timeout_secs,
            retries,
            ffmpeg_location,
        }
    }

    pub fn from_config(config: &QuizgenConfig) -> Self {
        Self::new(
            config.socket_timeout_secs,
            config.retries,
            config.ffmpeg_location.clone(),
        )
    }

    /// Command line for one attempt of `strategy`, excluding the program name.
    pub fn build_args(
        &self,
        url: &str,
        strategy: &DownloadStrategy,
        output_dir: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            url.into(),
            "--print".into(),
            "after_move:title".into(),
            "--no-playlist".into(),
            "--no-warnings".into(),
            "--socket-timeout".into(),
            self.socket_timeout_secs.to_string().into(),
            "--retries".into(),
            self.retries.to_string().into(),
            "--fragment-retries".into(),
            self.retries.to_string().into(),
            "-f".into(),
            strategy.selector.into(),
            "-o".into(),
            output_dir.join("%(title)s.%(ext)s").into_os_string(),
        ];

        if strategy.extract_audio {
            args.extend(
                ["-x", "--audio-format", "mp3", "--audio-quality", "64K"].map(OsString::from),
            );
        }

        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.clone().into_os_string());
        }

        args
    }
}

/// Map a non-zero yt-dlp exit to an error. A missing ffmpeg/ffprobe gets its own variant.
pub fn classify_failure(status: String, stderr: &str) -> DownloadError {
    let lowered = stderr.to_lowercase();
    if lowered.contains("ffmpeg") || lowered.contains("ffprobe") {
        DownloadError::MissingDecoder {
            reason: stderr.to_string(),
        }
    } else {
        DownloadError::Failed {
            status,
            reason: stderr.to_string(),
        }
    }
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    async fn download(
        &self,
        url: &str,
        strategy: &DownloadStrategy,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let output = Command::new("yt-dlp")
            .args(self.build_args(url, strategy, output_dir))
            .output()
            .await?;

        if !output.status.success() {
            return Err(classify_failure(
                output.status.to_string(),
                &String::from_utf8_lossy(&output.stderr),
            ));
        }

        let stdout_str = String::from_utf8_lossy(output.stdout.as_slice());
        let title = stdout_str
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string);

        Ok(DownloadOutcome { title })
    }
}

/// Resolves a video URL to a local audio artifact by walking the strategy list.
pub struct MediaAcquirer {
    downloader: Box<dyn MediaDownloader>,
    strategies: Vec<DownloadStrategy>,
}

impl MediaAcquirer {
    pub fn new(downloader: Box<dyn MediaDownloader>) -> Self {
        Self::with_strategies(downloader, default_strategies())
    }

    pub fn with_strategies(
        downloader: Box<dyn MediaDownloader>,
        strategies: Vec<DownloadStrategy>,
    ) -> Self {
        Self {
            downloader,
            strategies,
        }
    }

    pub fn strategies(&self) -> &[DownloadStrategy] {
        &self.strategies
    }

    /// Try each strategy in order until one leaves a non-empty media file.
    ///
    /// Every attempt gets its own `attempt-N` directory inside `workspace_dir`,
    /// so leftovers of a failed attempt are never picked up later. The
    /// workspace itself must already exist.
    pub async fn acquire(
        &self,
        video_url: &str,
        workspace_dir: &Path,
    ) -> Result<AudioArtifact, AcquisitionError> {
        for (index, strategy) in self.strategies.iter().enumerate() {
            let attempt_dir = workspace_dir.join(format!("attempt-{}", index + 1));
            fs::create_dir(&attempt_dir).await?;

            debug!(selector = strategy.selector, "trying download strategy");

            let outcome = match self
                .downloader
                .download(video_url, strategy, &attempt_dir)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(selector = strategy.selector, error = %e, "download strategy failed");
                    continue;
                }
            };

            let Some(title) = outcome.title.filter(|t| !t.trim().is_empty()) else {
                warn!(selector = strategy.selector, "downloader returned no title");
                continue;
            };

            match find_media_file(&attempt_dir).await {
                Ok(Some((path, size))) => {
                    info!(
                        selector = strategy.selector,
                        file = %path.display(),
                        bytes = size,
                        "media acquired"
                    );
                    return Ok(AudioArtifact {
                        path,
                        size,
                        title: title.trim().to_string(),
                    });
                }
                Ok(None) => {
                    warn!(
                        selector = strategy.selector,
                        "download reported success but left no usable file"
                    );
                }
                Err(e) => {
                    warn!(
                        selector = strategy.selector,
                        error = %e,
                        "could not scan download directory"
                    );
                }
            }
        }

        Err(AcquisitionError::AllFormatsFailed {
            url: video_url.to_string(),
            attempts: self.strategies.len(),
        })
    }
}

/// First non-empty file with an accepted extension, by file name.
pub async fn find_media_file(dir: &Path) -> std::io::Result<Option<(PathBuf, u64)>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let accepted = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
        if !accepted {
            continue;
        }

        let metadata = entry.metadata().await?;
        if metadata.is_file() && metadata.len() > 0 {
            candidates.push((path, metadata.len()));
        }
    }

    candidates.sort();
    Ok(candidates.into_iter().next())
}

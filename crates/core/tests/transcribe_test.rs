use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use quizgen_core::{LazyModel, ModelLoader, SpeechRecognizer, Transcriber, TranscriptionError};

#[derive(Default)]
struct CountingRecognizer {
    calls: AtomicUsize,
}

#[async_trait]
impl SpeechRecognizer for CountingRecognizer {
    async fn recognize(
        &self,
        _audio_path: &Path,
        _language: &str,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("\n  Hallo und willkommen zum Video.  \n".to_string())
    }
}

#[tokio::test]
async fn given_missing_file_when_transcribing_then_missing_file_error_without_recognizer_call() {
    let dir = tempfile::tempdir().unwrap();
    let recognizer = Arc::new(CountingRecognizer::default());
    let transcriber = Transcriber::new(recognizer.clone(), "de");

    let err = transcriber
        .transcribe(&dir.path().join("nope.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionError::MissingFile(_)));
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_empty_file_when_transcribing_then_empty_file_error_without_recognizer_call() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("silence.mp3");
    std::fs::write(&audio, b"").unwrap();
    let recognizer = Arc::new(CountingRecognizer::default());
    let transcriber = Transcriber::new(recognizer.clone(), "de");

    let err = transcriber.transcribe(&audio).await.unwrap_err();

    assert!(matches!(err, TranscriptionError::EmptyFile(_)));
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_audio_when_transcribing_then_text_is_trimmed_and_language_tagged() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("talk.mp3");
    std::fs::write(&audio, b"ID3 audio").unwrap();
    let recognizer = Arc::new(CountingRecognizer::default());
    let transcriber = Transcriber::new(recognizer.clone(), "de");

    let transcript = transcriber.transcribe(&audio).await.unwrap();

    assert_eq!(transcript.text, "Hallo und willkommen zum Video.");
    assert_eq!(transcript.language, "de");
    assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
}

/// Loader that fails for its first `failures` calls, then yields the call number.
struct CountingLoader {
    calls: Arc<AtomicUsize>,
    failures: usize,
}

#[async_trait]
impl ModelLoader<usize> for CountingLoader {
    async fn load(&self) -> Result<usize, TranscriptionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(20)).await;
        if call <= self.failures {
            return Err(TranscriptionError::ModelLoadFailed("model file is truncated".to_string()));
        }
        Ok(call)
    }
}

#[tokio::test]
async fn given_concurrent_first_calls_when_getting_model_then_loader_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let model = LazyModel::new(CountingLoader {
        calls: Arc::clone(&calls),
        failures: 0,
    });
    assert!(!model.is_loaded());

    let (a, b, c) = tokio::join!(model.get(), model.get(), model.get());

    assert_eq!(*a.unwrap(), 1);
    assert_eq!(*b.unwrap(), 1);
    assert_eq!(*c.unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(model.is_loaded());

    let again = model.get().await.unwrap();
    assert_eq!(*again, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_failed_first_load_when_getting_model_again_then_load_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let model = LazyModel::new(CountingLoader {
        calls: Arc::clone(&calls),
        failures: 1,
    });

    let err = model.get().await.unwrap_err();
    assert!(matches!(err, TranscriptionError::ModelLoadFailed(_)));
    assert!(!model.is_loaded());

    let loaded = model.get().await.unwrap();
    assert_eq!(*loaded, 2);
    assert_eq!(*model.get().await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

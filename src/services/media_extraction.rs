use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// An uploaded course asset, referenced by its stored file name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "file", rename_all = "snake_case")]
pub enum MediaSource {
    Document(String),
    Video(String),
}

impl MediaSource {
    pub fn file_name(&self) -> &str {
        match self {
            MediaSource::Document(f) | MediaSource::Video(f) => f,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid file name '{0}'")]
    InvalidFileName(String),

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not read PDF text: {0}")]
    Pdf(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("no text could be extracted from '{0}'")]
    Empty(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        ExtractionError::Transcription(err.to_string())
    }
}

/// Turns an uploaded document or video into plain text for the generator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn extract_text(&self, source: &MediaSource) -> Result<String, ExtractionError>;
}

/// Keeps at most `budget` characters, never splitting a character.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Reads uploads from `<upload_dir>/pdf` and `<upload_dir>/video`.
/// PDFs are parsed locally; videos go to an OpenAI-compatible transcription
/// endpoint (Groq whisper by default).
pub struct UploadedMediaExtractor {
    upload_dir: PathBuf,
    http: reqwest::Client,
    transcription_url: String,
    transcription_key: SecretString,
    transcription_model: String,
    document_budget: usize,
    video_budget: usize,
}

impl UploadedMediaExtractor {
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.generation_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            upload_dir: PathBuf::from(&config.upload_dir),
            http,
            transcription_url: format!(
                "{}/audio/transcriptions",
                config.groq_api_base.trim_end_matches('/')
            ),
            transcription_key: config.groq_api_key.clone(),
            transcription_model: config.groq_transcription_model.clone(),
            document_budget: config.document_text_budget,
            video_budget: config.video_text_budget,
        }
    }

    fn resolve_path(&self, source: &MediaSource) -> Result<PathBuf, ExtractionError> {
        let file_name = source.file_name();
        let is_plain_name = !file_name.is_empty()
            && !file_name.contains("..")
            && Path::new(file_name).components().count() == 1
            && !file_name.contains(['/', '\\']);
        if !is_plain_name {
            return Err(ExtractionError::InvalidFileName(file_name.to_string()));
        }

        let folder = match source {
            MediaSource::Document(_) => "pdf",
            MediaSource::Video(_) => "video",
        };
        let path = self.upload_dir.join(folder).join(file_name);
        if !path.is_file() {
            return Err(ExtractionError::NotFound(path));
        }
        Ok(path)
    }

    async fn document_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?
        .map_err(ExtractionError::Pdf)
    }

    async fn transcribe(&self, path: &Path, file_name: &str) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.transcription_model.clone())
            .text("response_format", "json")
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            );

        let response = self
            .http
            .post(&self.transcription_url)
            .bearer_auth(self.transcription_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Transcription(format!("{}: {}", status, body)));
        }

        let transcription: TranscriptionResponse = response.json().await?;
        Ok(transcription.text)
    }
}

#[async_trait]
impl MediaExtractor for UploadedMediaExtractor {
    async fn extract_text(&self, source: &MediaSource) -> Result<String, ExtractionError> {
        let path = self.resolve_path(source)?;

        let (text, budget) = match source {
            MediaSource::Document(_) => (self.document_text(&path).await?, self.document_budget),
            MediaSource::Video(name) => (self.transcribe(&path, name).await?, self.video_budget),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractionError::Empty(source.file_name().to_string()));
        }

        log::debug!(
            "Extracted {} characters from '{}' (budget {})",
            text.chars().count(),
            source.file_name(),
            budget
        );
        Ok(truncate_chars(text, budget))
    }
}

//! HTTP client for the transcription server

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::results::TranscribeResponse;
use crate::selection::{FileSource, SelectedFile};
use crate::{Result, UploadError};

/// Something that can turn a batch of files into transcription results
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    /// Submit every file in one request
    async fn transcribe(&self, files: &[SelectedFile]) -> Result<TranscribeResponse>;
}

/// Talks to the transcription server over HTTP
#[derive(Debug, Clone)]
pub struct HttpTranscriptionClient {
    server: ServerConfig,
    client: reqwest::Client,
}

impl HttpTranscriptionClient {
    pub fn new(server: ServerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = server.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { server, client })
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Build the multipart body with every file under the shared field name
    async fn build_form(&self, files: &[SelectedFile]) -> Result<Form> {
        let mut form = Form::new();
        for file in files {
            form = form.part(self.server.upload_field.clone(), file_part(file).await?);
        }
        Ok(form)
    }

    /// Download one artifact into `dest_dir`, returning the written path
    pub async fn download(&self, artifact_id: &str, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = Path::new(artifact_id)
            .file_name()
            .filter(|name| name.to_string_lossy() == artifact_id)
            .ok_or_else(|| UploadError::InvalidArtifact(artifact_id.to_string()))?;
        let dest = dest_dir.join(file_name);

        let url = self.server.download_url(artifact_id)?;
        debug!("Downloading {} from {}", artifact_id, url);

        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(UploadError::DownloadFailed {
                artifact: artifact_id.to_string(),
                status: response.status().as_u16(),
            });
        }

        tokio::fs::create_dir_all(dest_dir).await?;
        let mut out = tokio::fs::File::create(&dest).await?;
        while let Some(chunk) = response.chunk().await? {
            out.write_all(&chunk).await?;
        }
        out.flush().await?;

        info!("💾 Saved {}", dest.display());
        Ok(dest)
    }
}

async fn file_part(file: &SelectedFile) -> Result<Part> {
    let part = match &file.source {
        FileSource::Memory(data) => Part::bytes(data.clone()),
        FileSource::Path(path) => {
            let handle = tokio::fs::File::open(path).await?;
            let body = Body::wrap_stream(ReaderStream::new(handle));
            Part::stream_with_length(body, file.size)
        }
    };

    Ok(part
        .file_name(file.name.clone())
        .mime_str(file.upload_media_type())?)
}

#[async_trait]
impl TranscriptionBackend for HttpTranscriptionClient {
    async fn transcribe(&self, files: &[SelectedFile]) -> Result<TranscribeResponse> {
        let url = self.server.transcribe_url()?;
        let form = self.build_form(files).await?;

        info!("📤 Uploading {} file(s) to {}", files.len(), url);

        let response = self.client.post(url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Transcription server error {}: {}", status, text);
            return Err(UploadError::TranscriptionFailed {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: TranscribeResponse = serde_json::from_slice(&body)?;

        info!("📥 Received {} result(s)", parsed.results.len());
        Ok(parsed)
    }
}

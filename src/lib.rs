//! Transcribe Uploader
//!
//! Client side of a Whisper transcription server: collects video files, posts them
//! as a single multipart batch and renders the returned transcripts and download links.

pub mod client;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod render;
pub mod results;
pub mod selection;
pub mod view;

// Re-export main types for easy access
pub use crate::client::{HttpTranscriptionClient, TranscriptionBackend};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::controller::UploadController;
pub use crate::render::{render_results, render_selection, ResultsView, SelectionView};
pub use crate::results::{Artifact, ArtifactKind, TranscribeResponse, TranscriptionResult};
pub use crate::selection::{SelectedFile, Selection, VideoFilter};
pub use crate::view::{SubmitControl, TerminalView, UploadView};

/// Result type for upload operations
pub type Result<T> = std::result::Result<T, UploadError>;

/// Error types for upload operations
#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcription failed (server returned {status})")]
    TranscriptionFailed { status: u16 },

    #[error("Download of {artifact} failed (server returned {status})")]
    DownloadFailed { artifact: String, status: u16 },

    #[error("Invalid artifact identifier: {0}")]
    InvalidArtifact(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("No file at index {index} (selection has {len})")]
    InvalidIndex { index: usize, len: usize },
}

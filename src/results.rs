//! Transcription results as returned by the server

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /transcribe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub results: Vec<TranscriptionResult>,
}

/// Outcome for one uploaded file
///
/// Any status other than `success`, or a success entry missing its transcript files,
/// decodes as an error entry so one odd result never rejects the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", from = "RawResult")]
pub enum TranscriptionResult {
    Success(TranscriptionSuccess),
    Error(TranscriptionFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSuccess {
    pub filename: String,
    /// Detected language (older servers omit it)
    #[serde(default)]
    pub language: Option<String>,
    /// Transcript preview, truncated by the server
    pub transcript: String,
    pub with_timestamps: String,
    pub without_timestamps: String,
    #[serde(default)]
    pub srt_file: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub translation_srt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionFailure {
    pub filename: String,
    pub message: String,
}

/// Untyped result entry as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    status: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    with_timestamps: Option<String>,
    #[serde(default)]
    without_timestamps: Option<String>,
    #[serde(default)]
    srt_file: Option<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    translation_srt: Option<String>,
}

impl From<RawResult> for TranscriptionResult {
    fn from(raw: RawResult) -> Self {
        if raw.status == "success" {
            if let (Some(transcript), Some(with_timestamps), Some(without_timestamps)) =
                (raw.transcript, raw.with_timestamps, raw.without_timestamps)
            {
                return TranscriptionResult::Success(TranscriptionSuccess {
                    filename: raw.filename,
                    language: raw.language,
                    transcript,
                    with_timestamps,
                    without_timestamps,
                    srt_file: raw.srt_file,
                    translation: raw.translation,
                    translation_srt: raw.translation_srt,
                });
            }
            return TranscriptionResult::Error(TranscriptionFailure {
                filename: raw.filename,
                message: raw
                    .message
                    .unwrap_or_else(|| "Incomplete transcription result".to_string()),
            });
        }

        let message = match raw.message {
            Some(message) => message,
            None if raw.status.is_empty() => "Missing result status".to_string(),
            None => format!("Unexpected result status: {}", raw.status),
        };
        TranscriptionResult::Error(TranscriptionFailure {
            filename: raw.filename,
            message,
        })
    }
}

/// Kinds of downloadable outputs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    WithTimestamps,
    WithoutTimestamps,
    Subtitles,
    Translation,
    TranslationSubtitles,
}

impl ArtifactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::WithTimestamps => "Download with timestamps",
            ArtifactKind::WithoutTimestamps => "Download without timestamps",
            ArtifactKind::Subtitles => "Download SRT subtitles",
            ArtifactKind::Translation => "Download English translation",
            ArtifactKind::TranslationSubtitles => "Download English SRT",
        }
    }
}

/// A downloadable output referenced by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub id: String,
}

impl TranscriptionResult {
    pub fn filename(&self) -> &str {
        match self {
            TranscriptionResult::Success(s) => &s.filename,
            TranscriptionResult::Error(e) => &e.filename,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranscriptionResult::Success(_))
    }

    /// Artifacts present on this result; error results have none
    pub fn artifacts(&self) -> Vec<Artifact> {
        match self {
            TranscriptionResult::Success(s) => s.artifacts(),
            TranscriptionResult::Error(_) => Vec::new(),
        }
    }
}

impl TranscriptionSuccess {
    pub fn artifacts(&self) -> Vec<Artifact> {
        let candidates = [
            (ArtifactKind::WithTimestamps, Some(&self.with_timestamps)),
            (ArtifactKind::WithoutTimestamps, Some(&self.without_timestamps)),
            (ArtifactKind::Subtitles, self.srt_file.as_ref()),
            (ArtifactKind::Translation, self.translation.as_ref()),
            (ArtifactKind::TranslationSubtitles, self.translation_srt.as_ref()),
        ];

        candidates
            .into_iter()
            .filter_map(|(kind, id)| match id {
                Some(id) if !id.trim().is_empty() => Some(Artifact {
                    kind,
                    id: id.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn language_label(&self) -> &str {
        self.language
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("unknown")
    }
}

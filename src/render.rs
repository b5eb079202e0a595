//! Declarative views of the selection, progress and results
//!
//! Views are plain values; an [`UploadView`](crate::view::UploadView) decides how to show them.

use std::fmt;

use crate::config::ServerConfig;
use crate::results::{ArtifactKind, TranscriptionResult};
use crate::selection::{format_file_size, Selection};

/// One row of the selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItemView {
    /// Position to pass back to `remove_file`
    pub index: usize,
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionView {
    pub items: Vec<FileItemView>,
    /// Submit control is shown only when something is selected
    pub submit_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub visible: bool,
    /// Fill percentage, 0..=100
    pub fill: u8,
    pub message: String,
}

impl ProgressView {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn showing(fill: u8, message: impl Into<String>) -> Self {
        Self {
            visible: true,
            fill: fill.min(100),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub kind: ArtifactKind,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    Success {
        language: String,
        preview: String,
        links: Vec<DownloadLink>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntryView {
    pub filename: String,
    pub body: ResultBody,
}

impl ResultEntryView {
    pub fn links(&self) -> &[DownloadLink] {
        match &self.body {
            ResultBody::Success { links, .. } => links.as_slice(),
            ResultBody::Error { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub entries: Vec<ResultEntryView>,
}

/// Build the selection view; indices are taken fresh from the current list
pub fn render_selection(selection: &Selection) -> SelectionView {
    let items = selection
        .files()
        .iter()
        .enumerate()
        .map(|(index, file)| FileItemView {
            index,
            name: file.name.clone(),
            size_label: format_file_size(file.size),
        })
        .collect();

    SelectionView {
        items,
        submit_visible: !selection.is_empty(),
    }
}

/// Build one entry per result, preserving input order
pub fn render_results(results: &[TranscriptionResult], server: &ServerConfig) -> ResultsView {
    let entries = results
        .iter()
        .map(|result| match result {
            TranscriptionResult::Success(success) => ResultEntryView {
                filename: success.filename.clone(),
                body: ResultBody::Success {
                    language: success.language_label().to_string(),
                    preview: success.transcript.clone(),
                    links: success
                        .artifacts()
                        .into_iter()
                        .map(|artifact| DownloadLink {
                            kind: artifact.kind,
                            label: artifact.kind.label().to_string(),
                            href: server.download_href(&artifact.id),
                        })
                        .collect(),
                },
            },
            TranscriptionResult::Error(failure) => ResultEntryView {
                filename: failure.filename.clone(),
                body: ResultBody::Error {
                    message: failure.message.clone(),
                },
            },
        })
        .collect();

    ResultsView { entries }
}

impl fmt::Display for SelectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "  [{}] {} ({})", item.index, item.name, item.size_label)?;
        }
        if self.submit_visible {
            write!(f, "  {} file(s) ready to transcribe", self.items.len())
        } else {
            write!(f, "  No videos selected")
        }
    }
}

impl fmt::Display for ProgressView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.visible {
            return Ok(());
        }
        const WIDTH: usize = 20;
        let filled = WIDTH * self.fill as usize / 100;
        write!(
            f,
            "[{}{}] {:>3}% {}",
            "#".repeat(filled),
            "-".repeat(WIDTH - filled),
            self.fill,
            self.message
        )
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transcription Results")?;
        for entry in &self.entries {
            match &entry.body {
                ResultBody::Success {
                    language,
                    preview,
                    links,
                } => {
                    writeln!(f, "✅ {} - Success ({})", entry.filename, language)?;
                    writeln!(f, "   {}", preview)?;
                    for link in links {
                        writeln!(f, "   {}: {}", link.label, link.href)?;
                    }
                }
                ResultBody::Error { message } => {
                    writeln!(f, "❌ {} - Error", entry.filename)?;
                    writeln!(f, "   Error: {}", message)?;
                }
            }
        }
        Ok(())
    }
}

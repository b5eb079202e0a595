//! Upload controller: owns the selection and drives one batch submit at a time

use tracing::{debug, error, info};

use crate::client::TranscriptionBackend;
use crate::config::{Config, ServerConfig, UiConfig};
use crate::render::{render_results, render_selection, ProgressView, ResultsView, SelectionView};
use crate::results::TranscriptionResult;
use crate::selection::{format_file_size, SelectedFile, Selection, VideoFilter};
use crate::view::{SubmitControl, UploadView};
use crate::Result;

/// What a call to [`UploadController::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was selected, no request was made
    Skipped,
    /// The server answered with this many per-file results
    Completed { results: usize },
}

pub struct UploadController<B, V> {
    backend: B,
    view: V,
    filter: VideoFilter,
    selection: Selection,
    results: Vec<TranscriptionResult>,
    server: ServerConfig,
    ui: UiConfig,
}

impl<B: TranscriptionBackend, V: UploadView> UploadController<B, V> {
    pub fn new(config: &Config, backend: B, view: V) -> Self {
        Self {
            backend,
            view,
            filter: VideoFilter::from_config(&config.upload),
            selection: Selection::new(),
            results: Vec::new(),
            server: config.server.clone(),
            ui: config.ui.clone(),
        }
    }

    /// Queue every candidate that looks like a video; others are dropped silently
    pub fn add_files<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let accepted = self.selection.add_files(&self.filter, candidates);
        debug!("Accepted {} file(s), {} selected", accepted, self.selection.len());
        self.refresh_selection();
        accepted
    }

    /// Remove the file at a position taken from the latest selection view
    pub fn remove_file(&mut self, index: usize) -> Result<SelectedFile> {
        let removed = self.selection.remove(index)?;
        debug!("Removed {} from selection", removed.name);
        self.refresh_selection();
        Ok(removed)
    }

    /// Send the whole selection as one batch and render what comes back.
    ///
    /// On failure the selection is kept so the user can resubmit it unchanged.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.selection.is_empty() {
            debug!("Submit ignored, nothing selected");
            return Ok(SubmitOutcome::Skipped);
        }

        let mut view = SubmitControl::disable(&mut self.view);

        self.results.clear();
        view.show_results(&ResultsView::default());
        view.show_progress(&ProgressView::showing(50, self.ui.progress_message.clone()));

        info!(
            "🚀 Submitting {} video(s), {} total",
            self.selection.len(),
            format_file_size(self.selection.total_size())
        );

        let response = match self.backend.transcribe(self.selection.files()).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ Batch transcription failed: {}", e);
                view.notify_error(&self.ui.failure_message);
                view.show_progress(&ProgressView::hidden());
                return Err(e);
            }
        };

        view.show_progress(&ProgressView::showing(100, self.ui.complete_message.clone()));

        self.results = response.results;
        view.show_results(&render_results(&self.results, &self.server));

        self.selection.clear();
        view.show_selection(&render_selection(&self.selection));
        view.reset_picker();
        drop(view);

        let succeeded = self.results.iter().filter(|r| r.is_success()).count();
        info!(
            "🎉 Transcription finished: {} succeeded, {} failed",
            succeeded,
            self.results.len() - succeeded
        );

        tokio::time::sleep(self.ui.completion_delay()).await;
        self.view.show_progress(&ProgressView::hidden());

        Ok(SubmitOutcome::Completed {
            results: self.results.len(),
        })
    }

    fn refresh_selection(&mut self) {
        self.view.show_selection(&render_selection(&self.selection));
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current selection view, with indices valid for `remove_file`
    pub fn selection_view(&self) -> SelectionView {
        render_selection(&self.selection)
    }

    pub fn submit_visible(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Results of the last successful submit
    pub fn results(&self) -> &[TranscriptionResult] {
        &self.results
    }

    pub fn results_view(&self) -> ResultsView {
        render_results(&self.results, &self.server)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

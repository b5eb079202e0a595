//! Presentation seam between the controller and whatever shows the UI

use std::ops::{Deref, DerefMut};
use tracing::{debug, error};

use crate::render::{ProgressView, ResultsView, SelectionView};

/// Receives rendered views from the [`UploadController`](crate::controller::UploadController)
pub trait UploadView {
    /// Redraw the list of selected files and the submit control's visibility
    fn show_selection(&mut self, view: &SelectionView);

    /// Redraw the progress indicator
    fn show_progress(&mut self, view: &ProgressView);

    /// Replace the results area
    fn show_results(&mut self, view: &ResultsView);

    /// Enable or disable the submit control
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Surface a failure the user has to acknowledge
    fn notify_error(&mut self, message: &str);

    /// Clear the file picker so the same files can be picked again
    fn reset_picker(&mut self);
}

/// Keeps the submit control disabled for as long as it lives
pub struct SubmitControl<'a, V: UploadView + ?Sized> {
    view: &'a mut V,
}

impl<'a, V: UploadView + ?Sized> SubmitControl<'a, V> {
    pub fn disable(view: &'a mut V) -> Self {
        view.set_submit_enabled(false);
        Self { view }
    }
}

impl<V: UploadView + ?Sized> Deref for SubmitControl<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: UploadView + ?Sized> DerefMut for SubmitControl<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: UploadView + ?Sized> Drop for SubmitControl<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true);
    }
}

/// Plain terminal rendering used by the command line front end
#[derive(Debug, Default)]
pub struct TerminalView {
    last_progress: Option<ProgressView>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UploadView for TerminalView {
    fn show_selection(&mut self, view: &SelectionView) {
        println!("📁 Selected videos:\n{}", view);
    }

    fn show_progress(&mut self, view: &ProgressView) {
        if self.last_progress.as_ref() == Some(view) {
            return;
        }
        if view.visible {
            println!("{}", view);
        }
        self.last_progress = Some(view.clone());
    }

    fn show_results(&mut self, view: &ResultsView) {
        if !view.entries.is_empty() {
            println!("{}", view);
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!("Submit control {}", if enabled { "enabled" } else { "disabled" });
    }

    fn notify_error(&mut self, message: &str) {
        error!("❌ {}", message);
        eprintln!("Error: {}", message);
    }

    fn reset_picker(&mut self) {
        debug!("File picker reset");
    }
}

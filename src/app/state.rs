use crate::error::CodegenError;
use crate::upload::{FileSelection, GenerateResponse, SelectedFile, UploadProgress};
use derivative::Derivative;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// Messages from the upload worker. `Finished` arrives exactly once.
#[derive(Debug)]
pub enum UploadEvent {
    Progress(UploadProgress),
    Finished(Result<String, CodegenError>),
}

#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct SessionState {
    pub selected_file: Option<SelectedFile>,
    pub error_text: String,
    pub success_text: String,
    pub is_uploading: bool,
    pub progress_percent: f32,
    pub download_ready: bool,
    pub generated_id: Option<String>,
    /// One entry per started download; each clears the session when due.
    pub reset_deadlines: Vec<Instant>,
    #[derivative(Debug = "ignore")]
    pub event_receiver: Option<Receiver<UploadEvent>>,
}

impl SessionState {
    pub fn apply_selection(&mut self, selection: FileSelection) {
        match selection {
            FileSelection::Rejected(message) => {
                self.error_text = message;
                self.selected_file = None;
            }
            FileSelection::Accepted(file) => {
                self.selected_file = Some(file);
                self.error_text.clear();
                self.success_text.clear();
                self.download_ready = false;
                self.generated_id = None;
            }
        }
    }

    pub fn reset(&mut self) {
        self.selected_file = None;
        self.progress_percent = 0.0;
        self.download_ready = false;
        self.generated_id = None;
    }

    pub fn begin_upload(&mut self) {
        self.error_text.clear();
        self.success_text.clear();
        self.is_uploading = true;
        self.progress_percent = 0.0;
        self.download_ready = false;
    }

    pub fn record_progress(&mut self, progress: UploadProgress) {
        if !self.is_uploading {
            return;
        }
        if let Some(percent) = progress.percent() {
            self.progress_percent = self.progress_percent.max(percent.clamp(0.0, 100.0));
        }
    }

    pub fn complete_upload(&mut self, response: GenerateResponse) {
        self.generated_id = Some(response.id);
        self.download_ready = true;
        self.error_text.clear();
        self.success_text = response.message;
        self.progress_percent = 100.0;
        self.is_uploading = false;
    }

    pub fn fail_upload(&mut self, error: &CodegenError) {
        self.success_text.clear();
        self.error_text = format!("Generation failed: {}", error);
        self.progress_percent = 0.0;
        self.is_uploading = false;
    }

    pub fn fail_with(&mut self, error: &CodegenError) {
        self.success_text.clear();
        self.error_text = error.to_string();
    }

    pub fn announce(&mut self, message: &str) {
        self.error_text.clear();
        self.success_text = message.to_string();
    }

    pub fn schedule_reset(&mut self, at: Instant) {
        self.reset_deadlines.push(at);
    }

    /// Drops every deadline at or before `now` and reports how many there were.
    pub fn take_due_resets(&mut self, now: Instant) -> usize {
        let pending = self.reset_deadlines.len();
        self.reset_deadlines.retain(|deadline| *deadline > now);
        pending - self.reset_deadlines.len()
    }

    pub fn next_reset(&self) -> Option<Instant> {
        self.reset_deadlines.iter().min().copied()
    }

    pub fn can_generate(&self) -> bool {
        self.selected_file.is_some() && !self.is_uploading
    }

    pub fn show_progress(&self) -> bool {
        self.is_uploading || self.progress_percent > 0.0
    }
}

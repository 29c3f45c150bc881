mod state;
mod ui;

use crate::config::CodegenConfig;
use crate::download::{archive_name_for, save_trigger_for, SaveRequest, SaveTrigger};
use crate::error::CodegenError;
use crate::upload::{
    CodegenClient, CodegenTransport, FileSelection, GenerateResponse, ProgressCallback,
};
use crate::widgets::DropZone;
use eframe::{egui, App};
use log::{error, info, warn};
pub use state::{SessionState, UploadEvent};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const RESET_DELAY: Duration = Duration::from_millis(3000);
pub const DOWNLOAD_STARTED: &str = "Download initiated!";
const SAVE_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct CodegenUploader {
    state: SessionState,
    drop_zone: DropZone,
    transport: Arc<dyn CodegenTransport>,
    saver: Box<dyn SaveTrigger>,
}

impl CodegenUploader {
    pub fn from_config(config: &CodegenConfig) -> Result<Self, CodegenError> {
        info!("Initializing Zant Codegen uploader against {}", config.base_url);
        let client = CodegenClient::new(config)?;
        let saver = save_trigger_for(config.save_mode, client.http().clone());
        Ok(Self::with_parts(Arc::new(client), saver))
    }

    pub fn with_parts(transport: Arc<dyn CodegenTransport>, saver: Box<dyn SaveTrigger>) -> Self {
        Self {
            state: SessionState::default(),
            drop_zone: DropZone::default(),
            transport,
            saver,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn select_file(&mut self, selection: FileSelection) {
        self.state.apply_selection(selection);
    }

    pub fn reset(&mut self) {
        info!("Resetting uploader");
        self.state.reset();
    }

    /// Starts the upload on a worker thread. Results come back through
    /// [`Self::update_state`].
    pub fn generate(&mut self) {
        let Some(file) = self.state.selected_file.clone() else {
            self.state.fail_with(&CodegenError::NoFileSelected);
            return;
        };

        info!("Submitting {} for code generation", file.name);
        self.state.begin_upload();

        let (sender, receiver) = std_mpsc::channel();
        self.state.event_receiver = Some(receiver);

        let transport = Arc::clone(&self.transport);
        let progress_sender = sender.clone();
        let on_progress: ProgressCallback = Arc::new(move |progress| {
            progress_sender
                .send(UploadEvent::Progress(progress))
                .unwrap_or_default();
        });

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(transport.upload(file, on_progress)),
                Err(e) => Err(CodegenError::Network(format!("runtime unavailable: {}", e))),
            };
            sender.send(UploadEvent::Finished(result)).unwrap_or_default();
        });
    }

    pub fn download_generated(&mut self) {
        self.download_generated_at(Instant::now());
    }

    fn download_generated_at(&mut self, now: Instant) {
        let Some(id) = self.state.generated_id.clone() else {
            self.state.fail_with(&CodegenError::NoGeneratedId);
            return;
        };

        let request = SaveRequest {
            url: self.transport.download_url(&id),
            file_name: archive_name_for(self.state.selected_file.as_ref()),
        };

        match self.saver.trigger_save(&request) {
            Ok(()) => {
                info!("Download of {} started as {}", id, request.file_name);
                self.state.announce(DOWNLOAD_STARTED);
                self.state.schedule_reset(now + RESET_DELAY);
            }
            Err(CodegenError::SaveCancelled) => info!("Download of {} cancelled", id),
            Err(e) => {
                error!("Download of {} failed: {}", id, e);
                self.state.success_text.clear();
                self.state.error_text = format!("Download failed: {}", e);
            }
        }
    }

    /// Applies everything the workers reported since the last frame, then
    /// fires each post-download reset that has come due.
    pub fn update_state(&mut self, now: Instant) {
        if let Some(receiver) = &self.state.event_receiver {
            let mut events = Vec::new();
            let mut disconnected = false;
            loop {
                match receiver.try_recv() {
                    Ok(event) => events.push(event),
                    Err(std_mpsc::TryRecvError::Empty) => break,
                    Err(std_mpsc::TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }

            for event in events {
                self.handle_event(event);
            }

            if disconnected {
                self.state.event_receiver = None;
                if self.state.is_uploading {
                    warn!("Upload worker stopped without reporting an outcome");
                    self.state.fail_upload(&CodegenError::Aborted);
                }
            }
        }

        while let Some(e) = self.saver.poll_failure() {
            error!("Background download failed: {}", e);
            self.state.success_text.clear();
            self.state.error_text = format!("Download failed: {}", e);
            // Keep the identifier so the download can be retried.
            self.state.reset_deadlines.clear();
        }

        if self.state.take_due_resets(now) > 0 {
            self.reset();
        }
    }

    fn handle_event(&mut self, event: UploadEvent) {
        match event {
            UploadEvent::Progress(progress) => self.state.record_progress(progress),
            UploadEvent::Finished(result) => {
                match result.and_then(|body| GenerateResponse::from_body(&body)) {
                    Ok(response) => {
                        info!("Code generation finished with id {}", response.id);
                        self.state.complete_upload(response);
                    }
                    Err(e) => {
                        error!("Generation failed: {}", e);
                        self.state.fail_upload(&e);
                    }
                }
                self.state.event_receiver = None;
            }
        }
    }
}

impl App for CodegenUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.update_state(now);

        if self.state.is_uploading {
            ctx.request_repaint();
        } else if let Some(deadline) = self.state.next_reset() {
            // Wake at the deadline, and often enough before it to surface a
            // failed background save.
            let wait = deadline.saturating_duration_since(now).min(SAVE_POLL_INTERVAL);
            ctx.request_repaint_after(wait);
        }

        self.render(ctx);
    }
}

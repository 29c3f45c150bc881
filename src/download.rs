//! Getting the generated archive onto disk.
//!
//! The controller only knows the [`SaveTrigger`] capability. Which
//! implementation backs it is picked from [`SaveMode`] at startup.

use crate::config::SaveMode;
use crate::error::CodegenError;
use crate::upload::{SelectedFile, MODEL_EXTENSION};
use futures_util::StreamExt;
use log::{error, info};
use reqwest::{Client, Url};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_ARCHIVE_NAME: &str = "generated-code.zip";

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub url: Url,
    pub file_name: String,
}

pub trait SaveTrigger: Send + Sync {
    fn trigger_save(&self, request: &SaveRequest) -> Result<(), CodegenError>;

    /// A save that was accepted by `trigger_save` but failed later on.
    /// Polled once per frame.
    fn poll_failure(&self) -> Option<CodegenError> {
        None
    }
}

/// `mnist.onnx` becomes `mnist.zip`.
pub fn archive_name_for(original: Option<&SelectedFile>) -> String {
    original
        .and_then(|file| file.name.strip_suffix(MODEL_EXTENSION))
        .map(|stem| format!("{}.zip", stem))
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string())
}

pub fn save_trigger_for(mode: SaveMode, http: Client) -> Box<dyn SaveTrigger> {
    match mode {
        SaveMode::Browser => Box::new(BrowserSave),
        SaveMode::Dialog => Box::new(DialogSave::new(http)),
    }
}

/// Lets the system browser fetch the archive, the same way a download link
/// on a web page would.
pub struct BrowserSave;

impl SaveTrigger for BrowserSave {
    fn trigger_save(&self, request: &SaveRequest) -> Result<(), CodegenError> {
        info!("Opening {} in the system browser", request.url);
        open::that(request.url.as_str())
            .map_err(|e| CodegenError::Save(format!("Could not open browser: {}", e)))
    }
}

/// Asks where to put the archive, then streams it there in the background.
/// Background failures are queued for [`SaveTrigger::poll_failure`].
pub struct DialogSave {
    http: Client,
    report: Sender<CodegenError>,
    failures: Mutex<Receiver<CodegenError>>,
}

impl DialogSave {
    pub fn new(http: Client) -> Self {
        let (report, failures) = mpsc::channel();
        Self {
            http,
            report,
            failures: Mutex::new(failures),
        }
    }

    async fn fetch_to(http: Client, url: Url, destination: PathBuf) -> Result<u64, CodegenError> {
        let response = http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CodegenError::Server(
                status.canonical_reason().unwrap_or("Server Error").to_string(),
            ));
        }

        let mut file = tokio::fs::File::create(&destination)
            .await
            .map_err(|e| CodegenError::io(&destination, e))?;
        let mut written = 0u64;
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| CodegenError::io(&destination, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| CodegenError::io(&destination, e))?;
        Ok(written)
    }

    fn spawn_fetch(&self, url: Url, destination: PathBuf) -> std::thread::JoinHandle<()> {
        let http = self.http.clone();
        let report = self.report.clone();
        info!("Saving {} to {}", url, destination.display());

        std::thread::spawn(move || {
            let result = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(Self::fetch_to(http, url, destination.clone())),
                Err(e) => Err(CodegenError::Save(format!("runtime unavailable: {}", e))),
            };
            match result {
                Ok(bytes) => info!("Saved {} bytes to {}", bytes, destination.display()),
                Err(e) => {
                    error!("Download to {} failed: {}", destination.display(), e);
                    report.send(e).unwrap_or_default();
                }
            }
        })
    }
}

impl SaveTrigger for DialogSave {
    fn trigger_save(&self, request: &SaveRequest) -> Result<(), CodegenError> {
        let destination = FileDialog::new()
            .set_file_name(&request.file_name)
            .add_filter("Zip archive", &["zip"])
            .save_file()
            .ok_or(CodegenError::SaveCancelled)?;

        self.spawn_fetch(request.url.clone(), destination);
        Ok(())
    }

    fn poll_failure(&self) -> Option<CodegenError> {
        self.failures.lock().ok()?.try_recv().ok()
    }
}

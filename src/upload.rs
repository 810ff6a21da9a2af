//! Submission client for the remote plotting service.
//!
//! The UI runs a synchronous event loop, so submissions are spawned onto a
//! Tokio runtime and their outcomes travel back over an mpsc channel drained
//! once per tick. Each call to [`Uploader::spawn_submit`] produces one
//! independent request; nothing de-duplicates concurrent submissions.

use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio::runtime::Handle;
use url::Url;

use crate::error::{PilotError, Result};

/// Default endpoint of the plotting service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/plot";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An in-memory handle to a user-selected data file, ready for upload.
///
/// The bytes are read eagerly at selection time so the uploaded content is a
/// snapshot of the file as it was when the user picked it.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Original file name (basename of the selected path).
    pub file_name: String,
    /// Content type derived from the file extension.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Load a file from disk into an attachment.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|source| PilotError::file_read(path.to_path_buf(), source))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            file_name,
            content_type: content_type_for(path).to_string(),
            bytes,
        })
    }

    /// Size of the attachment in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Map a file extension to the content type sent with the upload.
///
/// Unknown extensions fall back to `application/octet-stream`; the extension
/// filter in the file browser is advisory only, so any file can end up here.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

/// HTTP client for the plotting service.
#[derive(Debug, Clone)]
pub struct PlotClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PlotClient {
    /// Build a client for the given endpoint with a per-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PilotError::ClientBuild)?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit one plotting request.
    ///
    /// Sends a single multipart POST with a `prompt` text field and a `file`
    /// part carrying the attachment's bytes, original filename and content
    /// type. Returns the parsed JSON body on a success status. The body's
    /// shape is opaque to this client.
    pub async fn submit(&self, prompt: &str, attachment: &Attachment) -> Result<Value> {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)
            .map_err(PilotError::Request)?;
        let form = Form::new()
            .text("prompt", prompt.to_owned())
            .part("file", part);

        tracing::debug!(
            endpoint = %self.endpoint,
            file = %attachment.file_name,
            bytes = attachment.size(),
            "sending plot request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(PilotError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PilotError::status(status, body));
        }

        response.json().await.map_err(PilotError::InvalidResponse)
    }
}

/// Outcome of one submission, delivered back to the UI thread.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The service accepted the request; holds the parsed response body.
    Success(Value),
    /// The request failed at any stage (transport, status, JSON parsing).
    Failure(PilotError),
}

/// Bridges the synchronous event loop and the async [`PlotClient`].
#[derive(Debug)]
pub struct Uploader {
    handle: Handle,
    client: PlotClient,
    outcome_tx: Sender<SubmissionOutcome>,
}

impl Uploader {
    /// Create an uploader that spawns onto `handle` and reports outcomes on
    /// `outcome_tx`.
    pub fn new(handle: Handle, client: PlotClient, outcome_tx: Sender<SubmissionOutcome>) -> Self {
        Self {
            handle,
            client,
            outcome_tx,
        }
    }

    /// The endpoint submissions are posted to.
    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    /// Spawn one submission and return immediately.
    ///
    /// The prompt and attachment are snapshotted here; later edits or
    /// re-selections do not affect an in-flight request.
    pub fn spawn_submit(&self, prompt: String, attachment: Attachment) {
        let client = self.client.clone();
        let outcome_tx = self.outcome_tx.clone();

        self.handle.spawn(async move {
            let outcome = match client.submit(&prompt, &attachment).await {
                Ok(value) => SubmissionOutcome::Success(value),
                Err(err) => SubmissionOutcome::Failure(err),
            };
            // The receiver is gone when the app is shutting down; outcomes
            // can be dropped at that point.
            let _ = outcome_tx.send(outcome);
        });
    }
}

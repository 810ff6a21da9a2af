//! Application state and logic.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use tokio::runtime::Handle;
use url::Url;

use crate::composer::ComposerState;
use crate::file_browser::FileBrowserState;
use crate::notice::Notice;
use crate::ui::formatters::format_size;
use crate::upload::{Attachment, PlotClient, SubmissionOutcome, Uploader};

/// Notice shown when submit is pressed without a selected file.
pub const MSG_MISSING_FILE: &str = "Please upload a file.";
/// Notice shown when the plotting service accepted the request.
pub const MSG_SUCCESS: &str = "Data sent to backend successfully!";
/// Notice shown on any submission failure.
pub const MSG_FAILURE: &str = "Something went wrong!";

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Prompt composer state.
    pub composer: ComposerState,
    /// Currently selected data file, loaded into memory.
    pub attachment: Option<Attachment>,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// File browser mode.
    pub file_browser_mode: bool,
    /// Active modal notice, if any.
    pub notice: Option<Notice>,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Number of submissions awaiting a response.
    pub in_flight: usize,
    uploader: Uploader,
    outcomes: Receiver<SubmissionOutcome>,
}

impl App {
    /// Create a new application instance.
    ///
    /// `start` may be a data file to preselect or a directory to open the
    /// file browser in.
    pub fn new(start: Option<PathBuf>, handle: Handle, client: PlotClient) -> Self {
        let (outcome_tx, outcomes) = mpsc::channel();
        let uploader = Uploader::new(handle, client, outcome_tx);

        let mut app = Self {
            composer: ComposerState::new(),
            attachment: None,
            file_browser: FileBrowserState::new(),
            file_browser_mode: false,
            notice: None,
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
            in_flight: 0,
            uploader,
            outcomes,
        };

        match start {
            Some(path) if path.is_dir() => {
                app.file_browser.current_dir = path;
                app.file_browser.load_directory();
                app.file_browser_mode = true;
            },
            Some(path) => {
                app.select_file(&path);
            },
            None => {},
        }

        app
    }

    /// The endpoint submissions are posted to.
    pub fn endpoint(&self) -> &Url {
        self.uploader.endpoint()
    }

    /// Open the file browser, starting next to the current selection.
    pub fn open_file_browser(&mut self) {
        self.file_browser.load_directory();
        self.file_browser_mode = true;
        self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
    }

    /// Leave the file browser without changing the selection.
    pub fn cancel_file_browser(&mut self) {
        self.file_browser_mode = false;
        self.status = "Ready".to_string();
    }

    /// Confirm the browser's current entry: descend into directories, select
    /// files.
    pub fn browser_select(&mut self) {
        if let Some(path) = self.file_browser.select_current() {
            self.file_browser_mode = false;
            self.select_file(&path);
        } else {
            self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
        }
    }

    /// Replace the selected file with the one at `path`.
    ///
    /// The file is read fully into memory; a read failure keeps the previous
    /// selection.
    pub fn select_file(&mut self, path: &Path) {
        match Attachment::from_path(path) {
            Ok(attachment) => {
                self.status = format!(
                    "Selected {} ({})",
                    attachment.file_name,
                    format_size(attachment.size())
                );
                tracing::info!(file = %attachment.file_name, bytes = attachment.size(), "file selected");
                self.attachment = Some(attachment);

                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.file_browser.current_dir = parent.to_path_buf();
                }
            },
            Err(e) => {
                self.status = "Error reading file".to_string();
                self.notice = Some(Notice::error(format!(
                    "Could not read {}",
                    path.display()
                )));
                tracing::error!(error = %e, "failed to read selected file");
            },
        }
    }

    /// Clear the selected file.
    pub fn clear_file(&mut self) {
        self.attachment = None;
        self.status = "Selection cleared".to_string();
    }

    /// Clear the prompt text.
    pub fn clear_prompt(&mut self) {
        self.composer.clear();
        self.status = "Prompt cleared".to_string();
    }

    /// Submit the current prompt and file to the plotting service.
    ///
    /// Without a selected file this raises the missing-file notice and never
    /// touches the network. Otherwise one request is spawned per call;
    /// pressing submit again while a request is in flight starts a second,
    /// independent request.
    pub fn submit(&mut self) {
        let Some(attachment) = self.attachment.clone() else {
            self.notice = Some(Notice::error(MSG_MISSING_FILE));
            return;
        };

        let prompt = self.composer.text();
        tracing::info!(
            file = %attachment.file_name,
            prompt_len = prompt.len(),
            "submitting plot request"
        );
        self.uploader.spawn_submit(prompt, attachment);
        self.in_flight += 1;
        self.status = "Submitting plot request...".to_string();
    }

    /// Apply all submission outcomes that have arrived since the last tick.
    ///
    /// Returns how many were processed.
    pub fn drain_outcomes(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.handle_outcome(outcome);
            processed += 1;
        }
        processed
    }

    fn handle_outcome(&mut self, outcome: SubmissionOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            SubmissionOutcome::Success(value) => {
                tracing::info!(response = %value, "plot request accepted");
                self.notice = Some(Notice::info(MSG_SUCCESS));
                self.status = "Plot request sent".to_string();
            },
            SubmissionOutcome::Failure(e) => {
                tracing::error!(error = %e, "plot request failed");
                self.notice = Some(Notice::error(MSG_FAILURE));
                self.status = "Plot request failed".to_string();
            },
        }
    }

    /// Dismiss the active notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Move cursor up in file browser.
    pub fn browser_up(&mut self) {
        self.file_browser.cursor_up();
    }

    /// Move cursor down in file browser.
    pub fn browser_down(&mut self) {
        self.file_browser.cursor_down();
    }

    /// Navigate to parent directory in file browser.
    pub fn browser_parent(&mut self) {
        self.file_browser.go_to_parent();
        self.status = format!("Browsing: {}", self.file_browser.current_dir.display());
    }

    /// Toggle show hidden files in the browser.
    pub fn toggle_hidden(&mut self) {
        self.file_browser.toggle_hidden();
        self.status = format!(
            "Show hidden: {}",
            if self.file_browser.show_hidden {
                "ON"
            } else {
                "OFF"
            }
        );
    }

    /// Toggle the browser's extension filter.
    pub fn toggle_all_files(&mut self) {
        self.file_browser.toggle_all();
        self.status = if self.file_browser.show_all {
            "Showing all files".to_string()
        } else {
            "Showing csv/xlsx/xls".to_string()
        };
    }
}

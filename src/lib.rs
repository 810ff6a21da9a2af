//! Plot Pilot - a terminal front-end for a remote plotting service.
//!
//! Plot Pilot lets you type a natural-language plotting request, pick a
//! spreadsheet/CSV file from the local filesystem, and submit both to the
//! plotting service as a single multipart upload.
//!
//! # Features
//!
//! - Multi-line prompt composer with a placeholder and cursor tracking
//! - File browser scoped to data-file extensions (csv, xlsx, xls), with an
//!   escape hatch to show everything
//! - Multipart HTTP submission with a per-request timeout, run off the UI
//!   thread
//! - Modal success/failure notices
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use plot_pilot::upload::{Attachment, PlotClient};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let client = PlotClient::new("http://localhost:5000/plot".parse()?, Duration::from_secs(30))?;
//! let attachment = Attachment::from_path(Path::new("sales.csv"))?;
//! let response = client.submit("plot revenue by region", &attachment).await?;
//! println!("service answered: {response}");
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod composer;
pub mod error;
pub mod file_browser;
pub mod notice;
pub mod ui;
pub mod upload;

pub use error::{PilotError, Result};

#![warn(missing_docs)]

//! Page weight measurement library that drives headless chrome to
//! tally network transfer and capture whole page snapshots.
//!
//! `pageweight` answers one question per url: how heavy is this page?
//! Each job launches its own scoped browser over the DevTools protocol,
//! triggers lazy loaded and video content, and folds every failure into
//! a tagged outcome. A bounded task pool fans a url list out over a
//! fixed number of workers and streams progress as jobs finish, in
//! completion order.
//!
//! # How to use pageweight
//!
//! There are two jobs pageweight can run over a url list:
//!
//! - **Measure** tallies responded requests and transferred megabytes.
//!   - [`measure::measure_url`] runs one url and never fails the batch.
//! - **Snapshot** saves the page as an MHTML file.
//!   - [`snapshot::snapshot_url`] captures one url to a directory.
//!
//! Both plug into [`runner::TaskPool::run`] as the execute function.
//!
//! # Basic usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pageweight::configuration::Configuration;
//! use pageweight::measure::measure_url;
//! use pageweight::runner::{ConsoleProgress, TaskPool};
//! use pageweight::urls::normalize_url;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Arc::new(Configuration::new());
//!     let pool = TaskPool::new(config.concurrency);
//!
//!     let jobs = vec![
//!         normalize_url("example.com"),
//!         normalize_url("spider.cloud"),
//!     ];
//!
//!     let outcomes = pool
//!         .run(
//!             jobs,
//!             {
//!                 let config = config.clone();
//!                 move |url: String| {
//!                     let config = config.clone();
//!                     async move { measure_url(&config, &url).await }
//!                 }
//!             },
//!             &ConsoleProgress,
//!         )
//!         .await;
//!
//!     assert_eq!(outcomes.len(), 2);
//! }
//! ```

pub extern crate chromiumoxide;
pub extern crate tokio;
pub extern crate url;

/// Browser session management and page driving helpers.
pub mod chrome;
/// Configuration structure for a run.
pub mod configuration;
/// Crate error type and result alias.
pub mod error;
/// Network weight measurement of a page.
pub mod measure;
/// CSV reports and value formatting.
pub mod report;
/// Bounded task pool with completion ordered progress.
pub mod runner;
/// MHTML snapshot capture.
pub mod snapshot;
/// Url list input and normalization.
pub mod urls;
/// Application utils.
pub mod utils;

pub use configuration::Configuration;
pub use error::{Error, Result};
pub use measure::{MeasureOutcome, PageStats};
pub use runner::{ConsoleProgress, ProgressSink, Summarize, TaskPool};
pub use snapshot::SnapshotOutcome;

use std::path::PathBuf;

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Errors surfaced while loading input, driving chrome, or writing reports.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL list file could not be read.
    #[error("unable to read url list {}: {source}", path.display())]
    UrlList {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying io failure.
        #[source]
        source: std::io::Error,
    },
    /// Building the browser launch configuration failed.
    #[error("browser config: {0}")]
    BrowserConfig(String),
    /// A devtools command failed.
    #[error(transparent)]
    Cdp(#[from] CdpError),
    /// Snapshot or report io failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// CSV writing failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A page script returned an unexpected value.
    #[error("script value: {0}")]
    ScriptValue(#[from] serde_json::Error),
}

/// Result type alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_list_error_names_the_path() {
        let err = Error::UrlList {
            path: PathBuf::from("urls.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("urls.txt"), "got: {rendered}");
        assert!(rendered.contains("missing"), "got: {rendered}");
    }

    #[test]
    fn browser_config_error_keeps_the_message() {
        let err = Error::BrowserConfig("no executable found".into());
        assert_eq!(err.to_string(), "browser config: no executable found");
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }
}

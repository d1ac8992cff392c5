use std::path::Path;

use chromiumoxide::cdp::browser_protocol::page::{CaptureSnapshotFormat, CaptureSnapshotParams};
use log::warn;

use crate::chrome::{self, BrowserSession};
use crate::configuration::Configuration;
use crate::error::Result;
use crate::report::{mb_from_bytes, SIZE_ERROR_MARKER};
use crate::runner::Summarize;
use crate::utils::log;

/// Outcome of capturing one url to disk.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    /// The snapshot file was written.
    Saved {
        /// The url as given on input.
        url: String,
        /// Size of the serialized snapshot, three decimal megabytes.
        size_mb: f64,
    },
    /// The job failed before a file existed.
    Failed {
        /// The url as given on input.
        url: String,
        /// What went wrong.
        reason: String,
    },
}

impl Summarize for SnapshotOutcome {
    fn summary(&self) -> String {
        match self {
            SnapshotOutcome::Saved { url, size_mb } => format!("{url}: size={size_mb:.3} MB"),
            SnapshotOutcome::Failed { url, .. } => format!("{url}: size={SIZE_ERROR_MARKER}"),
        }
    }
}

/// Derive the snapshot filename stem from a url.
///
/// The scheme and a leading `www.` are dropped; every remaining character
/// outside ASCII alphanumerics becomes an underscore.
pub fn snapshot_stem(url: &str) -> String {
    let trimmed = url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);

    without_www
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Capture one url as an MHTML file under `dir`.
///
/// All failures are absorbed into the returned outcome. The browser
/// session is scoped to this call and shut down on every path.
pub async fn snapshot_url(config: &Configuration, dir: &Path, url: &str) -> SnapshotOutcome {
    log("capturing", url);

    let session = match BrowserSession::launch(config).await {
        Ok(session) => session,
        Err(err) => {
            warn!("browser launch failed for {url}: {err}");
            return SnapshotOutcome::Failed {
                url: url.to_string(),
                reason: err.to_string(),
            };
        }
    };

    let captured = capture_page(&session, config, dir, url).await;

    session.shutdown().await;

    match captured {
        Ok(size_mb) => SnapshotOutcome::Saved {
            url: url.to_string(),
            size_mb,
        },
        Err(err) => {
            warn!("snapshot failed for {url}: {err}");
            SnapshotOutcome::Failed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

/// Load the page, settle lazy content, and write the MHTML serialization.
async fn capture_page(
    session: &BrowserSession,
    config: &Configuration,
    dir: &Path,
    url: &str,
) -> Result<f64> {
    let page = session.new_page("about:blank").await?;

    page.goto(url).await?;
    page.wait_for_navigation().await?;

    chrome::scroll_to_bottom(&page, config.scroll_pause, config.max_scrolls).await?;

    let mut params = CaptureSnapshotParams::default();
    params.format = Some(CaptureSnapshotFormat::Mhtml);

    let snapshot = page.execute(params).await?.result.data;

    let path = dir.join(format!("{}.mhtml", snapshot_stem(url)));
    tokio::fs::write(&path, &snapshot).await?;

    Ok(mb_from_bytes(snapshot.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_drop_scheme_and_leading_www() {
        assert_eq!(
            snapshot_stem("https://www.example.com/path?q=1"),
            "example_com_path_q_1"
        );
        assert_eq!(snapshot_stem("http://example.com"), "example_com");
        assert_eq!(snapshot_stem("example.com"), "example_com");
    }

    #[test]
    fn stems_only_strip_www_at_the_front() {
        assert_eq!(
            snapshot_stem("https://cdn.www.example.com"),
            "cdn_www_example_com"
        );
    }

    #[test]
    fn summaries_carry_size_or_the_error_marker() {
        let saved = SnapshotOutcome::Saved {
            url: "https://example.com".into(),
            size_mb: 0.512,
        };
        assert_eq!(saved.summary(), "https://example.com: size=0.512 MB");

        let failed = SnapshotOutcome::Failed {
            url: "https://broken.example".into(),
            reason: "capture failed".into(),
        };
        assert_eq!(failed.summary(), "https://broken.example: size=ERROR");
    }
}

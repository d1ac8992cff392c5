use std::path::Path;

use url::Url;

use crate::error::{Error, Result};

/// Read a newline delimited URL list. Lines are trimmed and blank lines are
/// skipped. An unreadable file is the one fatal input error of a run.
pub async fn read_url_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::UrlList {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Ensure the URL carries a scheme, defaulting to https.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Display domain for a URL: the host without a leading `www.`. The parser
/// already excludes the port. Falls back to the raw input when the URL does
/// not parse, so report rows keep a meaningful label.
pub fn display_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => url.trim().to_string(),
        },
        Err(_) => url.trim().to_string(),
    }
}

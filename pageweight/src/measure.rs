use std::sync::Arc;

use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFinished, EventResponseReceived, Headers,
};
use dashmap::DashMap;
use futures::StreamExt;
use log::warn;
use serde_json::Value;

use crate::chrome::{self, BrowserSession};
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::report::mb_from_bytes;
use crate::runner::Summarize;
use crate::urls::display_domain;
use crate::utils::log;

/// Network totals for one fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStats {
    /// Display domain of the measured url.
    pub domain: String,
    /// Requests that received a response.
    pub request_count: usize,
    /// Transferred megabytes, rounded to three decimals.
    pub total_mb: f64,
}

/// Outcome of measuring one url.
///
/// A page that genuinely produced no traffic is `Complete` with zeros; a
/// job that crashed is `Failed` with the reason, so the two can never be
/// confused downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureOutcome {
    /// The page loaded and its traffic was tallied.
    Complete(PageStats),
    /// The job failed before a tally existed.
    Failed {
        /// Display domain of the url that failed.
        domain: String,
        /// What went wrong.
        reason: String,
    },
}

impl Summarize for MeasureOutcome {
    fn summary(&self) -> String {
        match self {
            MeasureOutcome::Complete(stats) => format!(
                "{}: requests={}, size={:.3} MB",
                stats.domain, stats.request_count, stats.total_mb
            ),
            MeasureOutcome::Failed { domain, .. } => {
                format!("{domain}: requests=0, size=0.000 MB")
            }
        }
    }
}

/// Byte accounting for a single request id.
#[derive(Debug, Default)]
struct ResponseRecord {
    /// A response arrived for the request.
    responded: bool,
    /// Size taken from the Content-Length response header.
    header_bytes: Option<u64>,
    /// Encoded size reported when the transfer finished.
    wire_bytes: Option<u64>,
}

/// Measure the network weight of one url.
///
/// All failures are absorbed into the returned outcome. The browser
/// session is scoped to this call and shut down on every path.
pub async fn measure_url(config: &Configuration, url: &str) -> MeasureOutcome {
    let domain = display_domain(url);

    log("measuring", url);

    let session = match BrowserSession::launch(config).await {
        Ok(session) => session,
        Err(err) => {
            warn!("browser launch failed for {url}: {err}");
            return MeasureOutcome::Failed {
                domain,
                reason: err.to_string(),
            };
        }
    };

    let measured = measure_page(&session, config, url).await;

    session.shutdown().await;

    match measured {
        Ok((request_count, total_mb)) => MeasureOutcome::Complete(PageStats {
            domain,
            request_count,
            total_mb,
        }),
        Err(err) => {
            warn!("measurement failed for {url}: {err}");
            MeasureOutcome::Failed {
                domain,
                reason: err.to_string(),
            }
        }
    }
}

/// Drive the page and tally its traffic.
///
/// Listeners are attached before navigation starts so the first responses
/// are never missed.
async fn measure_page(
    session: &BrowserSession,
    config: &Configuration,
    url: &str,
) -> Result<(usize, f64)> {
    let page = session.new_page("about:blank").await?;

    let records: Arc<DashMap<String, ResponseRecord>> = Arc::new(DashMap::new());

    let mut responses = page.event_listener::<EventResponseReceived>().await?;
    let mut finished = page.event_listener::<EventLoadingFinished>().await?;

    let response_records = records.clone();
    let response_task = tokio::spawn(async move {
        while let Some(event) = responses.next().await {
            let mut record = response_records
                .entry(event.request_id.inner().to_string())
                .or_default();
            record.responded = true;
            if record.header_bytes.is_none() {
                record.header_bytes = content_length(&event.response.headers);
            }
        }
    });

    let finished_records = records.clone();
    let finished_task = tokio::spawn(async move {
        while let Some(event) = finished.next().await {
            let mut record = finished_records
                .entry(event.request_id.inner().to_string())
                .or_default();
            record.wire_bytes = Some(event.encoded_data_length.max(0.0) as u64);
        }
    });

    let navigated = async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;

        chrome::scroll_to_bottom(&page, config.scroll_pause, config.max_scrolls).await?;
        chrome::play_videos(&page).await;
        tokio::time::sleep(config.video_wait).await;

        Ok::<(), Error>(())
    }
    .await;

    response_task.abort();
    finished_task.abort();

    navigated?;

    let (request_count, total_bytes) = tally_totals(&records);

    Ok((request_count, mb_from_bytes(total_bytes)))
}

/// Fold the per request records into a request count and byte total.
///
/// A request only counts once a response arrived for it. The header size
/// wins over the wire size; a responded request with neither adds zero.
fn tally_totals(records: &DashMap<String, ResponseRecord>) -> (usize, u64) {
    let mut request_count = 0;
    let mut total_bytes = 0;

    for entry in records.iter() {
        let record = entry.value();
        if !record.responded {
            continue;
        }
        request_count += 1;
        total_bytes += record.header_bytes.or(record.wire_bytes).unwrap_or(0);
    }

    (request_count, total_bytes)
}

fn content_length(headers: &Headers) -> Option<u64> {
    content_length_value(headers.inner())
}

/// Pull a Content-Length value out of a raw header map, any capitalization.
fn content_length_value(headers: &Value) -> Option<u64> {
    let map = headers.as_object()?;

    for (name, value) in map {
        if name.eq_ignore_ascii_case("content-length") {
            return match value {
                Value::String(s) => s.trim().parse().ok(),
                Value::Number(n) => n.as_u64(),
                _ => None,
            };
        }
    }

    None
}

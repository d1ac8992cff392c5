use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::measure::MeasureOutcome;
use crate::snapshot::SnapshotOutcome;

/// Header row of the measurement CSV.
pub const MEASURE_HEADERS: [&str; 3] = ["domain", "request_count", "total_mb"];

/// Header row of the snapshot CSV.
pub const SNAPSHOT_HEADERS: [&str; 2] = ["URL", "size_mb"];

/// Marker written to the size column when a snapshot failed.
pub const SIZE_ERROR_MARKER: &str = "ERROR";

/// Convert a byte count to megabytes rounded to three decimals.
pub fn mb_from_bytes(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 1000.0).round() / 1000.0
}

/// Render a megabyte value with exactly three decimals.
pub fn format_mb(mb: f64) -> String {
    format!("{mb:.3}")
}

/// Render an elapsed duration as whole minutes and seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}m {}s", total / 60, total % 60)
}

/// Write the measurement CSV, one row per outcome in completion order.
///
/// Failed pages keep the zeroed row shape so downstream consumers of the
/// file see a stable column layout.
pub fn write_measure_report(
    path: impl AsRef<Path>,
    outcomes: &[MeasureOutcome],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(MEASURE_HEADERS)?;

    for outcome in outcomes {
        let row: [String; 3] = match outcome {
            MeasureOutcome::Complete(stats) => [
                stats.domain.clone(),
                stats.request_count.to_string(),
                format_mb(stats.total_mb),
            ],
            MeasureOutcome::Failed { domain, .. } => {
                [domain.clone(), 0.to_string(), format_mb(0.0)]
            }
        };
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Write the snapshot CSV, one row per outcome in completion order.
pub fn write_snapshot_report(
    path: impl AsRef<Path>,
    outcomes: &[SnapshotOutcome],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(SNAPSHOT_HEADERS)?;

    for outcome in outcomes {
        let row: [String; 2] = match outcome {
            SnapshotOutcome::Saved { url, size_mb } => [url.clone(), format_mb(*size_mb)],
            SnapshotOutcome::Failed { url, .. } => {
                [url.clone(), SIZE_ERROR_MARKER.to_string()]
            }
        };
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::PageStats;
    use crate::runner::{ProgressSink, TaskPool};
    use std::sync::Mutex;

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = vec![headers];
        for record in reader.records() {
            rows.push(record.unwrap().iter().map(str::to_string).collect());
        }
        rows
    }

    #[test]
    fn megabytes_round_to_three_decimals() {
        assert_eq!(mb_from_bytes(0), 0.0);
        assert_eq!(mb_from_bytes(1024 * 1024), 1.0);
        assert_eq!(mb_from_bytes(1_294_000), 1.234);
    }

    #[test]
    fn formatted_megabytes_survive_a_round_trip() {
        assert_eq!(format_mb(1.2), "1.200");
        assert_eq!(format_mb(0.0), "0.000");

        let rendered = format_mb(mb_from_bytes(1_294_000));
        let reparsed: f64 = rendered.parse().unwrap();
        assert_eq!(format_mb(reparsed), rendered);
    }

    #[test]
    fn elapsed_renders_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0m 0s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "62m 5s");
    }

    #[test]
    fn measure_report_rows_match_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let outcomes = vec![
            MeasureOutcome::Complete(PageStats {
                domain: "example.com".into(),
                request_count: 42,
                total_mb: 1.234,
            }),
            MeasureOutcome::Failed {
                domain: "broken.example".into(),
                reason: "navigation timed out".into(),
            },
        ];

        write_measure_report(&path, &outcomes).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0], vec!["domain", "request_count", "total_mb"]);
        assert_eq!(rows[1], vec!["example.com", "42", "1.234"]);
        assert_eq!(rows[2], vec!["broken.example", "0", "0.000"]);
    }

    #[test]
    fn snapshot_report_marks_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.csv");

        let outcomes = vec![
            SnapshotOutcome::Saved {
                url: "https://example.com".into(),
                size_mb: 0.512,
            },
            SnapshotOutcome::Failed {
                url: "https://broken.example".into(),
                reason: "capture failed".into(),
            },
        ];

        write_snapshot_report(&path, &outcomes).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0], vec!["URL", "size_mb"]);
        assert_eq!(rows[1], vec!["https://example.com", "0.512"]);
        assert_eq!(rows[2], vec!["https://broken.example", "ERROR"]);
    }

    #[derive(Default)]
    struct RecordingProgress {
        lines: Mutex<Vec<(usize, usize, String)>>,
    }

    impl ProgressSink for RecordingProgress {
        fn completed(&self, completed: usize, total: usize, summary: &str) {
            self.lines
                .lock()
                .unwrap()
                .push((completed, total, summary.to_string()));
        }
    }

    #[tokio::test]
    async fn stubbed_batch_produces_matching_rows_and_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let pool = TaskPool::new(2);
        let progress = RecordingProgress::default();

        let jobs = vec![
            ("one.example".to_string(), 3usize, 1_294_000u64),
            ("two.example".to_string(), 7usize, 0u64),
        ];
        let outcomes = pool
            .run(
                jobs,
                |(domain, request_count, bytes)| async move {
                    MeasureOutcome::Complete(PageStats {
                        domain,
                        request_count,
                        total_mb: mb_from_bytes(bytes),
                    })
                },
                &progress,
            )
            .await;

        write_measure_report(&path, &outcomes).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        for (row, outcome) in rows[1..].iter().zip(&outcomes) {
            let MeasureOutcome::Complete(stats) = outcome else {
                panic!("stub jobs never fail");
            };
            assert_eq!(row[0], stats.domain);
            assert_eq!(row[1], stats.request_count.to_string());
            assert_eq!(row[2], format_mb(stats.total_mb));
        }

        let lines = progress.lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, 1);
        assert_eq!(lines[1].0, 2);
        assert!(lines.iter().all(|(_, total, _)| *total == 2));
        assert!(lines
            .iter()
            .all(|(_, _, summary)| summary.contains("requests=")));
    }
}

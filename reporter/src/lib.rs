//! # Channel Reporter
//!
//! Turns the dataset written by the collector into a static HTML dashboard.
//!
//! ## Architecture
//!
//! - **`duration`**: ISO 8601 duration parsing
//! - **`derive`**: per-video columns computed for the report ([`DerivedRow`])
//! - **`stats`**: Pearson correlation, date ordering and the views leaderboard
//! - **`render`**: the 2x2 SVG dashboard (views trend, duration vs views,
//!   top videos, correlation matrix) inside a self-contained HTML page
//! - **`summary`**: headline numbers as a terminal table or JSON
//!
//! ## Usage
//!
//! ```no_run
//! use channel_insights_reporter::Report;
//!
//! let report = Report::load("youtube_data.csv")?;
//! report.write("youtube_dashboard.html")?;
//! println!("{}", report.format());
//! # Ok::<(), channel_insights_reporter::ReporterError>(())
//! ```

#[macro_use]
extern crate tracing;

pub mod derive;
pub mod duration;
mod error;
mod render;
pub mod stats;
mod summary;

pub use derive::DerivedRow;
pub use duration::{
    parse_duration,
    DurationParseError,
};
pub use error::ReporterError;
pub use render::{
    DASHBOARD_TITLE,
    PANEL_TITLES,
};
pub use stats::CorrelationMatrix;
pub use summary::{
    ReportSummary,
    TopVideo,
};

use channel_insights_dataset::VideoRecord;
use std::{
    fs,
    path::Path,
};

/// A loaded dataset with its derived columns and correlation matrix.
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<DerivedRow>,
    correlation: CorrelationMatrix,
}

impl Report {
    /// Reads the dataset file. A missing file is [`ReporterError::MissingInput`].
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let records = channel_insights_dataset::read_records(path.as_ref())?;
        info!(videos = records.len(), "dataset loaded");
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<VideoRecord>) -> Self {
        let rows = records.into_iter().map(DerivedRow::new).collect::<Vec<_>>();
        let correlation = CorrelationMatrix::from_rows(&rows);
        Self { rows, correlation }
    }

    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// The dashboard as an HTML document.
    pub fn render(&self) -> String {
        render::render_dashboard(&self.rows, &self.correlation)
    }

    /// Writes the dashboard to `path`, replacing any previous report.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ReporterError> {
        let path = path.as_ref();
        let io_err = |source| ReporterError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.render()).map_err(io_err)?;
        info!(path = %path.display(), "dashboard written");
        Ok(())
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_rows(&self.rows)
    }

    /// Writes [`Report::summary`] as pretty JSON.
    pub fn write_summary(&self, path: impl AsRef<Path>) -> Result<(), ReporterError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.summary()).map_err(|err| ReporterError::Io {
            path: path.to_path_buf(),
            source: err.into(),
        })?;
        fs::write(path, json).map_err(|source| ReporterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "summary exported");
        Ok(())
    }

    pub fn format(&self) -> String {
        self.summary().format()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{
        TimeZone,
        Utc,
    };
    use pretty_assertions::assert_eq;
    use temp_dir::TempDir;

    fn records() -> Vec<VideoRecord> {
        [(100, 10, 5, "PT2M"), (0, 0, 0, "PT1M"), (50, 1, 1, "PT10M")]
            .into_iter()
            .enumerate()
            .map(|(i, (views, likes, comments, duration))| VideoRecord {
                title: format!("Video {i}"),
                view_count: views,
                like_count: likes,
                comment_count: comments,
                published_at: Utc.with_ymd_and_hms(2024, 4, i as u32 + 1, 18, 0, 0).unwrap(),
                duration: duration.to_string(),
            })
            .collect()
    }

    #[test]
    fn missing_dataset_asks_for_a_collection_run() {
        let dir = TempDir::new().unwrap();
        let err = Report::load(dir.child("youtube_data.csv")).unwrap_err();
        assert!(matches!(err, ReporterError::MissingInput(_)));
        assert!(err.to_string().contains("channel-insights collect"));
    }

    #[test]
    fn loads_and_derives_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("youtube_data.csv");
        channel_insights_dataset::write_records(&path, &records()).unwrap();

        let report = Report::load(&path).unwrap();
        let rates = report.rows().iter().map(|row| row.engagement_rate).collect::<Vec<_>>();
        assert_eq!(rates, vec![15.0, 0.0, 4.0]);
        assert_eq!(report.correlation().get(0, 0), Some(1.0));
    }

    #[test]
    fn writes_and_overwrites_the_dashboard() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("out").join("youtube_dashboard.html");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let report = Report::from_records(records());
        report.write(&path).unwrap();

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("stale"));
        for title in PANEL_TITLES {
            assert!(html.contains(title));
        }
    }

    #[test]
    fn empty_dataset_still_renders() {
        let report = Report::from_records(Vec::new());
        assert_eq!(report.render().matches("No data").count(), 4);
        assert_eq!(report.summary().videos, 0);
    }

    #[test]
    fn exports_summary_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("summary.json");
        Report::from_records(records()).write_summary(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["videos"], 3);
        assert_eq!(json["top_video"]["title"], "Video 0");
    }
}

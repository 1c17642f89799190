//! # Channel Dataset
//!
//! The intermediate tabular file shared by the collector and the reporter.
//!
//! The file is plain CSV with a header row and one row per video:
//!
//! ```text
//! Title,Views,Likes,Comments,Date,Duration_ISO
//! Intro to Rust,1200,80,12,2024-01-05T10:00:00Z,PT10M30S
//! ```
//!
//! `Date` is written as RFC 3339 in UTC and `Duration_ISO` is kept verbatim as
//! the platform returned it, so every field survives a write/read cycle as
//! text. Nothing else is shared between the two halves of the tool.

#[macro_use]
extern crate tracing;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fs::File,
    io,
    path::{
        Path,
        PathBuf,
    },
};

/// Column order of the tabular file.
pub const HEADER: [&str; 6] = ["Title", "Views", "Likes", "Comments", "Date", "Duration_ISO"];

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to access dataset file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// One collected upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Views")]
    pub view_count: u64,
    #[serde(rename = "Likes")]
    pub like_count: u64,
    #[serde(rename = "Comments")]
    pub comment_count: u64,
    #[serde(rename = "Date")]
    pub published_at: DateTime<Utc>,
    /// ISO 8601 duration text, e.g. `PT10M30S`.
    #[serde(rename = "Duration_ISO")]
    pub duration: String,
}

/// Serializes `records` as CSV (header included) into `writer`.
pub fn write_to<W: io::Write>(writer: W, records: &[VideoRecord]) -> Result<(), DatasetError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        // `serialize` only emits the header together with the first row.
        wtr.write_record(HEADER)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads every row from `reader`, which must start with the header row.
pub fn read_from<R: io::Read>(reader: R) -> Result<Vec<VideoRecord>, DatasetError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<VideoRecord>, _>>()?;
    Ok(records)
}

/// Writes the dataset to `path`, replacing any existing file.
pub fn write_records(path: impl AsRef<Path>, records: &[VideoRecord]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    write_to(file, records)?;

    debug!(path = %path.display(), rows = records.len(), "dataset written");
    Ok(())
}

/// Loads the dataset from `path`.
///
/// A missing file is reported as [`DatasetError::NotFound`] so callers can
/// tell "nothing collected yet" apart from a broken file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<VideoRecord>, DatasetError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(DatasetError::NotFound(path.to_path_buf())),
        Err(source) => {
            return Err(DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let records = read_from(file)?;

    debug!(path = %path.display(), rows = records.len(), "dataset loaded");
    Ok(records)
}

/// A count with thousands separators, e.g. `1,234,567`.
pub fn format_thousands(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<VideoRecord> {
        vec![
            VideoRecord {
                title: "Rust in 100 seconds, \"quoted\"".to_string(),
                view_count: 1_204_332,
                like_count: 50_000,
                comment_count: 1_200,
                published_at: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
                duration: "PT1M40S".to_string(),
            },
            VideoRecord {
                title: "Live stream\nwith a newline".to_string(),
                view_count: 0,
                like_count: 0,
                comment_count: 0,
                published_at: Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
                duration: "P0D".to_string(),
            },
        ]
    }

    #[test]
    fn header_matches_column_order() {
        let mut buf = Vec::new();
        write_to(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "Title,Views,Likes,Comments,Date,Duration_ISO"
        );
        assert!(text.contains("2024-01-05T10:00:00Z"));
    }

    #[test]
    fn records_survive_a_file_round_trip() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("nested").join("data.csv");
        let records = sample();

        write_records(&path, &records).unwrap();
        assert_eq!(read_records(&path).unwrap(), records);
    }

    #[test]
    fn writing_replaces_existing_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("data.csv");

        write_records(&path, &sample()).unwrap();
        write_records(&path, &sample()[..1]).unwrap();
        assert_eq!(read_records(&path).unwrap().len(), 1);
    }

    #[test]
    fn empty_dataset_keeps_header() {
        let mut buf = Vec::new();
        write_to(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap().trim_end(), HEADER.join(","));
        assert_eq!(read_from(buf.as_slice()).unwrap(), vec![]);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("absent.csv");
        assert!(matches!(read_records(&path), Err(DatasetError::NotFound(p)) if p == path));
    }

    #[test]
    fn counts_use_thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }
}

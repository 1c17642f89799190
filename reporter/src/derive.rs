use crate::duration::parse_duration;
use channel_insights_dataset::VideoRecord;
use chrono::NaiveDate;

/// Longest title shown unabridged on the leaderboard.
pub const SHORT_TITLE_CHARS: usize = 35;
const ELLIPSIS: &str = "...";

/// A dataset row plus the columns computed for the report. Never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub record: VideoRecord,
    pub duration_minutes: f64,
    pub engagement_rate: f64,
    pub short_title: String,
    pub date: NaiveDate,
}

impl DerivedRow {
    pub fn new(record: VideoRecord) -> Self {
        let duration_minutes = duration_minutes(&record.duration);
        let engagement_rate = engagement_rate(record.view_count, record.like_count, record.comment_count);
        let short_title = short_title(&record.title);
        let date = record.published_at.date_naive();

        Self {
            record,
            duration_minutes,
            engagement_rate,
            short_title,
            date,
        }
    }

    pub fn views(&self) -> f64 {
        self.record.view_count as f64
    }

    pub fn likes(&self) -> f64 {
        self.record.like_count as f64
    }

    pub fn comments(&self) -> f64 {
        self.record.comment_count as f64
    }
}

/// Length of an ISO 8601 duration in minutes; unparseable text counts as zero.
pub fn duration_minutes(iso: &str) -> f64 {
    match parse_duration(iso) {
        Ok(duration) => duration.as_secs_f64() / 60.0,
        Err(err) => {
            debug!(duration = iso, %err, "unparseable duration, using 0 minutes");
            0.0
        }
    }
}

/// `(likes + comments) / views` in percent, `0.0` for videos without views.
pub fn engagement_rate(views: u64, likes: u64, comments: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    (likes as f64 + comments as f64) * 100.0 / views as f64
}

/// Cuts titles longer than [`SHORT_TITLE_CHARS`] characters and marks the cut with `...`.
pub fn short_title(title: &str) -> String {
    match title.char_indices().nth(SHORT_TITLE_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &title[..cut]),
        None => title.to_string(),
    }
}

use crate::{
    derive::DerivedRow,
    render::format_int,
};
use chrono::NaiveDate;
use comfy_table::{
    presets,
    Attribute,
    Cell,
    Color,
    ContentArrangement,
    Table,
};
use serde::Serialize;

/// Headline numbers of a report, printed next to the dashboard and exportable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub videos: usize,
    pub total_views: u64,
    pub average_views: f64,
    pub average_engagement_rate: f64,
    pub average_duration_minutes: f64,
    pub first_published: Option<NaiveDate>,
    pub last_published: Option<NaiveDate>,
    pub top_video: Option<TopVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopVideo {
    pub title: String,
    pub views: u64,
    pub engagement_rate: f64,
}

impl ReportSummary {
    pub fn from_rows(rows: &[DerivedRow]) -> Self {
        let videos = rows.len();
        let mean = |value: fn(&DerivedRow) -> f64| {
            if videos == 0 {
                0.0
            } else {
                rows.iter().map(value).sum::<f64>() / videos as f64
            }
        };

        // First most viewed wins ties, same as the leaderboard.
        let top_video = rows
            .iter()
            .fold(None::<&DerivedRow>, |best, row| match best {
                Some(best) if best.record.view_count >= row.record.view_count => Some(best),
                _ => Some(row),
            })
            .map(|row| TopVideo {
                title: row.record.title.clone(),
                views: row.record.view_count,
                engagement_rate: row.engagement_rate,
            });

        Self {
            videos,
            total_views: rows.iter().map(|row| row.record.view_count).fold(0, u64::saturating_add),
            average_views: mean(DerivedRow::views),
            average_engagement_rate: mean(|row| row.engagement_rate),
            average_duration_minutes: mean(|row| row.duration_minutes),
            first_published: rows.iter().map(|row| row.date).min(),
            last_published: rows.iter().map(|row| row.date).max(),
            top_video,
        }
    }

    pub fn format(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("📊 REPORT SUMMARY")
                .add_attribute(Attribute::Bold)
                .fg(Color::Cyan)]);

        let date_range = match (self.first_published, self.last_published) {
            (Some(first), Some(last)) => format!("{first} → {last}"),
            _ => "-".to_string(),
        };
        let top_video = self
            .top_video
            .as_ref()
            .map(|top| format!("{} ({} views)", top.title, format_int(top.views as f64)))
            .unwrap_or_else(|| "-".to_string());

        let rows = [
            ("Videos", self.videos.to_string()),
            ("Total Views", format_int(self.total_views as f64)),
            ("Average Views", format_int(self.average_views)),
            ("Avg. Engagement Rate", format!("{:.2}%", self.average_engagement_rate)),
            ("Avg. Duration", format!("{:.1} min", self.average_duration_minutes)),
            ("Published", date_range),
            ("Top Video", top_video),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use channel_insights_dataset::VideoRecord;
    use chrono::{
        TimeZone,
        Utc,
    };
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<DerivedRow> {
        [
            ("First", 100, 10, 5, "PT2M", 3),
            ("Second", 0, 0, 0, "PT1M", 1),
            ("Third", 50, 1, 1, "PT10M", 2),
            ("Fourth", 100, 1, 1, "PT3M", 4),
        ]
        .into_iter()
        .map(|(title, views, likes, comments, duration, day)| {
            DerivedRow::new(VideoRecord {
                title: title.to_string(),
                view_count: views,
                like_count: likes,
                comment_count: comments,
                published_at: Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap(),
                duration: duration.to_string(),
            })
        })
        .collect()
    }

    #[test]
    fn summarizes_rows() {
        let summary = ReportSummary::from_rows(&rows());
        assert_eq!(summary.videos, 4);
        assert_eq!(summary.total_views, 250);
        assert_eq!(summary.average_views, 62.5);
        assert_eq!(summary.average_duration_minutes, 4.0);
        assert_eq!(summary.first_published, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(summary.last_published, NaiveDate::from_ymd_opt(2024, 6, 4));
        assert_eq!(summary.top_video.map(|top| top.title), Some("First".to_string()));
    }

    #[test]
    fn empty_summary_has_no_averages() {
        let summary = ReportSummary::from_rows(&[]);
        assert_eq!(summary.videos, 0);
        assert_eq!(summary.average_views, 0.0);
        assert_eq!(summary.top_video, None);
        assert!(summary.format().contains("Top Video"));
    }

    #[test]
    fn table_lists_headline_numbers() {
        let table = ReportSummary::from_rows(&rows()).format();
        assert!(table.contains("REPORT SUMMARY"));
        assert!(table.contains("First (100 views)"));
        assert!(table.contains("2024-06-01 → 2024-06-04"));
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(ReportSummary::from_rows(&rows())).unwrap();
        assert_eq!(json["videos"], 4);
        assert_eq!(json["first_published"], "2024-06-01");
        assert_eq!(json["top_video"]["views"], 100);
    }
}

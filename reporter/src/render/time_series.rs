use super::{
    no_data,
    scale::{
        format_int,
        x_axis,
        y_axis,
        LinearScale,
    },
    svg::{
        Frame,
        Svg,
    },
};
use crate::{
    derive::DerivedRow,
    stats,
};
use chrono::{
    Datelike,
    NaiveDate,
};

const LINE_COLOR: &str = "#00FFFF";
const LINE_WIDTH: f64 = 3.0;
const MARKER_COLOR: &str = "white";
const MARKER_RADIUS: f64 = 4.0;

/// Views over publication date, oldest first. The x axis counts calendar days.
pub(super) fn draw(svg: &mut Svg, frame: Frame, rows: &[DerivedRow]) {
    let sorted = stats::by_date(rows);
    let days = sorted
        .iter()
        .map(|row| row.date.num_days_from_ce() as f64)
        .collect::<Vec<_>>();
    let Some((first, last)) = stats::extent(days.iter().copied()) else {
        return no_data(svg, frame);
    };
    let max_views = sorted.iter().map(|row| row.views()).fold(0.0, f64::max);

    let plot = frame.inset(70.0, 0.0, 10.0, 30.0);
    let x_domain = if last > first { (first, last) } else { (first - 1.0, last + 1.0) };
    let x = LinearScale::padded(x_domain, (plot.x, plot.right()), 0.03);
    let y = LinearScale::new((0.0, (max_views * 1.08).max(1.0)), (plot.bottom(), plot.y));

    y_axis(svg, plot, &y, &y.integer_ticks(5), format_int);
    x_axis(svg, plot, &x, &x.integer_ticks(5), date_label);

    let points = sorted
        .iter()
        .zip(&days)
        .map(|(row, day)| (x.map(*day), y.map(row.views())))
        .collect::<Vec<_>>();
    svg.polyline(&points, LINE_COLOR, LINE_WIDTH);
    for (row, point) in sorted.iter().zip(points) {
        let tooltip = format!("{}\n{}: {} views", row.record.title, row.date, format_int(row.views()));
        svg.circle(point, MARKER_RADIUS, MARKER_COLOR, None, &tooltip);
    }
}

fn date_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|date| date.format("%b %d, %Y").to_string())
        .unwrap_or_default()
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

    fn row(views: u64, day: u32) -> DerivedRow {
        row_at(views, day, 0)
    }

    fn row_at(views: u64, day: u32, hour: u32) -> DerivedRow {
        DerivedRow::new(VideoRecord {
            title: format!("day {day} hour {hour}"),
            view_count: views,
            like_count: 0,
            comment_count: 0,
            published_at: Utc.with_ymd_and_hms(2024, 2, day, hour, 0, 0).unwrap(),
            duration: "PT1M".to_string(),
        })
    }

    fn marker_xs(out: &str) -> Vec<String> {
        out.match_indices("<circle cx=\"")
            .map(|(at, tag)| {
                let start = at + tag.len();
                out[start..start + out[start..].find('"').unwrap()].to_string()
            })
            .collect()
    }

    #[test]
    fn labels_days_as_dates() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().num_days_from_ce() as f64;
        assert_eq!(date_label(day), "Feb 29, 2024");
        assert_eq!(date_label(day + 0.4), "Feb 29, 2024");
    }

    #[test]
    fn same_day_uploads_share_a_position() {
        let rows = vec![row_at(10, 5, 1), row_at(20, 5, 23), row_at(30, 6, 0)];
        let mut svg = Svg::new(400.0, 300.0);
        draw(&mut svg, Frame::new(0.0, 0.0, 400.0, 300.0), &rows);
        let xs = marker_xs(&svg.finish());

        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0], xs[1]);
        assert_ne!(xs[1], xs[2]);
    }

    #[test]
    fn line_follows_publication_order() {
        let rows = vec![row(30, 3), row(10, 1), row(20, 2)];
        let mut svg = Svg::new(400.0, 300.0);
        draw(&mut svg, Frame::new(0.0, 0.0, 400.0, 300.0), &rows);
        let out = svg.finish();

        assert_eq!(out.matches("<polyline").count(), 1);
        assert_eq!(out.matches("<circle").count(), 3);
        let first = out.find("day 1").unwrap();
        let second = out.find("day 2").unwrap();
        let third = out.find("day 3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn single_video_still_draws() {
        let mut svg = Svg::new(400.0, 300.0);
        draw(&mut svg, Frame::new(0.0, 0.0, 400.0, 300.0), &[row(5, 9)]);
        let out = svg.finish();
        assert_eq!(out.matches("<circle").count(), 1);
        assert!(!out.contains("NaN"));
    }
}

//! Static dashboard: four SVG panels in a 2x2 grid wrapped in a self-contained HTML page.

mod colors;
mod heatmap;
mod leaderboard;
mod scale;
mod scatter;
mod svg;
mod time_series;

use self::{
    colors::ColorScale,
    scale::LinearScale,
    svg::{
        escape,
        Anchor,
        Frame,
        Svg,
        TextStyle,
    },
};
use crate::{
    derive::DerivedRow,
    stats::CorrelationMatrix,
};

pub(crate) use self::scale::format_int;

pub(crate) const WIDTH: f64 = 1400.0;
pub(crate) const HEIGHT: f64 = 900.0;

pub(crate) const BACKGROUND: &str = "#111111";
pub(crate) const GRID_COLOR: &str = "#333333";
pub(crate) const TEXT_COLOR: &str = "white";
const MUTED_TEXT_COLOR: &str = "#aaaaaa";

pub(crate) const TICK_FONT_SIZE: f64 = 11.0;
const PANEL_TITLE_FONT_SIZE: f64 = 15.0;

pub const DASHBOARD_TITLE: &str = "🚀 Content Strategy Dashboard";

/// Subplot titles, row-major.
pub const PANEL_TITLES: [&str; 4] = [
    "Views Trend",
    "Duration vs Views (Color = Engagement)",
    "Top 5 Most Viewed Videos",
    "Correlation Matrix",
];

const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_TOP: f64 = 100.0;
const MARGIN_BOTTOM: f64 = 50.0;
const HORIZONTAL_GAP: f64 = 130.0;
const VERTICAL_GAP: f64 = 112.5;

/// Cells of the 2x2 grid, row-major, sharing the space left by the margins.
fn panel_frames() -> [Frame; 4] {
    let inner_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let width = (inner_width - HORIZONTAL_GAP) / 2.0;
    let height = (inner_height - VERTICAL_GAP) / 2.0;

    let cell = |row: usize, col: usize| {
        Frame::new(
            MARGIN_LEFT + col as f64 * (width + HORIZONTAL_GAP),
            MARGIN_TOP + row as f64 * (height + VERTICAL_GAP),
            width,
            height,
        )
    };
    [cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1)]
}

/// Renders the whole report as an HTML document.
pub(crate) fn render_dashboard(rows: &[DerivedRow], correlation: &CorrelationMatrix) -> String {
    let mut svg = Svg::new(WIDTH, HEIGHT);
    svg.rect(Frame::new(0.0, 0.0, WIDTH, HEIGHT), BACKGROUND);
    svg.text(
        (MARGIN_LEFT, 38.0),
        DASHBOARD_TITLE,
        TextStyle::new(24.0, TEXT_COLOR).bold(),
    );
    svg.text(
        (MARGIN_LEFT, 66.0),
        &subtitle(rows),
        TextStyle::new(13.0, MUTED_TEXT_COLOR),
    );

    let frames = panel_frames();
    for (frame, title) in frames.iter().zip(PANEL_TITLES) {
        svg.text(
            (frame.center_x(), frame.y - 24.0),
            title,
            TextStyle::new(PANEL_TITLE_FONT_SIZE, TEXT_COLOR).anchor(Anchor::Middle),
        );
    }

    let [trend, scatter, leaders, matrix] = frames;
    if rows.is_empty() {
        for frame in frames {
            no_data(&mut svg, frame);
        }
    } else {
        time_series::draw(&mut svg, trend, rows);
        scatter::draw(&mut svg, scatter, rows);
        leaderboard::draw(&mut svg, leaders, rows);
        heatmap::draw(&mut svg, matrix, correlation);
    }

    html_document(&svg.finish())
}

fn subtitle(rows: &[DerivedRow]) -> String {
    let first = rows.iter().map(|row| row.date).min();
    let last = rows.iter().map(|row| row.date).max();
    match (first, last) {
        (Some(first), Some(last)) => format!("{} videos published {first} to {last}", rows.len()),
        _ => "No videos collected".to_string(),
    }
}

fn html_document(svg: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ margin: 0; background: {BACKGROUND}; display: flex; justify-content: center; }}
svg {{ max-width: 100%; height: auto; }}
</style>
</head>
<body>
{svg}</body>
</html>
"#,
        title = escape(DASHBOARD_TITLE),
    )
}

/// Placeholder for a panel without anything to plot.
pub(crate) fn no_data(svg: &mut Svg, frame: Frame) {
    svg.text(
        (frame.center_x(), frame.center_y()),
        "No data",
        TextStyle::new(16.0, MUTED_TEXT_COLOR).anchor(Anchor::Middle),
    );
}

/// Vertical color legend for `scale` spanning `domain`, low values at the bottom.
pub(crate) fn colorbar(
    svg: &mut Svg,
    bar: Frame,
    scale: &ColorScale,
    gradient_id: &str,
    domain: (f64, f64),
    title: &str,
    label: impl Fn(f64) -> String,
) {
    svg.vertical_gradient(gradient_id, &scale.gradient_stops());
    svg.rect_with_gradient(bar, gradient_id);

    let axis = LinearScale::new(domain, (bar.bottom(), bar.y));
    let style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR);
    for tick in axis.ticks(5) {
        let y = axis.map(tick);
        svg.line((bar.right(), y), (bar.right() + 4.0, y), TEXT_COLOR, 1.0);
        svg.text((bar.right() + 6.0, y), &label(tick), style);
    }
    svg.text(
        (bar.center_x(), bar.y - 14.0),
        title,
        TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::Middle),
    );
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
        [(100, 10, 5, "PT2M", 3), (0, 0, 0, "PT1M", 1), (50, 1, 1, "PT10M", 2)]
            .into_iter()
            .map(|(views, likes, comments, duration, day)| {
                DerivedRow::new(VideoRecord {
                    title: format!("Video <{day}>"),
                    view_count: views,
                    like_count: likes,
                    comment_count: comments,
                    published_at: Utc.with_ymd_and_hms(2024, 1, day, 8, 0, 0).unwrap(),
                    duration: duration.to_string(),
                })
            })
            .collect()
    }

    #[test]
    fn grid_fills_the_canvas_inside_the_margins() {
        let [a, b, c, d] = panel_frames();
        assert_eq!(a.x, MARGIN_LEFT);
        assert_eq!(a.y, MARGIN_TOP);
        assert_eq!(b.right(), WIDTH - MARGIN_RIGHT);
        assert_eq!(d.bottom(), HEIGHT - MARGIN_BOTTOM);
        assert_eq!((a.width, a.height), (585.0, 318.75));
        assert_eq!(c.x, a.x);
        assert_eq!(b.y, a.y);
    }

    #[test]
    fn renders_a_complete_document() {
        let rows = rows();
        let html = render_dashboard(&rows, &CorrelationMatrix::from_rows(&rows));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains(r#"width="1400" height="900""#));
        for title in PANEL_TITLES {
            assert!(html.contains(&escape(title)), "missing panel {title}");
        }
        assert!(html.contains("3 videos published 2024-01-01 to 2024-01-03"));
        assert!(html.contains("Video &lt;3&gt;"));
        assert!(!html.contains("No data"));
    }

    #[test]
    fn empty_input_renders_placeholders() {
        let html = render_dashboard(&[], &CorrelationMatrix::from_rows(&[]));
        assert_eq!(html.matches("No data").count(), 4);
        assert!(html.contains("No videos collected"));
    }
}

use super::{
    colorbar,
    colors::RED_BLUE_REVERSED,
    scale::format_decimal,
    svg::{
        Anchor,
        Frame,
        Svg,
        TextStyle,
    },
    TEXT_COLOR,
    TICK_FONT_SIZE,
};
use crate::stats::CorrelationMatrix;

const UNDEFINED_FILL: &str = "#444444";
const UNDEFINED_LABEL: &str = "n/a";
const CELL_GAP: f64 = 1.0;

/// Correlation heatmap; the first column is drawn as the bottom row.
pub(super) fn draw(svg: &mut Svg, frame: Frame, matrix: &CorrelationMatrix) {
    let labels = matrix.labels();
    let n = labels.len();
    let plot = frame.inset(115.0, 0.0, 70.0, 60.0);
    let cell_width = plot.width / n as f64;
    let cell_height = plot.height / n as f64;

    for row in 0..n {
        let y = plot.bottom() - (row as f64 + 1.0) * cell_height;
        svg.text(
            (plot.x - 6.0, y + cell_height / 2.0),
            labels[row],
            TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::End),
        );

        for col in 0..n {
            let cell = Frame::new(plot.x + col as f64 * cell_width, y, cell_width, cell_height).inset(
                CELL_GAP,
                CELL_GAP,
                CELL_GAP,
                CELL_GAP,
            );
            let (fill, text_color, label) = match matrix.get(row, col) {
                Some(r) => {
                    let color = RED_BLUE_REVERSED.at((r + 1.0) / 2.0);
                    (color.to_string(), color.contrasting_text(), format!("{r:.2}"))
                }
                None => (UNDEFINED_FILL.to_string(), TEXT_COLOR, UNDEFINED_LABEL.to_string()),
            };
            let tooltip = format!("{} / {}: {label}", labels[row], labels[col]);
            svg.rect_with_tooltip(cell, &fill, &tooltip);
            svg.text(
                (cell.center_x(), cell.center_y()),
                &label,
                TextStyle::new(TICK_FONT_SIZE, text_color).anchor(Anchor::Middle),
            );
        }
    }

    for (col, label) in labels.iter().enumerate() {
        let x = plot.x + (col as f64 + 0.5) * cell_width;
        svg.text(
            (x, plot.bottom() + 12.0),
            label,
            TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::End).rotate(-30.0),
        );
    }

    let bar = Frame::new(plot.right() + 20.0, plot.y + 20.0, 14.0, plot.height - 20.0);
    colorbar(svg, bar, &RED_BLUE_REVERSED, "correlation-scale", (-1.0, 1.0), "Pearson r", format_decimal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::DerivedRow;
    use channel_insights_dataset::VideoRecord;
    use chrono::{
        TimeZone,
        Utc,
    };

    fn render(rows: &[DerivedRow]) -> String {
        let mut svg = Svg::new(600.0, 320.0);
        draw(&mut svg, Frame::new(0.0, 0.0, 600.0, 320.0), &CorrelationMatrix::from_rows(rows));
        svg.finish()
    }

    fn row(views: u64, likes: u64, comments: u64, duration: &str) -> DerivedRow {
        DerivedRow::new(VideoRecord {
            title: "v".to_string(),
            view_count: views,
            like_count: likes,
            comment_count: comments,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            duration: duration.to_string(),
        })
    }

    #[test]
    fn annotates_every_cell() {
        let out = render(&[row(100, 10, 5, "PT2M"), row(0, 0, 0, "PT1M"), row(50, 1, 1, "PT10M")]);
        assert_eq!(out.matches("<title>").count(), 25);
        for label in CorrelationMatrix::from_rows(&[]).labels() {
            assert!(out.contains(&format!("{label} / {label}: 1.00")));
        }
        assert!(!out.contains(UNDEFINED_LABEL));
        assert!(out.contains(r#"id="correlation-scale""#));
    }

    #[test]
    fn undefined_coefficients_are_marked() {
        let out = render(&[row(10, 1, 0, "PT1M")]);
        assert_eq!(out.matches(&format!(">{UNDEFINED_LABEL}</text>")).count(), 25);
    }

    #[test]
    fn views_row_sits_at_the_bottom() {
        let out = render(&[row(100, 10, 5, "PT2M"), row(0, 0, 0, "PT1M"), row(50, 1, 1, "PT10M")]);
        let views_label = out.find(">Views</text>").unwrap();
        let engagement_label = out.find(">Engagement_Rate</text>").unwrap();
        assert!(views_label < engagement_label);
        let y_of = |at: usize| {
            let tag = &out[out[..at].rfind("<text").unwrap()..at];
            let start = tag.find("y=\"").unwrap() + 3;
            tag[start..start + tag[start..].find('"').unwrap()].parse::<f64>().unwrap()
        };
        assert!(y_of(views_label) > y_of(engagement_label));
    }
}

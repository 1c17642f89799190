use super::{
    colors::ICE,
    no_data,
    scale::{
        format_int,
        x_axis,
        LinearScale,
    },
    svg::{
        Anchor,
        Frame,
        Svg,
        TextStyle,
    },
    TEXT_COLOR,
    TICK_FONT_SIZE,
};
use crate::{
    derive::DerivedRow,
    stats,
};

pub(crate) const LEADERBOARD_SIZE: usize = 5;

const LABEL_AREA: f64 = 230.0;
const BAR_FILL_RATIO: f64 = 0.7;
/// Bars narrower than this get their value label outside.
const MIN_INNER_LABEL_WIDTH: f64 = 80.0;

/// Horizontal bars of the most viewed videos, most viewed on top.
pub(super) fn draw(svg: &mut Svg, frame: Frame, rows: &[DerivedRow]) {
    let top = stats::top_by_views(rows, LEADERBOARD_SIZE);
    let Some(views) = stats::extent(top.iter().map(|row| row.views())) else {
        return no_data(svg, frame);
    };

    let plot = frame.inset(LABEL_AREA, 0.0, 20.0, 30.0);
    let x = LinearScale::new((0.0, (views.1 * 1.1).max(1.0)), (plot.x, plot.right()));
    x_axis(svg, plot, &x, &x.integer_ticks(4), format_int);

    let band = plot.height / top.len() as f64;
    let bar_height = band * BAR_FILL_RATIO;
    for (slot, row) in top.iter().enumerate() {
        let center_y = plot.y + band * (slot as f64 + 0.5);
        let bar = Frame::new(
            plot.x,
            center_y - bar_height / 2.0,
            x.map(row.views()) - plot.x,
            bar_height,
        );
        let color = ICE.sample(row.views(), views);
        svg.rect_with_tooltip(bar, &color.to_string(), &row.record.title);

        svg.text(
            (plot.x - 8.0, center_y),
            &row.short_title,
            TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::End),
        );

        let value = format_int(row.views());
        if bar.width >= MIN_INNER_LABEL_WIDTH {
            svg.text(
                (bar.right() - 6.0, center_y),
                &value,
                TextStyle::new(TICK_FONT_SIZE, color.contrasting_text()).anchor(Anchor::End),
            );
        } else {
            svg.text((bar.right() + 6.0, center_y), &value, TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR));
        }
    }
}

use super::{
    colorbar,
    colors::TURBO,
    no_data,
    scale::{
        format_decimal,
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

/// Diameter of the marker for the most liked video, before area scaling.
const MAX_MARKER_DIAMETER: f64 = 50.0;
const MIN_MARKER_DIAMETER: f64 = 6.0;
const MARKER_OUTLINE: (&str, f64) = ("white", 1.0);

/// Marker diameter with the marker *area* proportional to `likes`.
///
/// `sizeref = 2 * max_likes / MAX_MARKER_DIAMETER^2` and
/// `diameter = sqrt(likes / sizeref)`, never below [`MIN_MARKER_DIAMETER`].
pub(crate) fn marker_diameter(likes: f64, max_likes: f64) -> f64 {
    if max_likes <= 0.0 {
        return MIN_MARKER_DIAMETER;
    }
    let sizeref = 2.0 * max_likes / MAX_MARKER_DIAMETER.powi(2);
    (likes / sizeref).sqrt().max(MIN_MARKER_DIAMETER)
}

/// Duration against views; size by likes, color by engagement rate.
pub(super) fn draw(svg: &mut Svg, frame: Frame, rows: &[DerivedRow]) {
    let Some(rates) = stats::extent(rows.iter().map(|row| row.engagement_rate)) else {
        return no_data(svg, frame);
    };
    let max_minutes = rows.iter().map(|row| row.duration_minutes).fold(0.0, f64::max);
    let max_views = rows.iter().map(DerivedRow::views).fold(0.0, f64::max);
    let max_likes = rows.iter().map(DerivedRow::likes).fold(0.0, f64::max);

    let plot = frame.inset(70.0, 0.0, 75.0, 30.0);
    let x = LinearScale::new((0.0, (max_minutes * 1.08).max(1.0)), (plot.x, plot.right()));
    let y = LinearScale::new((0.0, (max_views * 1.08).max(1.0)), (plot.bottom(), plot.y));

    y_axis(svg, plot, &y, &y.integer_ticks(5), format_int);
    x_axis(svg, plot, &x, &x.ticks(6), format_decimal);

    for row in rows {
        let fill = TURBO.sample(row.engagement_rate, rates).to_string();
        let radius = marker_diameter(row.likes(), max_likes) / 2.0;
        let tooltip = format!(
            "{}\n{} min, {} views, {} likes, {:.2}% engagement",
            row.record.title,
            format_decimal(row.duration_minutes),
            format_int(row.views()),
            format_int(row.likes()),
            row.engagement_rate
        );
        svg.circle(
            (x.map(row.duration_minutes), y.map(row.views())),
            radius,
            &fill,
            Some(MARKER_OUTLINE),
            &tooltip,
        );
    }

    let bar = Frame::new(plot.right() + 20.0, plot.y + 20.0, 14.0, plot.height - 20.0);
    colorbar(svg, bar, &TURBO, "engagement-scale", rates, "Eng. Rate %", format_decimal);
}

use super::{
    svg::{
        Anchor,
        Frame,
        Svg,
        TextStyle,
    },
    GRID_COLOR,
    TEXT_COLOR,
    TICK_FONT_SIZE,
};
use channel_insights_dataset::format_thousands;

/// Maps a data interval linearly onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain: widen(domain),
            range,
        }
    }

    /// Like [`LinearScale::new`], with `fraction` of the span added on both ends.
    pub fn padded(domain: (f64, f64), range: (f64, f64), fraction: f64) -> Self {
        let (lo, hi) = widen(domain);
        let pad = (hi - lo) * fraction;
        Self::new((lo - pad, hi + pad), range)
    }

    #[cfg(test)]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.ticks_with_min_step(count, 0.0)
    }

    /// Ticks at whole numbers only.
    pub fn integer_ticks(&self, count: usize) -> Vec<f64> {
        self.ticks_with_min_step(count, 1.0)
    }

    fn ticks_with_min_step(&self, count: usize, min_step: f64) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let step = nice_step(hi - lo, count.max(1)).max(min_step);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Gives degenerate domains a non-zero span.
fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi > lo {
        return (lo, hi);
    }
    let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
    (lo - pad, lo + pad)
}

/// 1, 2 or 5 times a power of ten, close to `span / count`.
fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let error = raw / magnitude;
    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.41 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

/// Draws horizontal grid lines with labels left of `frame`.
pub(crate) fn y_axis(svg: &mut Svg, frame: Frame, scale: &LinearScale, ticks: &[f64], label: impl Fn(f64) -> String) {
    let style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::End);
    for &tick in ticks {
        let y = scale.map(tick);
        svg.line((frame.x, y), (frame.right(), y), GRID_COLOR, 1.0);
        svg.text((frame.x - 6.0, y), &label(tick), style);
    }
}

/// Draws vertical grid lines with labels below `frame`.
pub(crate) fn x_axis(svg: &mut Svg, frame: Frame, scale: &LinearScale, ticks: &[f64], label: impl Fn(f64) -> String) {
    let style = TextStyle::new(TICK_FONT_SIZE, TEXT_COLOR).anchor(Anchor::Middle);
    for &tick in ticks {
        let x = scale.map(tick);
        svg.line((x, frame.y), (x, frame.bottom()), GRID_COLOR, 1.0);
        svg.text((x, frame.bottom() + 14.0), &label(tick), style);
    }
}

/// Whole number with thousands separators, e.g. `1,234,567`.
pub(crate) fn format_int(value: f64) -> String {
    let rounded = value.round();
    let digits = format_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Up to two decimals without trailing zeros, e.g. `0.5`, `-1`, `12.25`.
pub(crate) fn format_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

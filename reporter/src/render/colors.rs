//! Continuous color scales, sampled by linear interpolation between stops.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    /// Relative luminance in `[0, 1]`, good enough to pick a readable text color.
    pub fn luminance(self) -> f64 {
        (0.299 * self.0 as f64 + 0.587 * self.1 as f64 + 0.114 * self.2 as f64) / 255.0
    }

    pub fn contrasting_text(self) -> &'static str {
        if self.luminance() > 0.55 {
            "#111111"
        } else {
            "white"
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorScale {
    stops: &'static [(f64, Rgb)],
}

/// Rainbow scale for the engagement coloring of the scatter plot.
pub(crate) const TURBO: ColorScale = ColorScale {
    stops: &[
        (0.0, Rgb::hex(0x30123b)),
        (0.1, Rgb::hex(0x4454c4)),
        (0.2, Rgb::hex(0x4490fe)),
        (0.3, Rgb::hex(0x1fc8de)),
        (0.4, Rgb::hex(0x29efa2)),
        (0.5, Rgb::hex(0x7dff56)),
        (0.6, Rgb::hex(0xc1f334)),
        (0.7, Rgb::hex(0xf1ca3a)),
        (0.8, Rgb::hex(0xfe922a)),
        (0.9, Rgb::hex(0xea4f0d)),
        (1.0, Rgb::hex(0x7a0403)),
    ],
};

/// Sequential dark-blue to ice-white scale for the leaderboard bars.
pub(crate) const ICE: ColorScale = ColorScale {
    stops: &[
        (0.0, Rgb::hex(0x040613)),
        (0.2, Rgb::hex(0x292851)),
        (0.4, Rgb::hex(0x3f4b96)),
        (0.6, Rgb::hex(0x427bb7)),
        (0.8, Rgb::hex(0x61a8c7)),
        (1.0, Rgb::hex(0xeafdfd)),
    ],
};

/// Diverging blue-white-red scale for correlation coefficients, white at the center.
pub(crate) const RED_BLUE_REVERSED: ColorScale = ColorScale {
    stops: &[
        (0.0, Rgb::hex(0x053061)),
        (0.1, Rgb::hex(0x2166ac)),
        (0.2, Rgb::hex(0x4393c3)),
        (0.3, Rgb::hex(0x92c5de)),
        (0.4, Rgb::hex(0xd1e5f0)),
        (0.5, Rgb::hex(0xf7f7f7)),
        (0.6, Rgb::hex(0xfddbc7)),
        (0.7, Rgb::hex(0xf4a582)),
        (0.8, Rgb::hex(0xd6604d)),
        (0.9, Rgb::hex(0xb2182b)),
        (1.0, Rgb::hex(0x67001f)),
    ],
};

impl ColorScale {
    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let upper = self
            .stops
            .iter()
            .position(|(offset, _)| *offset >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return self.stops[0].1;
        }
        let (lo_offset, lo) = self.stops[upper - 1];
        let (hi_offset, hi) = self.stops[upper];
        lo.lerp(hi, (t - lo_offset) / (hi_offset - lo_offset))
    }

    /// Color of `value` with `min..max` spread over the whole scale.
    /// A flat range maps everything to the middle.
    pub fn sample(&self, value: f64, (min, max): (f64, f64)) -> Rgb {
        if max > min {
            self.at((value - min) / (max - min))
        } else {
            self.at(0.5)
        }
    }

    /// Gradient stops for an SVG `linearGradient`.
    pub fn gradient_stops(&self) -> Vec<(f64, String)> {
        self.stops
            .iter()
            .map(|(offset, color)| (*offset, color.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_the_stops_exactly() {
        assert_eq!(RED_BLUE_REVERSED.at(0.0), Rgb::hex(0x053061));
        assert_eq!(RED_BLUE_REVERSED.at(0.5), Rgb::hex(0xf7f7f7));
        assert_eq!(RED_BLUE_REVERSED.at(1.0), Rgb::hex(0x67001f));
    }

    #[test]
    fn interpolates_and_clamps() {
        assert_eq!(ICE.at(-3.0), ICE.at(0.0));
        assert_eq!(ICE.at(7.0), ICE.at(1.0));
        assert_eq!(Rgb(0, 0, 0).lerp(Rgb(200, 100, 50), 0.5), Rgb(100, 50, 25));
    }

    #[test]
    fn flat_ranges_use_the_center() {
        assert_eq!(TURBO.sample(4.0, (4.0, 4.0)), TURBO.at(0.5));
        assert_eq!(TURBO.sample(f64::NAN, (0.0, 1.0)), TURBO.at(0.5));
    }

    #[test]
    fn formats_as_hex() {
        assert_eq!(Rgb::hex(0x00ffff).to_string(), "#00ffff");
    }

    #[test]
    fn picks_readable_text() {
        assert_eq!(Rgb::hex(0xf7f7f7).contrasting_text(), "#111111");
        assert_eq!(Rgb::hex(0x053061).contrasting_text(), "white");
    }
}

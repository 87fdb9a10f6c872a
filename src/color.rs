use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::chart::spec::ColorScale;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0 + 210.0;
            let hsl = Hsl::new(hue, 0.70, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// Viridis control points (sRGB 0-255), evenly spaced over [0, 1].
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Blue → white → red, for values in [-1, 1].
const DIVERGING: [(u8, u8, u8); 3] = [(33, 102, 172), (247, 247, 247), (178, 24, 43)];

impl ColorScale {
    /// Colour at position `t` in [0, 1]; values outside are clamped.
    pub fn sample(self, t: f64) -> Color32 {
        match self {
            ColorScale::Viridis => interpolate(&VIRIDIS, t),
        }
    }
}

/// Colour for a correlation coefficient; `NaN` maps to grey.
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    interpolate(&DIVERGING, (r + 1.0) / 2.0)
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let lin: LinSrgb = Srgb::new(background.r(), background.g(), background.b())
        .into_format::<f32>()
        .into_linear();
    let luminance = 0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue;
    if luminance > 0.35 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Map `value` from `[min, max]` onto [0, 1]. A degenerate range maps to 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.0
    } else {
        ((value - min) / range).clamp(0.0, 1.0)
    }
}

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = stops.len() - 1;
    let pos = t * segments as f64;
    let idx = (pos.floor() as usize).min(segments - 1);
    let frac = (pos - idx as f64) as f32;

    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = linear(stops[idx]).mix(linear(stops[idx + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colors() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn viridis_endpoints() {
        assert_eq!(ColorScale::Viridis.sample(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(ColorScale::Viridis.sample(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(ColorScale::Viridis.sample(-3.0), ColorScale::Viridis.sample(0.0));
    }

    #[test]
    fn correlation_colors() {
        assert_eq!(correlation_color(f64::NAN), Color32::GRAY);
        assert_eq!(correlation_color(0.0), Color32::from_rgb(247, 247, 247));
        assert_eq!(contrasting_text(correlation_color(0.0)), Color32::BLACK);
        assert_eq!(contrasting_text(Color32::from_rgb(68, 1, 84)), Color32::WHITE);
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
        assert_eq!(normalize(1.0, 0.0, 1.0), 1.0);
        assert_eq!(normalize(0.25, 0.0, 1.0), 0.25);
    }
}

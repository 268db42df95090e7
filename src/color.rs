//! Stroke colors. The crate uses [`csscolorparser`] colors throughout, this
//! adds the hue/saturation/brightness constructor grammars are usually
//! authored with.
pub use csscolorparser::parse as parse_css_color;
pub use csscolorparser::Color as CssColor;

/// Builds a color from hue in degrees and saturation, brightness and alpha in
/// percent (0-100).
pub fn hsba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> CssColor {
    CssColor::from_hsva(
        hue,
        (saturation / 100.0).clamp(0.0, 1.0),
        (brightness / 100.0).clamp(0.0, 1.0),
        (alpha / 100.0).clamp(0.0, 1.0),
    )
}

/// `#rrggbb` for the color, alpha dropped.
pub fn hex_rgb(color: &CssColor) -> String {
    let [r, g, b, _] = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Alpha as a 0-1 opacity.
pub fn opacity(color: &CssColor) -> f64 {
    color.to_rgba8()[3] as f64 / 255.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hsba_primaries() {
        assert_eq!(hsba(0.0, 100.0, 100.0, 100.0).to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(hsba(120.0, 100.0, 100.0, 100.0).to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(hsba(0.0, 0.0, 0.0, 100.0).to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(hsba(0.0, 0.0, 100.0, 0.0).to_rgba8(), [255, 255, 255, 0]);
    }

    #[test]
    fn test_hex_and_opacity() {
        let color = parse_css_color("#1a2b3c").unwrap();
        assert_eq!(hex_rgb(&color), "#1a2b3c");
        assert!((opacity(&color) - 1.0).abs() < 1e-9);
        assert_eq!(opacity(&hsba(0.0, 0.0, 0.0, 0.0)), 0.0);
    }
}

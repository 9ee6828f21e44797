use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Hue of the first series; the rest are spread evenly around the wheel.
const BASE_HUE: f32 = 210.0;

/// Colour of series `index` in a chart with `count` series.
///
/// Indices outside the chart fall back to light blue.
pub fn series_color(index: usize, count: usize) -> Color32 {
    if index >= count {
        return Color32::LIGHT_BLUE;
    }
    let hue = (BASE_HUE + 360.0 * index as f32 / count as f32) % 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colours_are_distinct() {
        let colours: Vec<Color32> = (0..3).map(|i| series_color(i, 3)).collect();
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
        assert_ne!(colours[0], colours[2]);
    }

    #[test]
    fn first_series_is_blue() {
        let c = series_color(0, 1);
        assert!(c.b() > c.r() && c.b() > c.g(), "{c:?}");
    }

    #[test]
    fn out_of_range_falls_back() {
        assert_eq!(series_color(5, 2), Color32::LIGHT_BLUE);
        assert_eq!(series_color(0, 0), Color32::LIGHT_BLUE);
    }
}

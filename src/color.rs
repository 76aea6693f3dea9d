use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::PresentationConfig;
use crate::data::ConfigLabel;

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
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` / `rrggbb` (or the 3-digit short forms).
pub fn parse_hex(s: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(s.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Resolved colours for one presentation config
// ---------------------------------------------------------------------------

/// Series and annotation colours resolved from a [`PresentationConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColors {
    series: [Color32; 2],
    pub annotation: Color32,
}

impl SeriesColors {
    pub fn from_config(config: &PresentationConfig) -> Self {
        let fallback = generate_palette(ConfigLabel::ALL.len());
        let series = ConfigLabel::ALL.map(|label| {
            let hex = config.series_color(label);
            parse_hex(hex).unwrap_or_else(|| {
                log::warn!("Invalid color `{hex}` for {label}, using generated palette");
                fallback[label.index()]
            })
        });
        let annotation = parse_hex(&config.annotation_color).unwrap_or_else(|| {
            log::warn!(
                "Invalid annotation color `{}`, using red",
                config.annotation_color
            );
            Color32::RED
        });
        SeriesColors { series, annotation }
    }

    /// Colour of a label's series.
    pub fn color_for(&self, label: ConfigLabel) -> Color32 {
        self.series[label.index()]
    }
}

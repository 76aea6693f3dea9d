use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::ConfigLabel;

// ---------------------------------------------------------------------------
// Presentation configuration
// ---------------------------------------------------------------------------

/// Styling for one kind of chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub marker_radius: f32,
    pub line_width: f32,
}

/// Everything the view composer may vary. The data pipeline never reads it.
///
/// Colors are hex strings (`"#3cb371"`); anything unparsable falls back to a
/// generated palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub dark_mode: bool,
    pub title: String,
    pub description: String,
    pub tip: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
    pub macos_color: String,
    pub ubuntu_color: String,
    pub annotation_color: String,
    pub annotation_text_size: f32,
    pub single: SeriesStyle,
    pub comparison: SeriesStyle,
    pub plot_height: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::light()
    }
}

impl PresentationConfig {
    /// Names accepted by [`PresentationConfig::preset`].
    pub const PRESETS: [&'static str; 2] = ["light", "dark"];

    pub fn light() -> Self {
        Self {
            dark_mode: false,
            title: "Threads vs execution time".to_string(),
            description: "Execution time of the same workload for an increasing number of \
                          threads, measured on a MacBook Pro (Apple M1 Pro, 8 cores) under macOS \
                          and a ThinkPad (Intel i7-10610U, 4 cores / 8 threads) under Ubuntu."
                .to_string(),
            tip: "Tip: the charts are interactive. Hover for values, drag to pan, \
                  scroll or box-select to zoom."
                .to_string(),
            x_axis_title: "Number of threads".to_string(),
            y_axis_title: "Execution time (seconds)".to_string(),
            legend_title: "OS-CPU".to_string(),
            macos_color: "#3cb371".to_string(),
            ubuntu_color: "#4169e1".to_string(),
            annotation_color: "#ff0000".to_string(),
            annotation_text_size: 14.0,
            single: SeriesStyle {
                marker_radius: 5.0,
                line_width: 3.0,
            },
            comparison: SeriesStyle {
                marker_radius: 4.0,
                line_width: 2.0,
            },
            plot_height: 480.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            dark_mode: true,
            macos_color: "#66cdaa".to_string(),
            ubuntu_color: "#87cefa".to_string(),
            annotation_color: "#ffa07a".to_string(),
            ..Self::light()
        }
    }

    /// Look up a built-in preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    /// Read a JSON file; absent fields keep their `light` defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading theme file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing theme file {}", path.display()))
    }

    /// Overlay a JSON document on the `light` preset, nested objects included.
    pub fn from_json(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text)?;
        if !overrides.is_object() {
            bail!("expected a JSON object, found `{overrides}`");
        }
        let mut merged = serde_json::to_value(Self::light())?;
        overlay(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// Resolve a `--theme` argument: a preset name or a path to a JSON file.
    pub fn resolve(theme: &str) -> Result<Self> {
        if let Some(preset) = Self::preset(theme) {
            return Ok(preset);
        }
        let path = Path::new(theme);
        if !path.exists() {
            bail!(
                "unknown theme `{theme}`: expected one of {:?} or a JSON file",
                Self::PRESETS
            );
        }
        Self::from_file(path)
    }

    /// Configured hex color of a label's series.
    pub fn series_color(&self, label: ConfigLabel) -> &str {
        match label {
            ConfigLabel::MacosM1Pro => &self.macos_color,
            ConfigLabel::UbuntuI7 => &self.ubuntu_color,
        }
    }
}

fn overlay(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the values of a categorical column to distinct colours. Rows with a
/// missing value get the default colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(values: &BTreeSet<String>) -> Self {
        let mapping = values
            .iter()
            .cloned()
            .zip(generate_palette(values.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: Option<&str>) -> Color32 {
        value
            .and_then(|v| self.mapping.get(v))
            .copied()
            .unwrap_or(self.default_color)
    }
}

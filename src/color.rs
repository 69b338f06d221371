use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Srgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn to_rgb_color(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: series name → colour
// ---------------------------------------------------------------------------

/// Assigns each column of a group a fixed hue by its position in the group,
/// so a tenor keeps its colour whether or not its neighbours are present.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Srgb<u8>>,
    default_color: Srgb<u8>,
}

impl ColorMap {
    pub fn new(names: &[String]) -> Self {
        let mapping = names
            .iter()
            .cloned()
            .zip(generate_palette(names.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Srgb::new(128, 128, 128),
        }
    }

    pub fn color_for(&self, name: &str) -> Srgb<u8> {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_names_fall_back_to_grey() {
        let names = vec!["2Y".to_string(), "5Y".to_string()];
        let map = ColorMap::new(&names);
        assert_ne!(map.color_for("2Y"), map.color_for("5Y"));
        assert_eq!(map.color_for("7Y"), Srgb::new(128, 128, 128));
    }
}

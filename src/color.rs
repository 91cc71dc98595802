use std::collections::HashMap;

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
            let hue = (190.0 + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Branch colours
// ---------------------------------------------------------------------------

/// Stable branch → colour mapping, built from the whole dataset so a branch
/// keeps its colour however the view is filtered.
#[derive(Debug, Clone, Default)]
pub struct BranchColors {
    mapping: HashMap<String, Color32>,
}

impl BranchColors {
    pub fn new(branches: &[String]) -> Self {
        let named: Vec<&String> = branches.iter().filter(|b| !b.is_empty()).collect();
        let mapping = named
            .iter()
            .map(|b| b.to_string())
            .zip(generate_palette(named.len()))
            .collect();
        BranchColors { mapping }
    }

    /// Colour of a branch; unknown or blank branches are grey.
    pub fn color_for(&self, branch: &str) -> Color32 {
        self.mapping.get(branch).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_len_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[2]);
    }

    #[test]
    fn test_branch_colors() {
        let colors = BranchColors::new(&["CS".to_string(), "EE".to_string()]);
        assert_ne!(colors.color_for("CS"), colors.color_for("EE"));
        assert_eq!(colors.color_for("ME"), Color32::GRAY);

        let with_blank = BranchColors::new(&["".to_string(), "CS".to_string()]);
        assert_eq!(with_blank.color_for(""), Color32::GRAY);
    }
}

//! # Color Palette
//!
//! A bounded list of colors, one per voxel type. Entry `i` colors voxel ID
//! `i + 1`; ID `0` is empty space and has no color.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    core::{EngineError, Result},
    engine_state::voxels::block::VoxelId,
};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgb255(r: u8, g: u8, b: u8) -> Self {
        Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Converts to 8-bit channels, clamping out-of-range components.
    pub fn to_rgb255(&self) -> [u8; 3] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Colors a fresh palette starts with.
const DEFAULT_COLORS: [Color; 8] = [
    Color::new(0.85, 0.45, 0.15),
    Color::new(0.35, 0.65, 0.25),
    Color::new(0.55, 0.40, 0.25),
    Color::new(0.50, 0.50, 0.50),
    Color::new(0.25, 0.45, 0.80),
    Color::new(0.90, 0.85, 0.35),
    Color::new(0.80, 0.25, 0.30),
    Color::new(0.95, 0.95, 0.95),
];

/// The color used by [`ColorPalette::add_default_color`].
pub const NEW_COLOR: Color = Color::new(0.5, 0.5, 0.5);

/// Most entries a palette can hold: voxel IDs are `u8` and `0` is empty.
pub const MAX_PALETTE_COLORS: usize = VoxelId::MAX as usize;

/// A bounded, selectable list of voxel colors.
///
/// Deserialization goes through the same checks as construction, so a
/// loaded palette is never empty and its selection is always in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaletteData", into = "PaletteData")]
pub struct ColorPalette {
    colors: Vec<Color>,
    selected_index: usize,
    max_colors: usize,
}

/// Unchecked serialized form of a [`ColorPalette`].
#[derive(Serialize, Deserialize)]
struct PaletteData {
    colors: Vec<Color>,
    #[serde(default)]
    selected_index: usize,
    max_colors: usize,
}

impl TryFrom<PaletteData> for ColorPalette {
    type Error = EngineError;

    fn try_from(data: PaletteData) -> Result<Self> {
        if data.max_colors == 0 || data.max_colors > MAX_PALETTE_COLORS {
            return Err(EngineError::InvalidConfig(format!(
                "palette max_colors must be in 1..={}, got {}",
                MAX_PALETTE_COLORS, data.max_colors
            )));
        }
        if data.colors.is_empty() || data.colors.len() > data.max_colors {
            return Err(EngineError::InvalidConfig(format!(
                "palette must hold 1..={} colors, got {}",
                data.max_colors,
                data.colors.len()
            )));
        }
        if data.selected_index >= data.colors.len() {
            return Err(EngineError::InvalidConfig(format!(
                "selected color {} is outside a palette of {}",
                data.selected_index,
                data.colors.len()
            )));
        }
        Ok(ColorPalette {
            colors: data.colors,
            selected_index: data.selected_index,
            max_colors: data.max_colors,
        })
    }
}

impl From<ColorPalette> for PaletteData {
    fn from(palette: ColorPalette) -> Self {
        PaletteData {
            colors: palette.colors,
            selected_index: palette.selected_index,
            max_colors: palette.max_colors,
        }
    }
}

impl ColorPalette {
    /// Creates a palette holding at most `max_colors` entries, seeded with the
    /// default colors that fit.
    pub fn new(max_colors: usize) -> Self {
        let max_colors = max_colors.clamp(1, MAX_PALETTE_COLORS);
        ColorPalette {
            colors: DEFAULT_COLORS.iter().copied().take(max_colors).collect(),
            selected_index: 0,
            max_colors,
        }
    }

    /// All colors, in voxel ID order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// `true` once no more colors can be added.
    pub fn is_full(&self) -> bool {
        self.colors.len() >= self.max_colors
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_color(&self) -> Color {
        self.colors[self.selected_index]
    }

    /// The voxel ID that add and paint strokes write.
    pub fn selected_voxel_id(&self) -> VoxelId {
        (self.selected_index + 1) as VoxelId
    }

    /// Selects the color at `index`. Out-of-range indices are ignored.
    ///
    /// # Returns
    /// Whether the selection changed to `index`.
    pub fn select_color(&mut self, index: usize) -> bool {
        if index >= self.colors.len() {
            warn!(
                "Ignoring selection of color {} in a palette of {}",
                index,
                self.colors.len()
            );
            return false;
        }
        self.selected_index = index;
        true
    }

    /// Appends a color.
    ///
    /// # Returns
    /// The new entry's index, or `None` if the palette is full.
    pub fn add_color(&mut self, color: Color) -> Option<usize> {
        if self.is_full() {
            debug!("Palette full, ignoring new color");
            return None;
        }
        self.colors.push(color);
        Some(self.colors.len() - 1)
    }

    /// Appends the neutral grey new entries start as.
    pub fn add_default_color(&mut self) -> Option<usize> {
        self.add_color(NEW_COLOR)
    }

    /// Replaces the color at `index`. Out-of-range indices are ignored.
    pub fn update_color(&mut self, index: usize, color: Color) -> bool {
        match self.colors.get_mut(index) {
            Some(entry) => {
                *entry = color;
                true
            }
            None => {
                warn!("Ignoring update of color {} in a palette of {}", index, self.colors.len());
                false
            }
        }
    }

    /// The color of a voxel ID, or `None` for empty space and IDs without an
    /// entry.
    pub fn color_for_voxel(&self, voxel: VoxelId) -> Option<Color> {
        if voxel == 0 {
            return None;
        }
        self.colors.get(voxel as usize - 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_id_is_index_plus_one() {
        let mut palette = ColorPalette::new(16);
        assert_eq!(palette.selected_voxel_id(), 1);
        assert!(palette.select_color(3));
        assert_eq!(palette.selected_voxel_id(), 4);
        assert_eq!(palette.color_for_voxel(4), Some(palette.selected_color()));
        assert_eq!(palette.color_for_voxel(0), None);
    }

    #[test]
    fn test_out_of_range_selection_is_ignored() {
        let mut palette = ColorPalette::new(16);
        palette.select_color(2);
        assert!(!palette.select_color(palette.len()));
        assert_eq!(palette.selected_index(), 2);
    }

    #[test]
    fn test_palette_is_bounded() {
        let mut palette = ColorPalette::new(10);
        assert_eq!(palette.add_color(Color::new(0.1, 0.2, 0.3)), Some(8));
        assert_eq!(palette.add_default_color(), Some(9));
        assert!(palette.is_full());
        assert_eq!(palette.add_color(Color::new(1.0, 0.0, 0.0)), None);
        assert_eq!(palette.len(), 10);
    }

    #[test]
    fn test_small_palette_truncates_defaults() {
        let palette = ColorPalette::new(3);
        assert_eq!(palette.len(), 3);
        assert!(palette.is_full());
    }

    #[test]
    fn test_update_color() {
        let mut palette = ColorPalette::new(16);
        let red = Color::from_rgb255(255, 0, 0);
        assert!(palette.update_color(1, red));
        assert_eq!(palette.colors()[1], red);
        assert!(!palette.update_color(99, red));
    }

    #[test]
    fn test_rgb255_round_trip() {
        let color = Color::from_rgb255(12, 128, 255);
        assert_eq!(color.to_rgb255(), [12, 128, 255]);
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_rgb255(), [255, 0, 128]);
    }

    #[test]
    fn test_deserialize_rejects_broken_palettes() {
        for json in [
            r#"{"colors":[],"selected_index":3,"max_colors":0}"#,
            r#"{"colors":[],"max_colors":4}"#,
            r#"{"colors":[{"r":1.0,"g":0.0,"b":0.0}],"selected_index":1,"max_colors":4}"#,
            r#"{"colors":[{"r":1.0,"g":0.0,"b":0.0}],"max_colors":300}"#,
        ] {
            assert!(serde_json::from_str::<ColorPalette>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_saved_palette_loads_back() {
        let mut palette = ColorPalette::new(12);
        palette.add_color(Color::from_rgb255(10, 20, 30));
        palette.select_color(8);
        let json = serde_json::to_string(&palette).unwrap();
        let loaded: ColorPalette = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, palette);
        assert_eq!(loaded.selected_voxel_id(), 9);
    }

    #[test]
    fn test_capacity_clamped_to_voxel_ids() {
        let palette = ColorPalette::new(1000);
        assert_eq!(palette.max_colors(), MAX_PALETTE_COLORS);
    }
}

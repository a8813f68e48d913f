use crate::gesture::DEFAULT_DRAG_THRESHOLD;
use crate::thumbnail::{DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page editor configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorOptions {
    // Thumbnails
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// Scale passed to the rasterizer when rendering PDF pages
    pub thumbnail_scale: f32,

    // Gestures
    pub drag_threshold: f32,

    // Grid
    /// Fixed column count; 0 fits as many as the window allows
    pub grid_columns: usize,
    pub grid_spacing: f32,
    pub slot_width: f32,

    // Export
    /// Resolution at which image pixels map to page points
    pub image_dpi: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            thumbnail_scale: 0.25,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            grid_columns: 0,
            grid_spacing: 8.0,
            slot_width: 14.0,
            image_dpi: 72.0,
        }
    }
}

impl EditorOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(ComposeError::Config(
                "Thumbnail size must be non-zero".to_string(),
            ));
        }
        if !(self.thumbnail_scale > 0.0) {
            return Err(ComposeError::Config(format!(
                "Thumbnail scale must be positive, got {}",
                self.thumbnail_scale
            )));
        }
        if !(self.drag_threshold >= 0.0) {
            return Err(ComposeError::Config(format!(
                "Drag threshold must not be negative, got {}",
                self.drag_threshold
            )));
        }
        if !(self.image_dpi > 0.0) {
            return Err(ComposeError::Config(format!(
                "Image DPI must be positive, got {}",
                self.image_dpi
            )));
        }
        if self.grid_spacing < 0.0 || self.slot_width < 0.0 {
            return Err(ComposeError::Config(
                "Grid spacing and slot width must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

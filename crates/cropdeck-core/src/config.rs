//! Editor settings: crop policy, preview scale, save quality, filter.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::geometry::CropPolicy;
use crate::raster::{FilterType, MAX_SCALE_PERCENT, MIN_SCALE_PERCENT};

/// Default JPEG quality for saving.
pub const DEFAULT_SAVE_QUALITY: u8 = 50;

/// Default preview scale, in percent.
pub const DEFAULT_PREVIEW_SCALE: u32 = 100;

/// User-adjustable editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Policy applied to the next completed drag
    pub crop_policy: CropPolicy,
    /// Preview scale (10 to 200)
    pub preview_scale: u32,
    /// Lossy save quality (1 to 100)
    pub save_quality: u8,
    /// Filter used for preview resampling
    pub resample_filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            crop_policy: CropPolicy::Freeform,
            preview_scale: DEFAULT_PREVIEW_SCALE,
            save_quality: DEFAULT_SAVE_QUALITY,
            resample_filter: FilterType::Bilinear,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidConfig`] on malformed JSON or out-of-range
    /// values.
    pub fn from_json(json: &str) -> Result<Self, EditError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EditError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, EditError> {
        serde_json::to_string_pretty(self).map_err(|e| EditError::InvalidConfig(e.to_string()))
    }

    /// Check that every value is inside its documented range.
    pub fn validate(&self) -> Result<(), EditError> {
        if !(MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&self.preview_scale) {
            return Err(EditError::InvalidConfig(format!(
                "preview_scale must be {}-{}, got {}",
                MIN_SCALE_PERCENT, MAX_SCALE_PERCENT, self.preview_scale
            )));
        }
        if !(1..=100).contains(&self.save_quality) {
            return Err(EditError::InvalidConfig(format!(
                "save_quality must be 1-100, got {}",
                self.save_quality
            )));
        }
        Ok(())
    }
}

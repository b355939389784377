//! Cropping policies selectable by the user.

use serde::{Deserialize, Serialize};

/// Rule used to turn a dragged rectangle into the final crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPolicy {
    /// Keep the dragged rectangle as is.
    #[default]
    Freeform,
    /// Largest square anchored at the drag's top-left corner.
    Square,
    /// Dragged width, height derived at 9/16 of it.
    #[serde(rename = "widescreen_16x9")]
    Widescreen16x9,
    /// Dragged width, height derived at 3/4 of it.
    #[serde(rename = "classic_4x3")]
    Classic4x3,
    /// Bounding box with everything outside the inscribed circle zeroed.
    Circle,
}

impl CropPolicy {
    /// All policies in selector order.
    pub const ALL: [CropPolicy; 5] = [
        CropPolicy::Freeform,
        CropPolicy::Square,
        CropPolicy::Widescreen16x9,
        CropPolicy::Classic4x3,
        CropPolicy::Circle,
    ];

    /// Height-to-width ratio as `(numerator, denominator)` for the
    /// fixed-ratio policies.
    pub fn height_ratio(self) -> Option<(u32, u32)> {
        match self {
            CropPolicy::Widescreen16x9 => Some((9, 16)),
            CropPolicy::Classic4x3 => Some((3, 4)),
            _ => None,
        }
    }

    /// Label shown in policy selectors.
    pub fn label(self) -> &'static str {
        match self {
            CropPolicy::Freeform => "Freeform",
            CropPolicy::Square => "1:1 (Square)",
            CropPolicy::Widescreen16x9 => "16:9 (Widescreen)",
            CropPolicy::Classic4x3 => "4:3 Style",
            CropPolicy::Circle => "Circle",
        }
    }

    /// Parse a selector label. Short ratio forms ("1:1", "16:9", "4:3") are
    /// accepted alongside the full labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Freeform" => Some(CropPolicy::Freeform),
            "1:1 (Square)" | "1:1" | "Square" => Some(CropPolicy::Square),
            "16:9 (Widescreen)" | "16:9" | "Widescreen" => Some(CropPolicy::Widescreen16x9),
            "4:3 Style" | "4:3" => Some(CropPolicy::Classic4x3),
            "Circle" => Some(CropPolicy::Circle),
            _ => None,
        }
    }

    /// Map a selector index (see [`CropPolicy::ALL`]) to a policy.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl std::fmt::Display for CropPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

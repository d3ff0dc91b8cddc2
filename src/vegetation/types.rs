//! Vegetation type descriptors.
//!
//! A `VegetationType` describes one kind of blade: its silhouette (ordered
//! segments tapering toward the tip), color behavior, jitter ranges, and the
//! acceptance range over the type-selection noise field. Descriptors are
//! authored externally (JSON via serde) and read-only during generation.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// One ribbon segment: the width at its top edge and the fraction of total
/// blade height it spans. Fractions accumulate toward 1.0 along the list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub top_width: f32,
    pub height_fraction: f32,
}

/// Immutable descriptor of one vegetation kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VegetationType {
    pub name: String,
    /// Blade width at the base, meters (before scale jitter).
    pub base_width: f32,
    /// Total blade height, meters (before scale jitter).
    pub height: f32,
    /// Ordered base-to-tip segments.
    pub segments: Vec<Segment>,
    /// Apply the base-to-tip brightness gradient.
    pub gradient: bool,
    pub base_brightness: f32,
    pub tip_brightness: f32,
    /// Random jitter half-ranges per HSV channel, drawn once per blade.
    pub hue_jitter: f32,
    pub saturation_jitter: f32,
    pub value_jitter: f32,
    /// Uniform scale jitter range.
    pub scale_min: f32,
    pub scale_max: f32,
    /// Maximum random tilt away from surface alignment, radians.
    pub tilt_range: f32,
    /// Scale of the type-selection noise field, meters.
    pub noise_scale: f32,
    /// Acceptance range over the selection noise value, within [0, 1].
    pub range_min: f32,
    pub range_max: f32,
    /// Density multiplier; planting probability is clamp(density / 5, 0, 1).
    pub density: f32,
}

impl VegetationType {
    /// Vertices one blade of this type emits: a left/right pair per ring
    /// (base + one per segment) plus the apex.
    pub fn blade_vertex_count(&self) -> usize {
        2 * (self.segments.len() + 1) + 1
    }

    /// Whether a selection-noise value falls inside the acceptance range.
    pub fn accepts(&self, value: f32) -> bool {
        value >= self.range_min && value <= self.range_max
    }

    /// Independent planting probability applied after type selection.
    pub fn planting_probability(&self) -> f32 {
        (self.density / 5.0).clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_width > 0.0) || !(self.height >= 0.0) {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' has invalid size ({} x {})",
                self.name, self.base_width, self.height
            )));
        }
        if self.segments.is_empty() {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' has no segments",
                self.name
            )));
        }
        if !(0.0..=1.0).contains(&self.range_min)
            || !(0.0..=1.0).contains(&self.range_max)
            || self.range_min > self.range_max
        {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' acceptance range [{}, {}] is not within [0, 1]",
                self.name, self.range_min, self.range_max
            )));
        }
        if !(self.noise_scale > 0.0) {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' noise scale must be positive",
                self.name
            )));
        }
        if self.scale_min > self.scale_max || !(self.scale_min > 0.0) {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' scale range [{}, {}] is invalid",
                self.name, self.scale_min, self.scale_max
            )));
        }
        // Half-ranges feed symmetric rng draws during generation
        if !(self.tilt_range >= 0.0)
            || !(self.hue_jitter >= 0.0)
            || !(self.saturation_jitter >= 0.0)
            || !(self.value_jitter >= 0.0)
        {
            return Err(Error::Configuration(format!(
                "vegetation type '{}' has a negative jitter half-range",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered collection of vegetation type descriptors.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VegetationTypeTable {
    pub types: Vec<VegetationType>,
}

impl VegetationTypeTable {
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Validate every descriptor.
    pub fn validate(&self) -> Result<()> {
        for ty in &self.types {
            ty.validate()?;
        }
        Ok(())
    }

    /// Load a catalog from JSON produced by the authoring side.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("type table parse error: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("type table serialize error: {}", e)))
    }

    /// Built-in catalog of three blade kinds covering the [0, 1] selection
    /// range with a dense/sparse mix.
    pub fn builtin() -> Self {
        Self {
            types: vec![
                VegetationType {
                    name: "Tall Grass".into(),
                    base_width: 0.06,
                    height: 0.50,
                    segments: vec![
                        Segment { top_width: 0.050, height_fraction: 0.25 },
                        Segment { top_width: 0.038, height_fraction: 0.25 },
                        Segment { top_width: 0.024, height_fraction: 0.25 },
                        Segment { top_width: 0.012, height_fraction: 0.25 },
                    ],
                    gradient: true,
                    base_brightness: 0.55,
                    tip_brightness: 1.0,
                    hue_jitter: 0.02,
                    saturation_jitter: 0.10,
                    value_jitter: 0.10,
                    scale_min: 0.8,
                    scale_max: 1.3,
                    tilt_range: 0.25,
                    noise_scale: 30.0,
                    range_min: 0.0,
                    range_max: 0.55,
                    density: 4.0,
                },
                VegetationType {
                    name: "Meadow".into(),
                    base_width: 0.05,
                    height: 0.32,
                    segments: vec![
                        Segment { top_width: 0.040, height_fraction: 0.35 },
                        Segment { top_width: 0.022, height_fraction: 0.35 },
                        Segment { top_width: 0.010, height_fraction: 0.30 },
                    ],
                    gradient: true,
                    base_brightness: 0.60,
                    tip_brightness: 0.95,
                    hue_jitter: 0.03,
                    saturation_jitter: 0.12,
                    value_jitter: 0.08,
                    scale_min: 0.7,
                    scale_max: 1.1,
                    tilt_range: 0.35,
                    noise_scale: 30.0,
                    range_min: 0.55,
                    range_max: 0.82,
                    density: 3.0,
                },
                VegetationType {
                    name: "Dry Tuft".into(),
                    base_width: 0.035,
                    height: 0.18,
                    segments: vec![
                        Segment { top_width: 0.024, height_fraction: 0.5 },
                        Segment { top_width: 0.010, height_fraction: 0.5 },
                    ],
                    gradient: false,
                    base_brightness: 0.75,
                    tip_brightness: 0.75,
                    hue_jitter: 0.04,
                    saturation_jitter: 0.15,
                    value_jitter: 0.12,
                    scale_min: 0.6,
                    scale_max: 1.0,
                    tilt_range: 0.45,
                    noise_scale: 30.0,
                    range_min: 0.82,
                    range_max: 1.0,
                    density: 1.5,
                },
            ],
        }
    }
}

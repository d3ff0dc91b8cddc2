//! Blade geometry builder.
//!
//! Turns one placement into a tapering ribbon: a left/right vertex pair per
//! segment ring, quads between consecutive rings, and a single apex vertex
//! closing the tip. Appends into shared `MeshBuffers` so many placements
//! batch into one chunk mesh.

use crate::core::types::{Quat, Vec2, Vec3};
use crate::math::color::hsv_to_rgb;
use crate::vegetation::types::VegetationType;

/// Shared output buffers for one chunk mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Vec2>,
    /// RGBA per vertex; alpha carries normalized blade height for the
    /// external animation collaborator.
    pub colors: Vec<[f32; 4]>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One placement, fully resolved: where, how oriented, how large, what tint.
/// The HSV color seed is drawn once per blade so the whole blade is a single
/// tint before brightness shaping.
#[derive(Clone, Copy, Debug)]
pub struct Placement<'a> {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub color_hsv: [f32; 3],
    pub ty: &'a VegetationType,
}

/// Ambient-occlusion faking near the blade base.
#[derive(Clone, Copy, Debug)]
pub struct AoParams {
    pub enabled: bool,
    /// Darkening at the very base; eases out to nothing at 20% height.
    pub intensity: f32,
}

impl Default for AoParams {
    fn default() -> Self {
        Self { enabled: true, intensity: 0.3 }
    }
}

/// Fraction of blade height affected by the AO fake.
const AO_HEIGHT: f32 = 0.2;

/// Append one blade to `out`.
///
/// Emits `2 * (segments + 1) + 1` vertices: a base pair, one pair per
/// segment, and the apex.
pub fn build_blade(out: &mut MeshBuffers, placement: &Placement, ao: AoParams) {
    let ty = placement.ty;
    let total_height = ty.height * placement.scale;
    let right = placement.rotation * Vec3::X;
    let up = placement.rotation * Vec3::Y;

    let vertex_color = |t: f32| -> [f32; 4] {
        let mut brightness = if ty.gradient {
            ty.base_brightness + (ty.tip_brightness - ty.base_brightness) * t
        } else {
            1.0
        };
        if ao.enabled && t < AO_HEIGHT {
            let ease = t / AO_HEIGHT;
            brightness *= (1.0 - ao.intensity) + ao.intensity * ease;
        }
        let [h, s, v] = placement.color_hsv;
        let rgb = hsv_to_rgb([h, s, (v * brightness).clamp(0.0, 1.0)]);
        [rgb[0], rgb[1], rgb[2], t]
    };

    let push_pair = |out: &mut MeshBuffers, fraction: f32, width: f32| {
        // Guard zero-height blades: normalized height stays 0, never NaN
        let t = if total_height > 0.0 { fraction } else { 0.0 };
        let center = placement.position + up * (fraction * total_height);
        let half = width * placement.scale * 0.5;

        let ratio = if ty.base_width > 0.0 { width / ty.base_width } else { 0.0 };
        let color = vertex_color(t);

        out.positions.push(center - right * half);
        out.positions.push(center + right * half);
        out.uvs.push(Vec2::new(0.5 - ratio * 0.5, fraction));
        out.uvs.push(Vec2::new(0.5 + ratio * 0.5, fraction));
        out.colors.push(color);
        out.colors.push(color);
    };

    let base = out.positions.len() as u32;

    // Base ring, then one ring per segment, accumulating height fraction
    push_pair(out, 0.0, ty.base_width);
    let mut fraction = 0.0f32;
    for (i, segment) in ty.segments.iter().enumerate() {
        fraction = (fraction + segment.height_fraction).min(1.0);
        push_pair(out, fraction, segment.top_width);

        // Quad between the previous pair and this one
        let prev = base + (i as u32) * 2;
        let next = prev + 2;
        out.indices.extend_from_slice(&[prev, prev + 1, next + 1]);
        out.indices.extend_from_slice(&[prev, next + 1, next]);
    }

    // Apex closes the ribbon into a point; front and back winding so the
    // tip reads from both sides like the quads below it
    let apex = out.positions.len() as u32;
    let t = if total_height > 0.0 { 1.0 } else { 0.0 };
    out.positions.push(placement.position + up * total_height);
    out.uvs.push(Vec2::new(0.5, 1.0));
    out.colors.push(vertex_color(t));

    let last = apex - 2;
    out.indices.extend_from_slice(&[last, last + 1, apex]);
    out.indices.extend_from_slice(&[last + 1, last, apex]);
}

//! Terrain sampling: the surface the vegetation grows on.
//!
//! `TerrainSampler` is the seam to the external height-field provider. The
//! crate ships `FbmHeightField`, a noise-backed implementation used by the
//! demo, bench, and tests, and `FlatTerrain` for controlled test surfaces.

use glam::Vec3;
use ::noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Blended surface color at a point plus the total weight of the layers
/// that contributed. Points whose total weight falls below the configured
/// minimum carry no grass-eligible ground texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceColor {
    pub color: [f32; 3],
    pub total_weight: f32,
}

/// External height-field / surface-property provider.
pub trait TerrainSampler: Sync {
    /// Terrain height at world (x, z).
    fn height(&self, x: f32, z: f32) -> f32;

    /// Unit surface normal at world (x, z).
    fn normal(&self, x: f32, z: f32) -> Vec3;

    /// Blended surface color from the layers in `eligible_layers`.
    fn surface_color(&self, x: f32, z: f32, eligible_layers: &[usize]) -> SurfaceColor;
}

/// One surface-property layer of an `FbmHeightField`: a color whose blend
/// weight varies with its own noise mask.
#[derive(Clone, Debug)]
pub struct SurfaceLayer {
    pub color: [f32; 3],
    /// Scale of the layer's weight mask, meters.
    pub mask_scale: f32,
    /// Weight multiplier applied to the mask value.
    pub strength: f32,
}

/// Parameters for the built-in FBM height field.
#[derive(Clone, Debug)]
pub struct HeightFieldParams {
    pub seed: u32,
    /// Horizontal scale (larger = smoother).
    pub scale: f32,
    /// Vertical scale (max height).
    pub height_scale: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 100.0,
            height_scale: 12.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Noise-backed terrain: FBM height, central-difference normals, layered
/// noise-weighted surface colors.
pub struct FbmHeightField {
    params: HeightFieldParams,
    noise: Fbm<Perlin>,
    layers: Vec<SurfaceLayer>,
}

impl FbmHeightField {
    pub fn new(params: HeightFieldParams, layers: Vec<SurfaceLayer>) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);
        Self { params, noise, layers }
    }

    /// Default grassland-style field: two green layers and a bare-rock layer.
    pub fn grassland(seed: u32) -> Self {
        Self::new(
            HeightFieldParams { seed, ..Default::default() },
            vec![
                SurfaceLayer { color: [0.20, 0.46, 0.10], mask_scale: 25.0, strength: 1.0 },
                SurfaceLayer { color: [0.30, 0.52, 0.14], mask_scale: 9.0, strength: 0.7 },
                SurfaceLayer { color: [0.42, 0.40, 0.30], mask_scale: 14.0, strength: 0.4 },
            ],
        )
    }

    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer_weight(&self, layer_index: usize, layer: &SurfaceLayer, x: f32, z: f32) -> f32 {
        // Offset per layer so masks decorrelate
        let offset = layer_index as f32 * 517.0;
        let nx = ((x + offset) / layer.mask_scale) as f64;
        let nz = ((z - offset) / layer.mask_scale) as f64;
        let mask = ((self.noise.get([nx, nz]) + 1.0) / 2.0) as f32;
        (mask * layer.strength).max(0.0)
    }
}

impl TerrainSampler for FbmHeightField {
    fn height(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;
        let normalized = (self.noise.get([nx, nz]) + 1.0) / 2.0;
        (normalized * self.params.height_scale as f64) as f32
    }

    fn normal(&self, x: f32, z: f32) -> Vec3 {
        let eps = 0.5;
        let dh_dx = (self.height(x + eps, z) - self.height(x - eps, z)) / (2.0 * eps);
        let dh_dz = (self.height(x, z + eps) - self.height(x, z - eps)) / (2.0 * eps);
        Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
    }

    fn surface_color(&self, x: f32, z: f32, eligible_layers: &[usize]) -> SurfaceColor {
        let mut color = [0.0f32; 3];
        let mut total = 0.0f32;

        for &index in eligible_layers {
            let Some(layer) = self.layers.get(index) else { continue };
            let weight = self.layer_weight(index, layer, x, z);
            for c in 0..3 {
                color[c] += layer.color[c] * weight;
            }
            total += weight;
        }

        if total > 0.0 {
            for c in &mut color {
                *c /= total;
            }
        }
        SurfaceColor { color, total_weight: total }
    }
}

/// Flat surface with a constant color; deterministic fixture for tests and
/// scenarios that need every lattice point eligible.
#[derive(Clone, Debug)]
pub struct FlatTerrain {
    pub height: f32,
    pub color: [f32; 3],
    pub weight: f32,
}

impl Default for FlatTerrain {
    fn default() -> Self {
        Self { height: 0.0, color: [0.2, 0.5, 0.1], weight: 1.0 }
    }
}

impl TerrainSampler for FlatTerrain {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn normal(&self, _x: f32, _z: f32) -> Vec3 {
        Vec3::Y
    }

    fn surface_color(&self, _x: f32, _z: f32, eligible_layers: &[usize]) -> SurfaceColor {
        if eligible_layers.is_empty() {
            return SurfaceColor { color: [0.0; 3], total_weight: 0.0 };
        }
        SurfaceColor { color: self.color, total_weight: self.weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_deterministic_and_bounded() {
        let field = FbmHeightField::grassland(12345);
        for i in 0..40 {
            let (x, z) = (i as f32 * 7.3, i as f32 * -3.1);
            let h = field.height(x, z);
            assert_eq!(h, field.height(x, z));
            assert!(h >= 0.0 && h <= field.params().height_scale);
        }
    }

    #[test]
    fn test_normal_is_unit_and_upward() {
        let field = FbmHeightField::grassland(12345);
        for i in 0..20 {
            let n = field.normal(i as f32 * 11.0, i as f32 * 5.0);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_surface_color_respects_allow_list() {
        let field = FbmHeightField::grassland(7);

        let all: Vec<usize> = (0..field.layer_count()).collect();
        let full = field.surface_color(10.0, 20.0, &all);
        assert!(full.total_weight > 0.0);

        let none = field.surface_color(10.0, 20.0, &[]);
        assert_eq!(none.total_weight, 0.0);

        // Out-of-range indices are ignored, not an error
        let bogus = field.surface_color(10.0, 20.0, &[99]);
        assert_eq!(bogus.total_weight, 0.0);

        let single = field.surface_color(10.0, 20.0, &[0]);
        assert!(single.total_weight <= full.total_weight);
    }

    #[test]
    fn test_blended_color_is_normalized() {
        let field = FbmHeightField::grassland(99);
        let all: Vec<usize> = (0..field.layer_count()).collect();
        let sample = field.surface_color(3.0, 4.0, &all);
        for c in sample.color {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_flat_terrain() {
        let flat = FlatTerrain::default();
        assert_eq!(flat.height(5.0, 5.0), 0.0);
        assert_eq!(flat.normal(1.0, 2.0), Vec3::Y);
        assert_eq!(flat.surface_color(0.0, 0.0, &[0]).total_weight, 1.0);
        assert_eq!(flat.surface_color(0.0, 0.0, &[]).total_weight, 0.0);
    }
}

//! Cellular (Voronoi-style) noise.
//!
//! Each unit cell owns one feature point derived from a deterministic hash of
//! the cell's integer coordinates. Queries scan the 3x3 neighborhood, track
//! the two smallest feature distances (F1, F2) under a selectable metric, and
//! map them to the configured output mode.

use crate::core::error::Error;
use crate::core::types::Result;

/// Distance metric between query point and feature points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DistanceMetric {
    Euclidean,
    Manhattan,
    Chebyshev,
    /// Minkowski distance with configurable exponent (> 0).
    Minkowski(f32),
}

/// Output mode of a cellular field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellularMode {
    /// Distance to the nearest feature point.
    F1,
    /// Distance to the second-nearest feature point.
    F2,
    /// F2 - F1: zero at feature points and along Voronoi edges' far side,
    /// producing a crack pattern.
    F2MinusF1,
    /// (F1 + F2) / 2.
    Average,
    /// Raw hash-derived identity scalar of the owning cell.
    CellId,
    /// Per-cell random value in [0, 1].
    CellValue,
}

/// Parameters for a cellular noise field.
#[derive(Clone, Debug)]
pub struct CellularNoiseParams {
    pub seed: u32,
    /// Cell size in meters.
    pub scale: f32,
    /// Feature point displacement from cell center, 0 (regular grid) to 1.
    /// Values outside [0, 1] are clamped at construction.
    pub jitter: f32,
    pub metric: DistanceMetric,
    pub mode: CellularMode,
}

impl Default for CellularNoiseParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 8.0,
            jitter: 1.0,
            metric: DistanceMetric::Euclidean,
            mode: CellularMode::F1,
        }
    }
}

impl CellularNoiseParams {
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Configuration(format!(
                "cellular noise scale must be positive, got {}",
                self.scale
            )));
        }
        if let DistanceMetric::Minkowski(p) = self.metric {
            if !p.is_finite() || p <= 0.0 {
                return Err(Error::Configuration(format!(
                    "Minkowski exponent must be positive, got {}",
                    p
                )));
            }
        }
        Ok(())
    }
}

/// Cellular noise field. All distance-based modes output values in [0, 1];
/// `CellId` outputs the raw hash scalar of the owning cell.
pub struct CellularNoise {
    params: CellularNoiseParams,
}

impl CellularNoise {
    /// Create a field from validated parameters. Jitter is clamped to [0, 1].
    pub fn new(mut params: CellularNoiseParams) -> Result<Self> {
        params.validate()?;
        params.jitter = params.jitter.clamp(0.0, 1.0);
        Ok(Self { params })
    }

    pub fn params(&self) -> &CellularNoiseParams {
        &self.params
    }

    /// Integer hash producing a u32; stable per (cell, seed).
    fn hash_cell(ix: i32, iz: i32, seed: u32) -> u32 {
        let mut h = (ix as u32).wrapping_mul(374761393)
            .wrapping_add((iz as u32).wrapping_mul(668265263))
            .wrapping_add(seed.wrapping_mul(1274126177));
        h = (h ^ (h >> 13)).wrapping_mul(1103515245);
        h ^ (h >> 16)
    }

    /// Hash mapped to [0, 1].
    fn hash_unit(ix: i32, iz: i32, seed: u32) -> f32 {
        (Self::hash_cell(ix, iz, seed) & 0x7FFFFFFF) as f32 / 0x7FFFFFFF_u32 as f32
    }

    /// The feature point owned by a cell, in cell-space coordinates.
    fn feature_point(&self, ix: i32, iz: i32) -> (f32, f32) {
        let jx = Self::hash_unit(ix, iz, self.params.seed);
        let jz = Self::hash_unit(ix, iz, self.params.seed ^ 0x9E37_79B9);
        (
            ix as f32 + 0.5 + (jx - 0.5) * self.params.jitter,
            iz as f32 + 0.5 + (jz - 0.5) * self.params.jitter,
        )
    }

    fn distance(&self, dx: f32, dz: f32) -> f32 {
        let (ax, az) = (dx.abs(), dz.abs());
        match self.params.metric {
            DistanceMetric::Euclidean => (ax * ax + az * az).sqrt(),
            DistanceMetric::Manhattan => ax + az,
            DistanceMetric::Chebyshev => ax.max(az),
            DistanceMetric::Minkowski(p) => (ax.powf(p) + az.powf(p)).powf(1.0 / p),
        }
    }

    /// Sample the field at world coordinates (x, z).
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.sample_cell_space(x / self.params.scale, z / self.params.scale)
    }

    fn sample_cell_space(&self, sx: f32, sz: f32) -> f32 {
        let cx = sx.floor() as i32;
        let cz = sz.floor() as i32;

        let mut f1 = f32::INFINITY;
        let mut f2 = f32::INFINITY;
        let mut owner = (cx, cz);

        for dz in -1..=1 {
            for dx in -1..=1 {
                let (ix, iz) = (cx + dx, cz + dz);
                let (fx, fz) = self.feature_point(ix, iz);
                let d = self.distance(sx - fx, sz - fz);
                if d < f1 {
                    f2 = f1;
                    f1 = d;
                    owner = (ix, iz);
                } else if d < f2 {
                    f2 = d;
                }
            }
        }

        match self.params.mode {
            CellularMode::F1 => f1.clamp(0.0, 1.0),
            CellularMode::F2 => f2.clamp(0.0, 1.0),
            CellularMode::F2MinusF1 => (f2 - f1).clamp(0.0, 1.0),
            CellularMode::Average => ((f1 + f2) * 0.5).clamp(0.0, 1.0),
            CellularMode::CellId => {
                Self::hash_cell(owner.0, owner.1, self.params.seed) as f32
                    / u32::MAX as f32
            }
            CellularMode::CellValue => {
                Self::hash_unit(owner.0, owner.1, self.params.seed ^ 0x85EB_CA6B)
            }
        }
    }

    /// Multi-octave variant: sums octave samples at increasing frequency and
    /// decreasing amplitude, normalized by total amplitude.
    pub fn fractal_sample(&self, x: f32, z: f32, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;

        for _ in 0..octaves.max(1) {
            sum += self.sample(x * frequency, z * frequency) * amplitude;
            total += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }

        (sum / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(metric: DistanceMetric, mode: CellularMode) -> CellularNoise {
        CellularNoise::new(CellularNoiseParams {
            seed: 42,
            scale: 1.0,
            jitter: 1.0,
            metric,
            mode,
        })
        .unwrap()
    }

    #[test]
    fn test_distance_modes_in_range() {
        for mode in [
            CellularMode::F1,
            CellularMode::F2,
            CellularMode::F2MinusF1,
            CellularMode::Average,
        ] {
            for metric in [
                DistanceMetric::Euclidean,
                DistanceMetric::Manhattan,
                DistanceMetric::Chebyshev,
                DistanceMetric::Minkowski(3.0),
            ] {
                let f = field(metric, mode);
                for ix in -12..12 {
                    for iz in -12..12 {
                        let v = f.sample(ix as f32 * 0.37, iz as f32 * 0.53);
                        assert!(
                            (0.0..=1.0).contains(&v),
                            "{:?}/{:?} out of range: {}",
                            mode,
                            metric,
                            v
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic_and_translation_stable() {
        let a = field(DistanceMetric::Euclidean, CellularMode::F1);
        let b = field(DistanceMetric::Euclidean, CellularMode::F1);
        for i in 0..40 {
            let (x, z) = (i as f32 * 0.71 - 10.0, i as f32 * 1.13 - 10.0);
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
        // Same cell coordinate always yields the same feature point
        assert_eq!(a.feature_point(3, -7), b.feature_point(3, -7));
    }

    #[test]
    fn test_f2_minus_f1_zero_at_feature_point() {
        let f = field(DistanceMetric::Euclidean, CellularMode::F2MinusF1);
        let (fx, fz) = f.feature_point(2, 3);
        // F1 is exactly 0 at the feature point, so F2 - F1 = F2 > 0...
        // unless two feature points coincide, which the hash makes negligible.
        let f1_field = field(DistanceMetric::Euclidean, CellularMode::F1);
        assert_eq!(f1_field.sample_cell_space(fx, fz), 0.0);
        assert!(f.sample_cell_space(fx, fz) > 0.0);
    }

    #[test]
    fn test_f2_minus_f1_rises_away_from_edge() {
        // With zero jitter the feature points sit at cell centers, so the
        // Voronoi edge between cells (0,0) and (1,0) is the x = 1 line.
        // F2 - F1 is 0 on the edge and grows monotonically toward the
        // nearer feature point.
        let f = CellularNoise::new(CellularNoiseParams {
            seed: 42,
            scale: 1.0,
            jitter: 0.0,
            metric: DistanceMetric::Euclidean,
            mode: CellularMode::F2MinusF1,
        })
        .unwrap();

        let edge = f.sample_cell_space(1.0, 0.5);
        assert!(edge.abs() < 1e-6, "edge value should be ~0, got {}", edge);

        let mut prev = edge;
        for i in 1..=8 {
            // Walk from the edge toward the feature point at (0.5, 0.5)
            let v = f.sample_cell_space(1.0 - i as f32 * 0.05, 0.5);
            assert!(v >= prev, "expected monotonic rise off the edge");
            prev = v;
        }
        assert!(prev > 0.0);
    }

    #[test]
    fn test_cell_value_constant_within_owner() {
        let f = field(DistanceMetric::Euclidean, CellularMode::CellValue);
        let (fx, fz) = f.feature_point(5, 5);
        // Points very near the feature point share an owner
        let v0 = f.sample_cell_space(fx, fz);
        let v1 = f.sample_cell_space(fx + 0.01, fz - 0.01);
        assert_eq!(v0, v1);
        assert!((0.0..=1.0).contains(&v0));
    }

    #[test]
    fn test_fractal_sample_in_range() {
        let f = field(DistanceMetric::Euclidean, CellularMode::F2MinusF1);
        for i in 0..50 {
            let v = f.fractal_sample(i as f32 * 0.9, i as f32 * -0.4, 4, 2.0, 0.5);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(CellularNoise::new(CellularNoiseParams {
            scale: 0.0,
            ..Default::default()
        })
        .is_err());
        assert!(CellularNoise::new(CellularNoiseParams {
            metric: DistanceMetric::Minkowski(0.0),
            ..Default::default()
        })
        .is_err());
        assert!(CellularNoise::new(CellularNoiseParams {
            metric: DistanceMetric::Minkowski(f32::NAN),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_jitter_clamped() {
        let f = CellularNoise::new(CellularNoiseParams {
            jitter: 5.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(f.params().jitter, 1.0);
    }
}

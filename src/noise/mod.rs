//! Deterministic scalar noise fields over 2D coordinates.
//!
//! Two families drive vegetation placement:
//! - `GradientNoise`: smooth fractal noise for acceptance masking and
//!   per-point height jitter.
//! - `CellularNoise`: Voronoi-style feature-point noise with selectable
//!   distance metrics and output modes.
//!
//! All evaluators are pure: same parameters + same coordinates always
//! produce the same value, and outputs never contain NaN.

pub mod gradient;
pub mod cellular;

pub use gradient::{GradientNoise, GradientNoiseParams};
pub use cellular::{CellularMode, CellularNoise, CellularNoiseParams, DistanceMetric};

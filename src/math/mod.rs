//! Math utilities

pub mod aabb;
pub mod color;

pub use aabb::Aabb;
pub use color::{hsv_to_rgb, rgb_to_hsv};

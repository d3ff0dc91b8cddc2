//! Verdure - procedural vegetation geometry over height-field terrain

pub mod core;
pub mod math;
pub mod noise;
pub mod terrain;
pub mod vegetation;
pub mod chunk;
pub mod lod;
pub mod generation;
pub mod wind;
pub mod system;

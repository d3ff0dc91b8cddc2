//! Vegetation type descriptors, type selection, and blade geometry.

pub mod types;
pub mod selector;
pub mod blade;

pub use types::{Segment, VegetationType, VegetationTypeTable};
pub use selector::{SelectionPolicy, TypeSelector};
pub use blade::{build_blade, AoParams, MeshBuffers, Placement};

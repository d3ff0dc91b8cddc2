//! Error types for vegetation generation

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration: bad noise parameters, empty domain,
    /// non-positive chunk size, non-ascending LOD thresholds.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required external collaborator (terrain sampler) is not bound.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

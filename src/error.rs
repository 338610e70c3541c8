//! Error types for wave generation, uniform binding and GPU bootstrap.

use thiserror::Error;

use crate::uniforms::UniformKind;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Bad sampling ranges, non-positive wave count, etc.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An array uniform is longer than the capacity the shader declares
    #[error("Uniform `{name}` needs {requested} elements but the shader declares {capacity}")]
    UniformContractMismatch {
        name: String,
        requested: usize,
        capacity: usize,
    },

    /// A uniform was written with a value of the wrong kind
    #[error("Uniform `{name}` is declared as {expected} but was given {found}")]
    UniformKindMismatch {
        name: String,
        expected: UniformKind,
        found: UniformKind,
    },

    #[error("Unknown uniform `{0}`")]
    UnknownUniform(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for jarvis-scene
//!
//! ## Table of Contents
//! 1. SceneError - Main error enum

use thiserror::Error;

/// Errors raised while constructing or decoding scene values.
///
/// Scene generation and caption mapping never fail; these only surface when
/// a caller builds a value by hand or decodes one from the wire.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Color string is not `#` followed by six hex digits
    #[error("Invalid color: {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    /// Scale is zero, negative or not finite
    #[error("Invalid scale: {0} (must be finite and greater than zero)")]
    InvalidScale(f64),

    /// Scene descriptor without any objects
    #[error("Scene must contain at least one object")]
    EmptyScene,

    /// Keyword profile name not recognized
    #[error("Unknown keyword profile: {0}")]
    UnknownProfile(String),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;

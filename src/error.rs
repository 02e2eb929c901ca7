//! Error handling for Strata
//!
//! Structural and input errors fail fast at the call that triggered them.
//! Non-fatal conditions (fixed-point non-convergence, near-singular
//! frequency samples) are never raised as errors; they travel as flags on
//! the returned values so batch sweeps complete with partial-quality
//! markers instead of aborting.

use thiserror::Error;

/// Result type alias for Strata operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// Main error type for Strata operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteError {
    /// Structurally invalid layer data; model construction aborts.
    #[error("Invalid site model: {reason}")]
    InvalidModel { reason: String },

    /// A requested depth or depth range reaches below the measured column
    /// of a profile that has no half-space to extrapolate into. Fatal to
    /// the call, not to the model.
    #[error(
        "Requested depth {requested} m exceeds the {available} m profile \
         and no half-space is defined for extrapolation"
    )]
    DepthExceedsModel { requested: f64, available: f64 },

    /// Averaging depth must be strictly positive and finite.
    #[error("Invalid averaging depth: {depth}")]
    InvalidDepth { depth: f64 },

    /// The frequency array must be non-empty, finite, strictly positive
    /// and strictly increasing.
    #[error("Invalid frequency array: {reason}")]
    InvalidFrequencies { reason: String },

    /// The incidence angle must lie in [0, 90) degrees from the vertical.
    #[error("Invalid incidence angle: {angle} degrees")]
    InvalidIncidence { angle: f64 },

    /// The operation cannot be posed without a terminal half-space.
    #[error("Site model has no half-space: {operation} requires one")]
    MissingHalfSpace { operation: &'static str },
}

impl SiteError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            SiteError::InvalidModel { .. } => "INVALID_MODEL",
            SiteError::DepthExceedsModel { .. } => "DEPTH_EXCEEDS_MODEL",
            SiteError::InvalidDepth { .. } => "INVALID_DEPTH",
            SiteError::InvalidFrequencies { .. } => "INVALID_FREQUENCIES",
            SiteError::InvalidIncidence { .. } => "INVALID_INCIDENCE",
            SiteError::MissingHalfSpace { .. } => "MISSING_HALF_SPACE",
        }
    }

    /// Check whether the model that produced this error is still usable.
    ///
    /// Only construction failures invalidate the model; every other error
    /// is fatal to the single call that raised it.
    pub fn invalidates_model(&self) -> bool {
        matches!(self, SiteError::InvalidModel { .. })
    }
}

//! # Error Types
//!
//! Structured error types for rcbeam_core. These errors cover the *validation*
//! category: inputs that cannot be designed at all (unknown grade, bar size
//! outside the catalog, negative geometry). A design that runs but does not
//! work (concrete crushing, no feasible layout) is not an error here; it is a
//! [`DesignFailure`](crate::calculations::rc_beam::DesignFailure) carried in
//! the design result together with the trace.
//!
//! ## Example
//!
//! ```rust
//! use rcbeam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_mm: f64) -> CalcResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "width_mm".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rcbeam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// so callers can point the user at the offending input.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material grade not found in the grade table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A bar or link diameter that is not part of the catalog
    #[error("Diameter {diameter_mm} mm is not in the {catalog} catalog")]
    UnknownDiameter { catalog: String, diameter_mm: f64 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnknownDiameter error
    pub fn unknown_diameter(catalog: impl Into<String>, diameter_mm: f64) -> Self {
        CalcError::UnknownDiameter {
            catalog: catalog.into(),
            diameter_mm,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::UnknownDiameter { .. } => "UNKNOWN_DIAMETER",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities with a uniform message.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

/// Reject values that are not strictly positive (NaN included).
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

//! # Error Types
//!
//! Structured error types for abono_core. Incomplete input is *not* an error
//! here: it is reported through
//! [`CalculationOutcome::Incomplete`](crate::calculations::CalculationOutcome).
//! These variants cover malformed input at the collection boundary, caller
//! contract violations, and export failures.
//!
//! ## Example
//!
//! ```rust
//! use abono_core::errors::{CalcError, CalcResult};
//!
//! fn validate_area(surface_area_m2: f64) -> CalcResult<()> {
//!     if surface_area_m2 < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "surface_area_m2".to_string(),
//!             value: surface_area_m2.to_string(),
//!             reason: "El valor no puede ser negativo".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::IncompleteReason;

/// Result type alias for abono_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation, formatting and export operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A raw field value is malformed (not a number, negative, not finite)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Export was requested for results that have not reached every tier
    #[error("Results are incomplete: {missing} not reached")]
    IncompleteResults { missing: IncompleteReason },

    /// The document renderer failed (Typst compilation or PDF export)
    #[error("Render failed during {stage}: {reason}")]
    RenderFailed { stage: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

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

    /// Create an IncompleteResults error
    pub fn incomplete_results(missing: IncompleteReason) -> Self {
        CalcError::IncompleteResults { missing }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error points at a bug in the calling shell rather than
    /// at user input or the environment.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CalcError::IncompleteResults { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::IncompleteResults { .. } => "INCOMPLETE_RESULTS",
            CalcError::RenderFailed { .. } => "RENDER_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("surface_area_m2", "-5", "El valor no puede ser negativo");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::incomplete_results(IncompleteReason::IrrigationTime).error_code(),
            "INCOMPLETE_RESULTS"
        );
        assert_eq!(CalcError::render_failed("compile", "boom").error_code(), "RENDER_FAILED");
    }

    #[test]
    fn test_incomplete_message_names_tier() {
        let error = CalcError::incomplete_results(IncompleteReason::FertilizerConductivity);
        assert_eq!(error.to_string(), "Results are incomplete: fertilizer_conductivity not reached");
        assert!(error.is_contract_violation());
        assert!(!CalcError::file_error("write", "/tmp/x", "denied").is_contract_violation());
    }
}

//! # Calculations
//!
//! The calculation engine. It follows the same pattern throughout:
//!
//! - [`InputFields`] - Raw field values (JSON-serializable)
//! - [`ResultBundle`] - Derived metrics, with later tiers optional
//! - [`compute`] - Pure function returning a [`CalculationOutcome`]
//!
//! ## Modules
//!
//! - [`fertilizer`] - Tiered water and fertilizer calculation
//! - [`input`] - Field parsing and validation at the collection boundary

pub mod fertilizer;
pub mod input;

pub use fertilizer::{
    compute, CalculationOutcome, FinalResults, IncompleteReason, InputFields, ResultBundle,
};
pub use input::{InputField, ALL_FIELDS};

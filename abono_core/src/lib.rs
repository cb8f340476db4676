//! # abono_core - Greenhouse Fertilizer Calculation Engine
//!
//! `abono_core` computes how much water and fertilizer a drip-irrigated
//! greenhouse consumes per irrigation run, and renders the result as a PDF
//! report or a shareable text summary. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Tiered**: Partial input yields partial results plus a hint, never an error
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use abono_core::{compute, InputFields};
//!
//! let input = InputFields::new(1000.0, 2000, 2.0)
//!     .with_irrigation_minutes(30.0)
//!     .with_fertilizer_conductivity(1.5);
//!
//! let outcome = compute(&input);
//! let results = outcome.results().unwrap().finalize().unwrap();
//! assert!((results.fertilizer_used_kg - 1.8).abs() < 1e-9);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&outcome).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Input fields, tier gating and the result bundle
//! - [`equations`] - The irrigation formulas and their display metadata
//! - [`report`] - Report rows and the share text
//! - [`pdf`] - PDF rendering via Typst
//! - [`settings`] - Report configuration
//! - [`units`] - Unit symbols and display precision
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON loading and atomic saves for shells

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod pdf;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    compute, CalculationOutcome, FinalResults, IncompleteReason, InputField, InputFields,
    ResultBundle,
};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_input, load_settings, save_document, save_input};
pub use pdf::format_document;
pub use report::{format_share_summary, format_share_text, report_filename, ReportContext};
pub use settings::{PaperSize, ReportSettings};

//! # Irrigation Equations
//!
//! All formulas used by the calculation engine live here, once. Keeping them
//! in one place means the water and fertilizer figures shown on screen, in
//! the PDF and in the share text all come from the same derivation.
//!
//! ## Modules
//!
//! - [`irrigation`] - The five chained formulas and their constants
//! - [`registry`] - Labels, captions and printable formulas per result

pub mod irrigation;
pub mod registry;

pub use irrigation::{
    emitters_per_square_meter,
    fertilizer_used_kg,
    flow_per_1000m2_per_hour,
    liters_per_hour,
    water_used_liters,
    FERTILIZER_DIVISOR,
    MINUTES_PER_HOUR,
    REFERENCE_AREA_M2,
};

pub use registry::{Formula, FormulaMetadata, ALL_FORMULAS};

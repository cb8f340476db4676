//! # Formula Registry
//!
//! Display metadata for each derived quantity: the label, the caption in
//! words shown under a metric and in the printed formula list, and the
//! formula in symbols.
//!
//! ```rust
//! use abono_core::equations::registry::Formula;
//!
//! let meta = Formula::WaterUsed.metadata();
//! assert_eq!(meta.name, "Cantidad de agua gastada en este riego");
//! ```

use serde::{Deserialize, Serialize};

/// Everything needed to show a formula next to its result.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Result label (e.g., "Litros de agua por hora")
    pub name: &'static str,
    /// Caption in words, as shown under the metric
    pub caption: &'static str,
    /// The formula in symbols
    pub formula_plain: &'static str,
}

/// The five derived quantities, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// G / A
    EmittersPerSquareMeter,
    /// A × (G/A) × q
    LitersPerHour,
    /// Q / (A/1000)
    FlowPer1000m2PerHour,
    /// (Q/60) × t
    WaterUsed,
    /// (Q₁₀₀₀/100000) × CE × t × (A/1000)
    FertilizerUsed,
}

/// All formulas in evaluation order
pub const ALL_FORMULAS: [Formula; 5] = [
    Formula::EmittersPerSquareMeter,
    Formula::LitersPerHour,
    Formula::FlowPer1000m2PerHour,
    Formula::WaterUsed,
    Formula::FertilizerUsed,
];

impl Formula {
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::EmittersPerSquareMeter => FormulaMetadata {
                name: "Goteros por metro cuadrado",
                caption: "Goteros totales / Superficie del invernadero",
                formula_plain: "G / A",
            },
            Formula::LitersPerHour => FormulaMetadata {
                name: "Litros de agua por hora",
                caption: "Superficie × Goteros por m² × Caudal de cada gotero",
                formula_plain: "A × (G/A) × q",
            },
            Formula::FlowPer1000m2PerHour => FormulaMetadata {
                name: "Caudal cada 1000 m² por hora",
                caption: "Litros de agua por hora / (Superficie / 1000)",
                formula_plain: "Q / (A / 1000)",
            },
            Formula::WaterUsed => FormulaMetadata {
                name: "Cantidad de agua gastada en este riego",
                caption: "((Superficie × Goteros por m² × Caudal) / 60) × Tiempo de riego",
                formula_plain: "(Q / 60) × t",
            },
            Formula::FertilizerUsed => FormulaMetadata {
                name: "Abono gastado en el riego",
                caption: "(Caudal cada 1000 m² por hora / 100000) × CE del abono × Tiempo de riego × (Superficie / 1000)",
                formula_plain: "(Q₁₀₀₀ / 100000) × CE × t × (A / 1000)",
            },
        }
    }

    /// Shorthand for `metadata().caption`
    pub fn caption(&self) -> &'static str {
        self.metadata().caption
    }
}

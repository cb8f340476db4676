//! # Units
//!
//! The fixed units this calculator reports in, with their printed symbols
//! and the number of decimals each quantity is shown with. There is no unit
//! conversion: inputs and outputs always use these units.
//!
//! ```rust
//! use abono_core::units::Unit;
//!
//! assert_eq!(Unit::SquareMeters.format(1000.0), "1000.00 m²");
//! assert_eq!(Unit::Minutes.format(30.0), "30.0 minutos");
//! ```

use serde::{Deserialize, Serialize};

/// A reported quantity's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Surface area (m²)
    SquareMeters,
    /// Emitter flow (L×H⁻¹)
    LitersPerHourPerEmitter,
    /// Water volume or hourly flow shown as liters (L)
    Liters,
    /// Fertilizer mass (Kg)
    Kilograms,
    /// Irrigation time (minutos)
    Minutes,
    /// Dimensionless count
    Count,
    /// Emitter density, printed without a symbol
    Density,
    /// Fertilizer conductivity, printed without a symbol
    Conductivity,
}

impl Unit {
    /// Plain-text symbol (empty when printed bare)
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::SquareMeters => "m²",
            Unit::LitersPerHourPerEmitter => "L×H⁻¹",
            Unit::Liters => "L",
            Unit::Kilograms => "Kg",
            Unit::Minutes => "minutos",
            Unit::Count | Unit::Density | Unit::Conductivity => "",
        }
    }

    /// Symbol in Typst markup
    pub fn symbol_typst(&self) -> &'static str {
        match self {
            Unit::SquareMeters => "m#super[2]",
            Unit::LitersPerHourPerEmitter => "L×H#super[−1]",
            other => other.symbol(),
        }
    }

    /// Fixed decimal places
    pub fn decimals(&self) -> usize {
        match self {
            Unit::Count => 0,
            Unit::Minutes => 1,
            Unit::Density => 4,
            Unit::SquareMeters
            | Unit::LitersPerHourPerEmitter
            | Unit::Liters
            | Unit::Kilograms
            | Unit::Conductivity => 2,
        }
    }

    /// The number alone, at this unit's precision
    pub fn format_number(&self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }

    /// Number and symbol, as plain text
    pub fn format(&self, value: f64) -> String {
        with_symbol(self.format_number(value), self.symbol())
    }

    /// Number and symbol, as Typst markup
    pub fn format_typst(&self, value: f64) -> String {
        with_symbol(self.format_number(value), self.symbol_typst())
    }
}

fn with_symbol(number: String, symbol: &str) -> String {
    if symbol.is_empty() {
        number
    } else {
        format!("{} {}", number, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_per_unit() {
        assert_eq!(Unit::Density.format(2.0), "2.0000");
        assert_eq!(Unit::Liters.format(4000.0), "4000.00 L");
        assert_eq!(Unit::Kilograms.format(1.8000000000000003), "1.80 Kg");
        assert_eq!(Unit::Count.format(2000.0), "2000");
        assert_eq!(Unit::Conductivity.format(1.5), "1.50");
    }

    #[test]
    fn test_typst_symbols() {
        assert_eq!(Unit::SquareMeters.format_typst(12.5), "12.50 m#super[2]");
        assert_eq!(Unit::Kilograms.format_typst(1.8), "1.80 Kg");
        assert_eq!(Unit::LitersPerHourPerEmitter.format(2.0), "2.00 L×H⁻¹");
    }
}

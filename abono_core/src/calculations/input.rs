//! # Input Collection Boundary
//!
//! Parsing and range checks for raw field text. This is where malformed
//! input fails hard; once a value is in [`InputFields`], the engine treats
//! anything not > 0 as "not provided yet".
//!
//! ```rust
//! use abono_core::calculations::{InputField, InputFields};
//!
//! let mut input = InputFields::default();
//! input.set_field(InputField::SurfaceArea, "1250,5").unwrap();
//! input.set_field(InputField::TotalEmitters, "2400").unwrap();
//! assert_eq!(input.surface_area_m2, 1250.5);
//!
//! assert!(input.set_field(InputField::EmitterFlow, "dos").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::fertilizer::InputFields;
use crate::errors::{CalcError, CalcResult};

/// The six form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    GreenhouseId,
    SurfaceArea,
    TotalEmitters,
    EmitterFlow,
    FertilizerConductivity,
    IrrigationMinutes,
}

/// All fields in display order
pub const ALL_FIELDS: [InputField; 6] = [
    InputField::GreenhouseId,
    InputField::SurfaceArea,
    InputField::TotalEmitters,
    InputField::EmitterFlow,
    InputField::FertilizerConductivity,
    InputField::IrrigationMinutes,
];

impl InputField {
    /// JSON key of the field in [`InputFields`]
    pub fn key(&self) -> &'static str {
        match self {
            InputField::GreenhouseId => "greenhouse_id",
            InputField::SurfaceArea => "surface_area_m2",
            InputField::TotalEmitters => "total_emitters",
            InputField::EmitterFlow => "emitter_flow_lph",
            InputField::FertilizerConductivity => "fertilizer_conductivity",
            InputField::IrrigationMinutes => "irrigation_minutes",
        }
    }

    /// Form label, including the unit
    pub fn prompt(&self) -> &'static str {
        match self {
            InputField::GreenhouseId => "Número de invernadero",
            InputField::SurfaceArea => "Superficie del invernadero (m²)",
            InputField::TotalEmitters => "Goteros totales",
            InputField::EmitterFlow => "Caudal de cada gotero (L×H⁻¹)",
            InputField::FertilizerConductivity => "CE del abono",
            InputField::IrrigationMinutes => "Tiempo de riego (minutos)",
        }
    }

    /// Current value as text, in the precision the form shows it
    pub fn display_value(&self, input: &InputFields) -> String {
        match self {
            InputField::GreenhouseId => input.greenhouse_label().unwrap_or_default().to_string(),
            InputField::SurfaceArea => format!("{:.2}", input.surface_area_m2),
            InputField::TotalEmitters => input.total_emitters.to_string(),
            InputField::EmitterFlow => format!("{:.2}", input.emitter_flow_lph),
            InputField::FertilizerConductivity => format!("{:.2}", input.fertilizer_conductivity),
            InputField::IrrigationMinutes => format!("{:.1}", input.irrigation_minutes),
        }
    }
}

impl InputFields {
    /// Parse `raw` and store it in `field`.
    ///
    /// Blank text clears the field. Numbers accept `,` or `.` as decimal
    /// separator. Negative, non-finite or non-numeric text is rejected and
    /// leaves the current value untouched.
    pub fn set_field(&mut self, field: InputField, raw: &str) -> CalcResult<()> {
        let raw = raw.trim();
        match field {
            InputField::GreenhouseId => {
                self.greenhouse_id = (!raw.is_empty()).then(|| raw.to_string());
            }
            InputField::SurfaceArea => self.surface_area_m2 = parse_real(field, raw)?,
            InputField::TotalEmitters => self.total_emitters = parse_count(field, raw)?,
            InputField::EmitterFlow => self.emitter_flow_lph = parse_real(field, raw)?,
            InputField::FertilizerConductivity => {
                self.fertilizer_conductivity = parse_real(field, raw)?
            }
            InputField::IrrigationMinutes => self.irrigation_minutes = parse_real(field, raw)?,
        }
        Ok(())
    }

    /// Check values that arrived already typed (e.g. from JSON).
    ///
    /// Zero is valid; it just leaves a tier unreached.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            (InputField::SurfaceArea, self.surface_area_m2),
            (InputField::EmitterFlow, self.emitter_flow_lph),
            (InputField::FertilizerConductivity, self.fertilizer_conductivity),
            (InputField::IrrigationMinutes, self.irrigation_minutes),
        ] {
            check_range(field, value)?;
        }
        Ok(())
    }
}

fn parse_real(field: InputField, raw: &str) -> CalcResult<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| CalcError::invalid_input(field.key(), raw, "No es un número válido"))?;
    check_range(field, value)?;
    Ok(value)
}

fn parse_count(field: InputField, raw: &str) -> CalcResult<u32> {
    if raw.is_empty() {
        return Ok(0);
    }
    if raw.starts_with('-') {
        return Err(CalcError::invalid_input(field.key(), raw, "El valor no puede ser negativo"));
    }
    raw.parse()
        .map_err(|_| CalcError::invalid_input(field.key(), raw, "Debe ser un número entero"))
}

fn check_range(field: InputField, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field.key(),
            value.to_string(),
            "El valor debe ser finito",
        ));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field.key(),
            value.to_string(),
            "El valor no puede ser negativo",
        ));
    }
    Ok(())
}

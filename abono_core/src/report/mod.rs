//! # Report Formatting
//!
//! Turns inputs and results into labelled rows, and the rows into the two
//! output shapes: the printable document ([`crate::pdf::format_document`])
//! and the share text ([`share::format_share_text`]). Both shapes are built
//! from the same rows, so labels and precision never drift between them.
//!
//! Formatting is pure: the caller supplies the generation timestamp through
//! [`ReportContext`].
//!
//! ## Example
//!
//! ```rust
//! use abono_core::calculations::{compute, InputFields};
//! use abono_core::report::{result_rows, PENDING_PLACEHOLDER};
//!
//! let input = InputFields::new(1000.0, 2000, 2.0);
//! let results = compute(&input);
//! let rows = result_rows(results.results().unwrap());
//!
//! assert_eq!(rows[1].value.as_deref(), Some("4000.00 L"));
//! assert_eq!(rows[3].display(), PENDING_PLACEHOLDER);
//! ```

pub mod share;

use chrono::{Local, NaiveDateTime};

use crate::calculations::{InputFields, ResultBundle};
use crate::equations::Formula;
use crate::pdf::escape_typst;
use crate::settings::ReportSettings;
use crate::units::Unit;

pub use share::{format_share_summary, format_share_text};

/// Shown for a result whose tier has not been reached
pub const PENDING_PLACEHOLDER: &str = "—";

/// Timestamp format printed in reports ("Fecha del cálculo")
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Timestamp format used in file names
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Everything a formatter needs besides the calculation itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    /// When the report was generated (local wall-clock time)
    pub generated_at: NaiveDateTime,
    pub settings: ReportSettings,
}

impl ReportContext {
    pub fn new(generated_at: NaiveDateTime, settings: ReportSettings) -> Self {
        ReportContext {
            generated_at,
            settings,
        }
    }

    /// Context stamped with the current local time
    pub fn now(settings: ReportSettings) -> Self {
        ReportContext::new(Local::now().naive_local(), settings)
    }

    /// Generation time as printed in reports
    pub fn timestamp(&self) -> String {
        self.generated_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
    }

    /// Greenhouse label, or the configured placeholder
    pub fn greenhouse_label<'a>(&'a self, input: &'a InputFields) -> &'a str {
        input
            .greenhouse_label()
            .unwrap_or(self.settings.unnamed_greenhouse.as_str())
    }
}

/// One label/value line of a report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    /// Formatted value with unit; `None` when the tier is not reached
    pub value: Option<String>,
    /// Same value as Typst markup
    pub value_typst: Option<String>,
}

impl ReportRow {
    fn text(label: &'static str, value: &str) -> Self {
        ReportRow {
            label,
            value: Some(value.to_string()),
            value_typst: Some(escape_typst(value)),
        }
    }

    fn quantity(label: &'static str, unit: Unit, value: Option<f64>) -> Self {
        ReportRow {
            label,
            value: value.map(|v| unit.format(v)),
            value_typst: value.map(|v| unit.format_typst(v)),
        }
    }

    /// Plain value, or the pending placeholder
    pub fn display(&self) -> &str {
        self.value.as_deref().unwrap_or(PENDING_PLACEHOLDER)
    }
}

/// Rows of the input-parameters table.
pub fn input_rows(input: &InputFields, ctx: &ReportContext) -> Vec<ReportRow> {
    vec![
        ReportRow::text("Número de invernadero", ctx.greenhouse_label(input)),
        ReportRow::quantity(
            "Superficie del invernadero",
            Unit::SquareMeters,
            Some(input.surface_area_m2),
        ),
        ReportRow::quantity(
            "Goteros totales",
            Unit::Count,
            Some(f64::from(input.total_emitters)),
        ),
        ReportRow::quantity(
            "Caudal de cada gotero",
            Unit::LitersPerHourPerEmitter,
            Some(input.emitter_flow_lph),
        ),
        ReportRow::quantity(
            "CE del abono",
            Unit::Conductivity,
            Some(input.fertilizer_conductivity),
        ),
        ReportRow::quantity(
            "Tiempo de riego",
            Unit::Minutes,
            Some(input.irrigation_minutes),
        ),
    ]
}

/// Rows of the results table, in evaluation order. The last row is the
/// final result (fertilizer used).
pub fn result_rows(results: &ResultBundle) -> Vec<ReportRow> {
    let values = [
        (Formula::EmittersPerSquareMeter, Unit::Density, Some(results.emitters_per_m2)),
        (Formula::LitersPerHour, Unit::Liters, Some(results.liters_per_hour)),
        (Formula::FlowPer1000m2PerHour, Unit::Liters, Some(results.flow_per_1000m2_per_hour)),
        (Formula::WaterUsed, Unit::Liters, results.water_used_liters),
        (Formula::FertilizerUsed, Unit::Kilograms, results.fertilizer_used_kg),
    ];

    values
        .into_iter()
        .map(|(formula, unit, value)| ReportRow::quantity(formula.metadata().name, unit, value))
        .collect()
}

/// File name for an exported document:
/// `calculo_abono_<id>_<YYYYmmdd_HHMM>.pdf`, or without the id segment
/// when the greenhouse has no id.
pub fn report_filename(greenhouse_id: Option<&str>, at: NaiveDateTime) -> String {
    let stamp = at.format(FILENAME_TIMESTAMP_FORMAT);
    match greenhouse_id.map(sanitize_filename_part).filter(|id| !id.is_empty()) {
        Some(id) => format!("calculo_abono_{}_{}.pdf", id, stamp),
        None => format!("calculo_abono_{}.pdf", stamp),
    }
}

/// Keep `[A-Za-z0-9_-]`, map everything else to `_`
fn sanitize_filename_part(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::compute;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn scenario_c() -> InputFields {
        InputFields::new(1000.0, 2000, 2.0)
            .with_irrigation_minutes(30.0)
            .with_fertilizer_conductivity(1.5)
    }

    #[test]
    fn test_timestamp_format() {
        let ctx = ReportContext::new(at(), ReportSettings::default());
        assert_eq!(ctx.timestamp(), "07/03/2024 09:05");
    }

    #[test]
    fn test_input_rows() {
        let ctx = ReportContext::new(at(), ReportSettings::default());
        let rows = input_rows(&scenario_c(), &ctx);
        let shown: Vec<_> = rows.iter().map(|r| (r.label, r.display())).collect();
        assert_eq!(
            shown,
            vec![
                ("Número de invernadero", "No especificado"),
                ("Superficie del invernadero", "1000.00 m²"),
                ("Goteros totales", "2000"),
                ("Caudal de cada gotero", "2.00 L×H⁻¹"),
                ("CE del abono", "1.50"),
                ("Tiempo de riego", "30.0 minutos"),
            ]
        );
        assert_eq!(rows[1].value_typst.as_deref(), Some("1000.00 m#super[2]"));
    }

    #[test]
    fn test_greenhouse_row_is_escaped_for_typst() {
        let ctx = ReportContext::new(at(), ReportSettings::default());
        let rows = input_rows(&scenario_c().with_greenhouse_id("#7 [norte]"), &ctx);
        assert_eq!(rows[0].display(), "#7 [norte]");
        assert_eq!(rows[0].value_typst.as_deref(), Some("\\#7 \\[norte\\]"));
    }

    #[test]
    fn test_result_rows_final() {
        let outcome = compute(&scenario_c());
        let rows = result_rows(outcome.results().unwrap());
        let shown: Vec<_> = rows.iter().map(|r| r.display()).collect();
        assert_eq!(shown, vec!["2.0000", "4000.00 L", "4000.00 L", "2000.00 L", "1.80 Kg"]);
        assert_eq!(rows[4].label, "Abono gastado en el riego");
    }

    #[test]
    fn test_result_rows_partial_use_placeholder() {
        let outcome = compute(&InputFields::new(1000.0, 2000, 2.0).with_irrigation_minutes(30.0));
        let rows = result_rows(outcome.results().unwrap());
        assert_eq!(rows[3].display(), "2000.00 L");
        assert_eq!(rows[4].value, None);
        assert_eq!(rows[4].display(), PENDING_PLACEHOLDER);
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename(Some("12"), at()), "calculo_abono_12_20240307_0905.pdf");
        assert_eq!(report_filename(None, at()), "calculo_abono_20240307_0905.pdf");
        assert_eq!(report_filename(Some("   "), at()), "calculo_abono_20240307_0905.pdf");
        assert_eq!(
            report_filename(Some("Nave 3/B"), at()),
            "calculo_abono_Nave_3_B_20240307_0905.pdf"
        );
    }

    #[test]
    fn test_custom_unnamed_label() {
        let settings = ReportSettings {
            unnamed_greenhouse: "Sin número".to_string(),
            ..ReportSettings::default()
        };
        let ctx = ReportContext::new(at(), settings);
        assert_eq!(ctx.greenhouse_label(&InputFields::default()), "Sin número");
        assert_eq!(
            ctx.greenhouse_label(&InputFields::default().with_greenhouse_id("A1")),
            "A1"
        );
    }
}

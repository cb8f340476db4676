//! # Share Text
//!
//! Plain-text renderings for messaging and e-mail. Output uses `\n` line
//! breaks and is not URL-encoded; embedding it in a link is up to the
//! caller.

use std::fmt::Write;

use crate::calculations::{InputFields, ResultBundle};
use crate::errors::CalcResult;
use crate::report::{input_rows, result_rows, ReportContext, ReportRow};
use crate::units::Unit;

/// Full summary: every input and result, grouped in three sections.
///
/// Fails with [`CalcError::IncompleteResults`](crate::errors::CalcError)
/// unless every tier has been reached.
///
/// ```rust
/// use abono_core::calculations::{compute, InputFields};
/// use abono_core::report::{format_share_text, ReportContext};
/// use abono_core::settings::ReportSettings;
///
/// let input = InputFields::new(1000.0, 2000, 2.0)
///     .with_irrigation_minutes(30.0)
///     .with_fertilizer_conductivity(1.5);
/// let outcome = compute(&input);
/// let ctx = ReportContext::now(ReportSettings::default());
///
/// let text = format_share_text(&input, outcome.results().unwrap(), &ctx).unwrap();
/// assert!(text.contains("• Abono gastado en el riego: 1.80 Kg"));
/// ```
pub fn format_share_text(
    input: &InputFields,
    results: &ResultBundle,
    ctx: &ReportContext,
) -> CalcResult<String> {
    results.finalize()?;

    let inputs = input_rows(input, ctx);
    let outputs = result_rows(results);
    let (derived, final_rows) = outputs.split_at(outputs.len().saturating_sub(1));

    let mut text = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(text, "🌱 {}", ctx.settings.title.to_uppercase());
    let _ = writeln!(text, "Fecha del cálculo: {}", ctx.timestamp());
    text.push('\n');

    text.push_str("📊 DATOS DE ENTRADA:\n");
    push_bullets(&mut text, &inputs);
    text.push('\n');

    text.push_str("📈 RESULTADOS CALCULADOS:\n");
    push_bullets(&mut text, derived);
    text.push('\n');

    text.push_str("🎯 RESULTADO FINAL:\n");
    push_bullets(&mut text, final_rows);

    push_credit(&mut text, ctx);
    Ok(text)
}

/// Short message for messaging links: greenhouse, fertilizer and water.
///
/// Same contract as [`format_share_text`].
pub fn format_share_summary(
    input: &InputFields,
    results: &ResultBundle,
    ctx: &ReportContext,
) -> CalcResult<String> {
    let results = results.finalize()?;

    let mut text = String::from("🌱 Resultados de mi cálculo de abono para invernaderos:\n\n");
    let _ = writeln!(text, "📊 Invernadero: {}", ctx.greenhouse_label(input));
    let _ = writeln!(text, "🎯 Abono gastado: {}", Unit::Kilograms.format(results.fertilizer_used_kg));
    let _ = writeln!(text, "💧 Agua gastada: {}", Unit::Liters.format(results.water_used_liters));

    push_credit(&mut text, ctx);
    Ok(text)
}

fn push_bullets(text: &mut String, rows: &[ReportRow]) {
    for row in rows {
        let _ = writeln!(text, "• {}: {}", row.label, row.display());
    }
}

fn push_credit(text: &mut String, ctx: &ReportContext) {
    match ctx.settings.app_url.as_deref() {
        Some(url) if !url.is_empty() => {
            let _ = write!(text, "\nCalculado con: {}", url);
        }
        _ => {
            // Drop the trailing newline of the last bullet
            if text.ends_with('\n') {
                text.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{compute, IncompleteReason};
    use crate::errors::CalcError;
    use crate::settings::ReportSettings;
    use chrono::NaiveDate;

    fn ctx(settings: ReportSettings) -> ReportContext {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        ReportContext::new(at, settings)
    }

    fn scenario_c() -> InputFields {
        InputFields::new(1000.0, 2000, 2.0)
            .with_irrigation_minutes(30.0)
            .with_fertilizer_conductivity(1.5)
    }

    #[test]
    fn test_scenario_c_share_text() {
        let input = scenario_c().with_greenhouse_id("7");
        let outcome = compute(&input);
        let text =
            format_share_text(&input, outcome.results().unwrap(), &ctx(ReportSettings::default()))
                .unwrap();

        let expected = "\
🌱 CALCULADORA DE ABONO PARA INVERNADEROS
Fecha del cálculo: 07/03/2024 18:30

📊 DATOS DE ENTRADA:
• Número de invernadero: 7
• Superficie del invernadero: 1000.00 m²
• Goteros totales: 2000
• Caudal de cada gotero: 2.00 L×H⁻¹
• CE del abono: 1.50
• Tiempo de riego: 30.0 minutos

📈 RESULTADOS CALCULADOS:
• Goteros por metro cuadrado: 2.0000
• Litros de agua por hora: 4000.00 L
• Caudal cada 1000 m² por hora: 4000.00 L
• Cantidad de agua gastada en este riego: 2000.00 L

🎯 RESULTADO FINAL:
• Abono gastado en el riego: 1.80 Kg

Calculado con: https://calculadora-abono-invernaderos.replit.app";
        assert_eq!(text, expected);
        assert!(text.contains("2000.00"));
        assert!(text.contains("1.80"));
    }

    #[test]
    fn test_share_text_without_credit() {
        let settings = ReportSettings {
            app_url: None,
            ..ReportSettings::default()
        };
        let input = scenario_c();
        let outcome = compute(&input);
        let text = format_share_text(&input, outcome.results().unwrap(), &ctx(settings)).unwrap();
        assert!(text.ends_with("• Abono gastado en el riego: 1.80 Kg"));
        assert!(text.contains("• Número de invernadero: No especificado"));
    }

    #[test]
    fn test_share_text_rejects_partial_results() {
        let input = InputFields::new(1000.0, 2000, 2.0);
        let outcome = compute(&input);
        let err = format_share_text(&input, outcome.results().unwrap(), &ctx(ReportSettings::default()))
            .unwrap_err();
        assert_eq!(err, CalcError::incomplete_results(IncompleteReason::IrrigationTime));
    }

    #[test]
    fn test_share_summary() {
        let input = scenario_c().with_greenhouse_id("Nave 2");
        let outcome = compute(&input);
        let text =
            format_share_summary(&input, outcome.results().unwrap(), &ctx(ReportSettings::default()))
                .unwrap();
        assert_eq!(
            text,
            "🌱 Resultados de mi cálculo de abono para invernaderos:\n\n\
             📊 Invernadero: Nave 2\n\
             🎯 Abono gastado: 1.80 Kg\n\
             💧 Agua gastada: 2000.00 L\n\n\
             Calculado con: https://calculadora-abono-invernaderos.replit.app"
        );
    }
}

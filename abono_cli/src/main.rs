//! # Abono CLI Application
//!
//! Terminal shell for the greenhouse fertilizer calculator.
//!
//! Without flags it asks for the six fields, recomputing after every change,
//! and offers PDF export and sharing once all results are available. With
//! `--input` it runs once over a JSON file (see `--help`).

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use abono_core::calculations::ALL_FIELDS;
use abono_core::equations::ALL_FORMULAS;
use abono_core::report::{input_rows, result_rows};
use abono_core::{
    compute, format_document, format_share_summary, format_share_text, load_input,
    load_settings, report_filename, save_document, save_input, CalcError, CalcResult,
    CalculationOutcome, IncompleteReason, InputFields, ReportContext, ReportSettings,
    ResultBundle,
};

mod args;
mod share;

use args::{Args, PdfTarget};

const EXIT_ERROR: u8 = 1;
const EXIT_NOT_FINAL: u8 = 2;

/// Suggested file name for `[g] Guardar datos`
const DEFAULT_INPUT_FILE: &str = "datos_abono.json";

fn main() -> ExitCode {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!();
            eprintln!("{}", args::USAGE);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if args.help {
        println!("{}", args::USAGE);
        return ExitCode::SUCCESS;
    }

    let settings = match &args.settings {
        Some(path) => match load_settings(path) {
            Ok(settings) => settings,
            Err(e) => return report_error(&e),
        },
        None => ReportSettings::default(),
    };

    match &args.input {
        Some(path) => run_batch(&args, path, settings),
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            match run_interactive(&mut stdin.lock(), &mut stdout.lock(), settings) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error de E/S: {}", e);
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}

/// Print an error and its JSON form to stderr.
fn report_error(e: &CalcError) -> ExitCode {
    eprintln!("Error: {}", e);
    if let CalcError::IncompleteResults { missing } = e {
        eprintln!("💡 {}", missing.hint());
    }
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::from(exit_code(e))
}

/// Export on a non-final result gets its own exit code
fn exit_code(e: &CalcError) -> u8 {
    if e.is_contract_violation() {
        EXIT_NOT_FINAL
    } else {
        EXIT_ERROR
    }
}

// ============================================================================
// Batch mode
// ============================================================================

fn run_batch(args: &Args, path: &Path, settings: ReportSettings) -> ExitCode {
    let input = match load_input(path) {
        Ok(input) => input,
        Err(e) => return report_error(&e),
    };
    let outcome = compute(&input);
    let ctx = ReportContext::now(settings);

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => return report_error(&CalcError::from(e)),
        }
    } else {
        print!("{}", outcome_text(&input, &outcome, &ctx));
    }

    if args.pdf.is_none() && !args.share {
        return ExitCode::SUCCESS;
    }

    let results = match export_bundle(&outcome) {
        Ok(results) => results,
        Err(e) => return report_error(&e),
    };

    if let Some(target) = &args.pdf {
        let path = match target {
            PdfTarget::Default => None,
            PdfTarget::Path(p) => Some(p.clone()),
        };
        match save_pdf(&input, results, &ctx, path) {
            // Keep stdout clean for JSON consumers
            Ok(saved) if args.json => eprintln!("PDF guardado en {}", saved.display()),
            Ok(saved) => println!("PDF guardado en {}", saved.display()),
            Err(e) => return report_error(&e),
        }
    }

    if args.share {
        match share_text(&input, results, &ctx) {
            Ok(text) => print!("{}", text),
            Err(e) => return report_error(&e),
        }
    }

    ExitCode::SUCCESS
}

/// The bundle to export, or the tier that blocks exporting it
fn export_bundle(outcome: &CalculationOutcome) -> CalcResult<&ResultBundle> {
    match outcome.pending() {
        Some(missing) => Err(CalcError::incomplete_results(missing)),
        None => outcome
            .results()
            .ok_or_else(|| CalcError::incomplete_results(IncompleteReason::BaseFields)),
    }
}

// ============================================================================
// Interactive mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    SavePdf,
    Share,
    SaveInput,
    Edit,
    Restart,
    Quit,
}

fn run_interactive<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    settings: ReportSettings,
) -> io::Result<()> {
    writeln!(out, "🌱 {}", settings.title)?;
    writeln!(out, "Deja un campo en blanco para conservar su valor.")?;

    let mut input = InputFields::default();

    'session: loop {
        writeln!(out)?;
        if !edit_fields(reader, out, &mut input)? {
            return Ok(());
        }

        let outcome = compute(&input);
        let ctx = ReportContext::now(settings.clone());
        write!(out, "\n{}", outcome_text(&input, &outcome, &ctx))?;

        let final_results = outcome.results().filter(|r| r.is_final());

        loop {
            let Some(action) = read_action(reader, out, final_results.is_some())? else {
                return Ok(());
            };

            match (action, final_results) {
                (Action::Quit, _) => return Ok(()),
                (Action::SaveInput, _) => {
                    write!(out, "Archivo [{}]: ", DEFAULT_INPUT_FILE)?;
                    out.flush()?;
                    let Some(line) = read_line(reader)? else {
                        return Ok(());
                    };
                    let path = if line.is_empty() { DEFAULT_INPUT_FILE } else { line.as_str() };
                    match save_input(&input, Path::new(path)) {
                        Ok(()) => {
                            writeln!(out, "Datos guardados en {} (usa --input para cargarlos)", path)?
                        }
                        Err(e) => writeln!(out, "Error guardando datos: {}", e)?,
                    }
                }
                (Action::Edit, _) => continue 'session,
                (Action::Restart, _) => {
                    input = InputFields::default();
                    writeln!(out, "Todos los campos se han borrado.")?;
                    continue 'session;
                }
                (Action::SavePdf, Some(results)) => match save_pdf(&input, results, &ctx, None) {
                    Ok(saved) => writeln!(out, "PDF guardado en {}", saved.display())?,
                    Err(e) => writeln!(out, "Error generando PDF: {}", e)?,
                },
                (Action::Share, Some(results)) => match share_text(&input, results, &ctx) {
                    Ok(text) => write!(out, "\n{}", text)?,
                    Err(e) => writeln!(out, "Error al compartir: {}", e)?,
                },
                // Not offered until results are final
                (Action::SavePdf | Action::Share, None) => {}
            }
        }
    }
}

/// Prompt for every field. Returns `false` on end of input.
fn edit_fields<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    input: &mut InputFields,
) -> io::Result<bool> {
    for field in ALL_FIELDS {
        loop {
            write!(out, "{} [{}]: ", field.prompt(), field.display_value(input))?;
            out.flush()?;

            let Some(line) = read_line(reader)? else {
                return Ok(false);
            };
            if line.is_empty() {
                break;
            }

            match input.set_field(field, &line) {
                Ok(()) => {
                    writeln!(out, "  → {}", live_status(&compute(input)))?;
                    break;
                }
                Err(e) => writeln!(out, "  ✗ {}", e)?,
            }
        }
    }
    Ok(true)
}

fn read_action<R: BufRead, W: Write>(
    reader: &mut R,
    out: &mut W,
    is_final: bool,
) -> io::Result<Option<Action>> {
    loop {
        writeln!(out)?;
        if is_final {
            write!(out, "[p] Guardar PDF  [c] Compartir  ")?;
        }
        write!(out, "[g] Guardar datos  [e] Editar  [r] Reiniciar  [s] Salir: ")?;
        out.flush()?;

        let Some(line) = read_line(reader)? else {
            return Ok(None);
        };

        let action = match line.to_lowercase().as_str() {
            "p" if is_final => Action::SavePdf,
            "c" if is_final => Action::Share,
            "g" => Action::SaveInput,
            "e" => Action::Edit,
            "r" => Action::Restart,
            "s" | "q" => Action::Quit,
            _ => {
                writeln!(out, "Opción no válida")?;
                continue;
            }
        };
        return Ok(Some(action));
    }
}

/// Next trimmed line, or `None` at end of input
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ============================================================================
// Output
// ============================================================================

/// One-line status shown after each field change
fn live_status(outcome: &CalculationOutcome) -> String {
    let finished = outcome.results().and_then(|r| r.finalize().ok());
    match (finished, outcome.hint()) {
        (Some(results), _) => format!(
            "Abono gastado: {:.2} Kg, agua gastada: {:.2} L",
            results.fertilizer_used_kg, results.water_used_liters
        ),
        (None, Some(hint)) => hint.to_string(),
        (None, None) => String::new(),
    }
}

/// Inputs, results with their formulas, and the hint for the next tier.
fn outcome_text(input: &InputFields, outcome: &CalculationOutcome, ctx: &ReportContext) -> String {
    let mut text = String::from("📊 DATOS DE ENTRADA\n");
    for row in input_rows(input, ctx) {
        let _ = writeln!(text, "  {}: {}", row.label, row.display());
    }

    if let Some(results) = outcome.results() {
        text.push_str("\n📈 RESULTADOS\n");
        for (row, formula) in result_rows(results).iter().zip(ALL_FORMULAS.iter()) {
            let _ = writeln!(text, "  {}: {}", row.label, row.display());
            let _ = writeln!(text, "      = {}", formula.caption());
        }
    }

    if let Some(missing) = outcome.pending() {
        let _ = writeln!(text, "\n💡 Nivel {}/3: {}", missing.tier(), missing.hint());
    }
    text
}

/// Render and save the PDF; returns where it was written.
fn save_pdf(
    input: &InputFields,
    results: &ResultBundle,
    ctx: &ReportContext,
    path: Option<PathBuf>,
) -> CalcResult<PathBuf> {
    let bytes = format_document(input, results, ctx)?;
    let path = path.unwrap_or_else(|| {
        PathBuf::from(report_filename(input.greenhouse_label(), ctx.generated_at))
    });
    save_document(&bytes, &path)?;
    Ok(path)
}

/// Full share text followed by the three links built from the summary.
fn share_text(input: &InputFields, results: &ResultBundle, ctx: &ReportContext) -> CalcResult<String> {
    let mut text = format_share_text(input, results, ctx)?;
    let summary = format_share_summary(input, results, ctx)?;

    text.push_str("\n\n📤 Compartir:\n");
    for (label, link) in share::share_links(&summary) {
        let _ = writeln!(text, "  {}: {}", label, link);
    }
    Ok(text)
}

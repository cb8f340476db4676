//! # PDF Generation Module
//!
//! Generates the printable fertilizer report using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via string replacement before compilation
//! - Fonts come from `typst-assets` and are loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`); nothing is written to disk
//!
//! ## Example
//!
//! ```rust,no_run
//! use abono_core::calculations::{compute, InputFields};
//! use abono_core::pdf::format_document;
//! use abono_core::report::ReportContext;
//! use abono_core::settings::ReportSettings;
//!
//! let input = InputFields::new(1000.0, 2000, 2.0)
//!     .with_irrigation_minutes(30.0)
//!     .with_fertilizer_conductivity(1.5);
//! let outcome = compute(&input);
//! let ctx = ReportContext::now(ReportSettings::default());
//!
//! let pdf_bytes = format_document(&input, outcome.results().unwrap(), &ctx).unwrap();
//! std::fs::write("calculo_abono.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Datelike;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::{InputFields, ResultBundle};
use crate::equations::ALL_FORMULAS;
use crate::errors::{CalcError, CalcResult};
use crate::report::{input_rows, result_rows, ReportContext, ReportRow};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling a single in-memory document.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
    /// Date reported to `datetime.today()`
    today: Option<Datetime>,
}

impl PdfWorld {
    fn new(source: String, ctx: &ReportContext) -> Self {
        let date = ctx.generated_at.date();
        let today = Datetime::from_ymd(date.year(), date.month() as u8, date.day() as u8);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
            today,
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        self.today
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the fertilizer report
const REPORT_TEMPLATE: &str = r##"
#set document(title: "{{TITLE_STRING}}")

#set page(
  paper: "{{PAPER}}",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{TITLE}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Invernadero: {{GREENHOUSE}}]],
      align(center)[#text(size: 9pt)[Página #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt, lang: "es")

#align(center)[
  #text(size: 16pt, weight: "bold")[{{TITLE}}]
]

#v(20pt)

*Fecha del cálculo:* {{TIMESTAMP}}

#v(20pt)

== Datos de Entrada:

#table(
  columns: (3in, 2in),
  inset: 8pt,
  stroke: 1pt + black,
  align: left,
  fill: (x, y) => if y == 0 { gray } else { rgb("#f5f5dc") },
  table.header(
    text(fill: white, weight: "bold", size: 12pt)[Parámetro],
    text(fill: white, weight: "bold", size: 12pt)[Valor],
  ),
{{INPUT_ROWS}}
)

#v(20pt)

== Resultados:

#table(
  columns: (3in, 2in),
  inset: 8pt,
  stroke: 1pt + black,
  align: left,
  fill: (x, y) => if y == 0 { rgb("#006400") } else { rgb("#90ee90") },
  table.header(
    text(fill: white, weight: "bold", size: 12pt)[Resultado],
    text(fill: white, weight: "bold", size: 12pt)[Valor],
  ),
{{RESULT_ROWS}}
)

#v(20pt)

=== Fórmulas

#set text(size: 9pt)
{{FORMULAS}}
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render the final report to PDF.
///
/// # Arguments
///
/// * `input` - The fields the results were computed from
/// * `results` - A bundle with every tier reached
/// * `ctx` - Generation timestamp and report settings
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::IncompleteResults)` - `results` is missing a tier
/// * `Err(CalcError::RenderFailed)` - Typst compilation or PDF export failed
pub fn format_document(
    input: &InputFields,
    results: &ResultBundle,
    ctx: &ReportContext,
) -> CalcResult<Vec<u8>> {
    let source = document_source(input, results, ctx)?;

    let world = PdfWorld::new(source, ctx);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("typst compilation", error_msgs.join("; "))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed("pdf export", error_msgs.join("; "))
    })
}

/// Build the Typst source for the report without compiling it.
pub fn document_source(
    input: &InputFields,
    results: &ResultBundle,
    ctx: &ReportContext,
) -> CalcResult<String> {
    results.finalize()?;

    let title = &ctx.settings.title;
    let values = [
        ("TITLE_STRING", escape_typst_string(title)),
        ("TITLE", escape_typst(title)),
        ("PAPER", ctx.settings.paper.typst_name().to_string()),
        ("GREENHOUSE", escape_typst(ctx.greenhouse_label(input))),
        ("DATE", ctx.generated_at.format("%d/%m/%Y").to_string()),
        ("TIMESTAMP", ctx.timestamp()),
        ("INPUT_ROWS", table_rows(&input_rows(input, ctx), false)),
        ("RESULT_ROWS", table_rows(&result_rows(results), true)),
        ("FORMULAS", formula_list()),
    ];

    Ok(fill_template(REPORT_TEMPLATE, &values))
}

/// Substitute `{{KEY}}` placeholders in a single left-to-right pass.
///
/// Inserted values are never scanned again, so user text that looks like a
/// placeholder is printed as-is. Unknown keys are left untouched.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Two-column table cells, one row per line
fn table_rows(rows: &[ReportRow], bold_last: bool) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let label = escape_typst(row.label);
            let value = row.value_typst.as_deref().unwrap_or_default();
            if bold_last && i + 1 == rows.len() {
                format!("  [*{}*], [*{}*],", label, value)
            } else {
                format!("  [{}], [{}],", label, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bullet list of result names with their formulas and captions
fn formula_list() -> String {
    ALL_FORMULAS
        .iter()
        .map(|formula| {
            let meta = formula.metadata();
            format!(
                "- *{}*: {} #text(fill: gray)[({})]",
                escape_typst(meta.name),
                escape_typst(meta.formula_plain),
                escape_typst(meta.caption)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Typst markup characters in user-provided text
pub(crate) fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '=' | '-'
            | '+' | '/' | '~' => format!("\\{}", c),
            _ => c.to_string(),
        })
        .collect()
}

/// Escape text for use inside a Typst string literal
fn escape_typst_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

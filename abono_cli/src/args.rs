//! Command-line flags.

use std::path::PathBuf;

pub const USAGE: &str = "\
Uso: abono_cli [opciones]

Sin opciones se piden los datos de forma interactiva.

Opciones:
  --input <archivo.json>     Carga los datos de entrada desde JSON
  --settings <archivo.json>  Carga la configuración del informe
  --pdf [ruta]               Guarda el informe PDF (nombre automático si se omite la ruta)
  --share                    Muestra el texto para compartir y los enlaces
  --json                     Muestra el resultado como JSON
  -h, --help                 Muestra esta ayuda";

/// Where `--pdf` should write
#[derive(Debug, Clone, PartialEq)]
pub enum PdfTarget {
    /// Name built from the greenhouse id and timestamp
    Default,
    Path(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub input: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub pdf: Option<PdfTarget>,
    pub share: bool,
    pub json: bool,
    pub help: bool,
}

impl Args {
    /// Any flag that produces output without prompting
    pub fn wants_output(&self) -> bool {
        self.pdf.is_some() || self.share || self.json
    }
}

/// Parse arguments (without the program name).
pub fn parse<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut iter = args.into_iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--input" => parsed.input = Some(required_path(&arg, iter.next())?),
            "--settings" => parsed.settings = Some(required_path(&arg, iter.next())?),
            "--pdf" => {
                let target = match iter.peek() {
                    Some(next) if !next.starts_with('-') => {
                        PdfTarget::Path(PathBuf::from(iter.next().unwrap_or_default()))
                    }
                    _ => PdfTarget::Default,
                };
                parsed.pdf = Some(target);
            }
            "--share" => parsed.share = true,
            "--json" => parsed.json = true,
            "-h" | "--help" => parsed.help = true,
            other => return Err(format!("Opción desconocida: {}", other)),
        }
    }

    if parsed.wants_output() && parsed.input.is_none() {
        return Err("--pdf, --share y --json requieren --input".to_string());
    }

    Ok(parsed)
}

fn required_path(flag: &str, value: Option<String>) -> Result<PathBuf, String> {
    match value {
        Some(v) if !v.starts_with('-') => Ok(PathBuf::from(v)),
        _ => Err(format!("{} necesita una ruta de archivo", flag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_is_interactive() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed, Args::default());
        assert!(!parsed.wants_output());
    }

    #[test]
    fn test_pdf_with_and_without_path() {
        let parsed = args(&["--input", "a.json", "--pdf"]).unwrap();
        assert_eq!(parsed.pdf, Some(PdfTarget::Default));

        let parsed = args(&["--pdf", "out.pdf", "--input", "a.json", "--share"]).unwrap();
        assert_eq!(parsed.pdf, Some(PdfTarget::Path(PathBuf::from("out.pdf"))));
        assert!(parsed.share);
        assert_eq!(parsed.input, Some(PathBuf::from("a.json")));
    }

    #[test]
    fn test_output_flags_need_input() {
        assert!(args(&["--json"]).is_err());
        assert!(args(&["--settings", "s.json"]).is_ok());
    }

    #[test]
    fn test_missing_path() {
        assert!(args(&["--input"]).is_err());
        assert!(args(&["--input", "--json"]).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(args(&["--xml"]).unwrap_err(), "Opción desconocida: --xml");
    }
}

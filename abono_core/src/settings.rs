//! # Report Settings
//!
//! Configuration for printed and shared output. Settings serialize to JSON;
//! every key is optional and falls back to [`ReportSettings::default`].
//!
//! ```rust
//! use abono_core::settings::{PaperSize, ReportSettings};
//!
//! let settings: ReportSettings = serde_json::from_str(r#"{ "paper": "a4" }"#).unwrap();
//! assert_eq!(settings.paper, PaperSize::A4);
//! assert_eq!(settings.unnamed_greenhouse, "No especificado");
//! ```

use serde::{Deserialize, Serialize};

/// Credit link printed at the end of shared text
pub const DEFAULT_APP_URL: &str = "https://calculadora-abono-invernaderos.replit.app";

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Heading of the document and the share text
    pub title: String,

    /// Page size of the PDF
    pub paper: PaperSize,

    /// Credit link; `None` omits the "Calculado con" line
    pub app_url: Option<String>,

    /// Shown in place of a missing greenhouse id
    pub unnamed_greenhouse: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            title: "Calculadora de Abono para Invernaderos".to_string(),
            paper: PaperSize::default(),
            app_url: Some(DEFAULT_APP_URL.to_string()),
            unnamed_greenhouse: "No especificado".to_string(),
        }
    }
}

/// Supported PDF page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperSize {
    #[default]
    UsLetter,
    A4,
}

impl PaperSize {
    /// Typst paper name
    pub fn typst_name(&self) -> &'static str {
        match self {
            PaperSize::UsLetter => "us-letter",
            PaperSize::A4 => "a4",
        }
    }
}

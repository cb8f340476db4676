//! # File I/O Module
//!
//! Helpers for shells that read and write files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent a half-written PDF
//! - **JSON loading**: Inputs and report settings, with the same error type as
//!   the rest of the crate
//!
//! Nothing in [`crate::calculations`] or [`crate::report`] calls into this
//! module.
//!
//! ## Example
//!
//! ```rust,no_run
//! use abono_core::calculations::compute;
//! use abono_core::file_io::{load_input, save_document};
//! use abono_core::pdf::format_document;
//! use abono_core::report::ReportContext;
//! use abono_core::settings::ReportSettings;
//! use std::path::Path;
//!
//! let input = load_input(Path::new("invernadero.json"))?;
//! let outcome = compute(&input);
//! let ctx = ReportContext::now(ReportSettings::default());
//!
//! if let Some(results) = outcome.results() {
//!     let bytes = format_document(&input, results, &ctx)?;
//!     save_document(&bytes, Path::new("calculo_abono.pdf"))?;
//! }
//! # Ok::<(), abono_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calculations::InputFields;
use crate::errors::{CalcError, CalcResult};
use crate::settings::ReportSettings;

/// Save bytes to a file with atomic write semantics.
///
/// The save process:
/// 1. Write to a temporary file next to the target (`<name>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
///
/// An existing file at `path` is only replaced once the new content is
/// fully on disk.
pub fn save_document(bytes: &[u8], path: &Path) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .write_all(bytes)
        .map_err(|e| {
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })
        .and_then(|_| {
            tmp_file.sync_all().map_err(|e| {
                CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
            })
        });

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load input fields from a JSON file and validate them.
///
/// Missing keys default to zero / empty, exactly like blank fields.
pub fn load_input(path: &Path) -> CalcResult<InputFields> {
    let input: InputFields = load_json(path)?;
    input.validate()?;
    Ok(input)
}

/// Load report settings from a JSON file. Missing keys keep their defaults.
pub fn load_settings(path: &Path) -> CalcResult<ReportSettings> {
    load_json(path)
}

/// Write input fields as pretty JSON (atomic).
pub fn save_input(input: &InputFields, path: &Path) -> CalcResult<()> {
    save_document(to_json(input)?.as_bytes(), path)
}

fn to_json<T: Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    Ok(serde_json::from_str(&contents)?)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

//! Purpose: `taro doctor`, a project hygiene and manifest check.
//! Exports: `run`, `DiagnosticSection`, `DiagnosticLine`, `DoctorPlugin`, `describe`.
//! Role: In-process kernel plugin; the only command the CLI can serve without an external kernel.
//! Invariants: A missing package.json is an error; hygiene findings never are.
//! Invariants: Exit code is 1 when any line is invalid, else 0.

mod descriptions;
mod package;
mod recommend;

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use crate::core::envelope::{Envelope, OptionValue};
use crate::core::error::{Error, ErrorKind};
use crate::kernel::{Plugin, RunOutcome};

pub use descriptions::{VALIDATION_DESCRIPTIONS, describe};
pub use package::validate_manifest;
pub use recommend::check as check_recommended;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticLine {
    pub desc: String,
    /// `true` for advisory findings, `false` for real problems.
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticSection {
    pub desc: String,
    pub lines: Vec<DiagnosticLine>,
}

impl DiagnosticSection {
    pub fn has_errors(&self) -> bool {
        self.lines.iter().any(|line| !line.valid)
    }
}

pub fn run(app_path: &Path) -> Result<Vec<DiagnosticSection>, Error> {
    let package_path = app_path.join("package.json");
    let raw = fs::read_to_string(&package_path).map_err(|err| {
        let kind = if err.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("cannot read package.json")
            .with_path(&package_path)
            .with_hint("Run `taro doctor` from the root of a Taro project.")
            .with_source(err)
    })?;
    let manifest: Value = serde_json::from_str(&raw).map_err(|err| {
        Error::new(ErrorKind::Invalid)
            .with_message("package.json is not valid JSON")
            .with_path(&package_path)
            .with_source(err)
    })?;

    let dev_dependencies: Vec<String> = manifest
        .get("devDependencies")
        .and_then(Value::as_object)
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default();
    let folder_files = list_folder(app_path)?;
    tracing::debug!(
        dev_dependencies = dev_dependencies.len(),
        files = folder_files.len(),
        "doctor inputs loaded"
    );

    Ok(vec![
        validate_manifest(&manifest),
        check_recommended(&dev_dependencies, &folder_files),
    ])
}

fn list_folder(app_path: &Path) -> Result<Vec<String>, Error> {
    let entries = fs::read_dir(app_path).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to list project directory")
            .with_path(app_path)
            .with_source(err)
    })?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read project directory entry")
                .with_path(app_path)
                .with_source(err)
        })?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

pub fn render_human(sections: &[DiagnosticSection]) -> String {
    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!("{}:", section.desc));
        if section.lines.is_empty() {
            lines.push("  ok".to_string());
            continue;
        }
        for line in &section.lines {
            let label = if line.valid { "warning" } else { "error" };
            lines.push(format!("  {label}: {}", line.desc));
            if let Some(solution) = &line.solution {
                lines.push(format!("    solution: {solution}"));
            }
        }
    }
    lines.join("\n")
}

pub fn report_json(sections: &[DiagnosticSection]) -> Value {
    let errors = sections
        .iter()
        .flat_map(|section| &section.lines)
        .filter(|line| !line.valid)
        .count();
    json!({ "sections": sections, "errors": errors })
}

const DOCTOR_HELP: &str = "Usage: taro doctor [--json]

Check package.json field types and recommended project files.

Options:
  --json      Print the report as JSON
  -h, --help  Print this help";

pub struct DoctorPlugin;

impl Plugin for DoctorPlugin {
    fn name(&self) -> &str {
        "doctor"
    }

    fn run(
        &self,
        envelope: &Envelope,
        app_path: &Path,
        out: &mut dyn Write,
    ) -> Result<RunOutcome, Error> {
        let write_err = |err: std::io::Error| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write doctor report")
                .with_source(err)
        };

        if envelope.opts.is_help {
            writeln!(out, "{DOCTOR_HELP}").map_err(write_err)?;
            return Ok(RunOutcome::ok());
        }

        let sections = run(app_path)?;
        if wants_json(envelope) {
            let text = serde_json::to_string(&report_json(&sections)).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode doctor report")
                    .with_source(err)
            })?;
            writeln!(out, "{text}").map_err(write_err)?;
        } else {
            writeln!(out, "{}", render_human(&sections)).map_err(write_err)?;
        }

        if sections.iter().any(DiagnosticSection::has_errors) {
            Ok(RunOutcome::with_code(1))
        } else {
            Ok(RunOutcome::ok())
        }
    }
}

/// Custom-command flags are untyped, so `--json .` arrives as text.
fn wants_json(envelope: &Envelope) -> bool {
    !matches!(envelope.option("json"), None | Some(OptionValue::Bool(false)))
}

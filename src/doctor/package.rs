//! Purpose: Shape check for a project's package.json.
//! Exports: `validate_manifest`.
//! Role: First doctor section; reports fields whose JSON type is wrong.
//! Invariants: Absent optional fields are fine; only present-but-mistyped fields are reported.

use serde_json::Value;

use super::descriptions::describe;
use super::{DiagnosticLine, DiagnosticSection};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Expected {
    String,
    Object,
    Boolean,
    Array,
}

impl Expected {
    fn code(self) -> &'static str {
        match self {
            Expected::String => "string.base",
            Expected::Object => "object.base",
            Expected::Boolean => "boolean.base",
            Expected::Array => "array.base",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Expected::String => value.is_string(),
            Expected::Object => value.is_object(),
            Expected::Boolean => value.is_boolean(),
            Expected::Array => value.is_array(),
        }
    }
}

const FIELDS: &[(&str, Expected)] = &[
    ("name", Expected::String),
    ("version", Expected::String),
    ("private", Expected::Boolean),
    ("scripts", Expected::Object),
    ("dependencies", Expected::Object),
    ("devDependencies", Expected::Object),
    ("workspaces", Expected::Array),
];

pub fn validate_manifest(manifest: &Value) -> DiagnosticSection {
    let mut lines = Vec::new();

    match manifest.as_object() {
        None => lines.push(invalid_line("package.json", Expected::Object.code(), "must be an object")),
        Some(fields) => {
            for (field, expected) in FIELDS {
                let Some(value) = fields.get(*field) else {
                    continue;
                };
                if !expected.matches(value) {
                    let fallback = format!("\"{field}\" has the wrong type");
                    lines.push(invalid_line(field, expected.code(), &fallback));
                }
            }
        }
    }

    DiagnosticSection {
        desc: "Check package.json".to_string(),
        lines,
    }
}

fn invalid_line(field: &str, code: &str, fallback: &str) -> DiagnosticLine {
    DiagnosticLine {
        desc: format!("{field}: {}", describe(code, fallback)),
        valid: false,
        solution: None,
    }
}

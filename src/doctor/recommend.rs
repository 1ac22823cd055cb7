//! Purpose: Recommend common project hygiene (tests, linting, readme, ignore and editor files).
//! Exports: `check`.
//! Role: Second doctor section; every finding is a warning, never an error.
//! Invariants: Name matching is case-insensitive on both sides.

use super::{DiagnosticLine, DiagnosticSection};

const TEST_FRAMEWORKS: &[&str] = &["jest", "mocha", "ava", "tape", "jesmine", "karma"];
const LINTERS: &[&str] = &["eslint", "jslint", "tslint", "jshint"];
const README: &[&str] = &["readme", "readme.md", "readme.markdown"];
const GITIGNORE: &[&str] = &[".gitignore"];
const EDITORCONFIG: &[&str] = &[".editorconfig"];

fn intersects<S: AsRef<str>>(present: &[S], wanted: &[&str]) -> bool {
    present.iter().any(|name| {
        let name = name.as_ref().to_lowercase();
        wanted.iter().any(|candidate| candidate.to_lowercase() == name)
    })
}

fn warning(desc: &str, solution: Option<&str>) -> DiagnosticLine {
    DiagnosticLine {
        desc: desc.to_string(),
        valid: true,
        solution: solution.map(str::to_string),
    }
}

pub fn check<S: AsRef<str>, T: AsRef<str>>(
    dev_dependencies: &[S],
    folder_files: &[T],
) -> DiagnosticSection {
    let mut lines = Vec::new();

    if !intersects(dev_dependencies, TEST_FRAMEWORKS) {
        lines.push(warning(
            "No common test framework found in devDependencies (jest/mocha/ava/tape/jesmine/karma); tests help keep the project healthy",
            Some("See https://github.com/NervJS/taro-ui-sample for a project with a complete test setup"),
        ));
    }
    if !intersects(dev_dependencies, LINTERS) {
        lines.push(warning(
            "No common linter found in devDependencies (eslint/jslint/jshint/tslint); a linter helps keep the project healthy",
            Some("Taro ships custom ESLint rules that catch common mistakes; projects created with `taro init` include them"),
        ));
    }
    if !intersects(folder_files, README) {
        lines.push(warning(
            "No readme found (readme/readme.md/readme.markdown); a readme helps others understand the project",
            None,
        ));
    }
    if !intersects(folder_files, GITIGNORE) {
        lines.push(warning(
            "No .gitignore found; add one to keep secrets and build output out of the repository",
            None,
        ));
    }
    if !intersects(folder_files, EDITORCONFIG) {
        lines.push(warning(
            "No .editorconfig found; add one to keep editor settings consistent across the team",
            None,
        ));
    }

    DiagnosticSection {
        desc: "Check recommended project contents".to_string(),
        lines,
    }
}

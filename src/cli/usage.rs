//! Purpose: Static usage text and version line for the `taro` binary.
//! Exports: `USAGE_LINES`, `write_usage`, `write_version`.
//! Role: Output for the usage and version short-circuits; no kernel involved.
//! Invariants: Usage is exactly 17 lines; version is the bare package version.
//! Invariants: `completion` is a reserved command name and never reaches a kernel.

use std::io::{self, Write};

pub const USAGE_LINES: [&str; 17] = [
    "Usage: taro <command> [options]",
    "",
    "Options:",
    "  -v, --version           Print the taro version",
    "  -h, --help              Print this usage information",
    "",
    "Commands:",
    "  init [projectName]      Create a project from a template",
    "  build                   Build the project for a target platform",
    "  convert                 Convert a native mini-program project",
    "  doctor                  Check project dependency and file hygiene",
    "  completion <shell>      Generate shell completions (reserved name)",
    "  <command>               Run a command provided by a kernel plugin",
    "",
    "Run `taro <command> --help` for command options.",
    "Set TARO_KERNEL to the kernel executable that runs project commands.",
    "https://github.com/NervJS/taro",
];

pub fn write_usage(out: &mut dyn Write) -> io::Result<()> {
    for line in USAGE_LINES {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn write_version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::{write_usage, write_version};

    #[test]
    fn usage_is_seventeen_lines() {
        let mut out = Vec::new();
        write_usage(&mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.lines().count(), 17);
        assert!(text.starts_with("Usage: taro"));
        assert!(text.contains("completion <shell>      Generate shell completions (reserved name)"));
    }

    #[test]
    fn version_is_bare_package_version() {
        let mut out = Vec::new();
        write_version(&mut out).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            format!("{}\n", env!("CARGO_PKG_VERSION"))
        );
    }
}

//! Purpose: Run an external kernel program and stream the envelope to it.
//! Exports: `KernelConfig`, `ProcessKernel`.
//! Role: Bridge to the orchestration kernel that owns the build pipeline.
//! Invariants: The envelope is written to stdin as one JSON document, then stdin is closed.
//! Invariants: The child's exit code becomes the CLI's exit code.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::envelope::Envelope;
use crate::core::error::{Error, ErrorKind};

use super::{KERNEL_ENV, Kernel, RunOutcome};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelConfig {
    pub program: Option<PathBuf>,
}

impl KernelConfig {
    pub fn from_env() -> Self {
        let program = std::env::var_os(KERNEL_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { program }
    }
}

#[derive(Debug)]
pub struct ProcessKernel {
    program: PathBuf,
    app_path: PathBuf,
}

impl ProcessKernel {
    pub fn new(program: impl Into<PathBuf>, app_path: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            app_path: app_path.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Kernel for ProcessKernel {
    fn run(&mut self, envelope: Envelope) -> Result<RunOutcome, Error> {
        let payload = serde_json::to_vec(&envelope).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to encode dispatch envelope")
                .with_source(err)
        })?;

        let mut command = Command::new(&self.program);
        command
            .current_dir(&self.app_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        for (key, value) in envelope.mode.env_vars() {
            command.env(key, value);
        }

        tracing::debug!(
            program = %self.program.display(),
            command = %envelope.name,
            "spawning kernel"
        );
        let mut child = command.spawn().map_err(|err| spawn_error(&self.program, err))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A kernel that exits without reading its input is not an error here;
            // its exit status decides the outcome.
            if let Err(err) = stdin.write_all(&payload) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    return Err(Error::new(ErrorKind::Io)
                        .with_message("failed to send envelope to kernel")
                        .with_path(&self.program)
                        .with_source(err));
                }
                tracing::warn!(command = %envelope.name, "kernel closed stdin early");
            }
        }

        let status = child.wait().map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to wait for kernel")
                .with_path(&self.program)
                .with_source(err)
        })?;

        match status.code() {
            Some(code) => Ok(RunOutcome::with_code(code)),
            None => Err(Error::new(ErrorKind::Internal)
                .with_message("kernel terminated by signal")
                .with_path(&self.program)),
        }
    }
}

fn spawn_error(program: &Path, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        return Error::new(ErrorKind::NotFound)
            .with_message("kernel program not found")
            .with_path(program)
            .with_hint(format!(
                "Check that {KERNEL_ENV} names an installed executable."
            ))
            .with_source(err);
    }
    Error::new(ErrorKind::Io)
        .with_message("failed to start kernel")
        .with_path(program)
        .with_source(err)
}

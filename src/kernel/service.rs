//! Purpose: Default kernel for the `taro` binary.
//! Exports: `Plugin`, `ServiceKernel`.
//! Role: Route commands to in-process plugins, else to the external kernel program.
//! Invariants: A plugin name shadows the external kernel for that command.
//! Invariants: Without a plugin or external kernel, dispatch fails with `NotFound`.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::envelope::Envelope;
use crate::core::error::{Error, ErrorKind};

use super::{KERNEL_ENV, Kernel, KernelConfig, ProcessKernel, RunOutcome};

/// A command implemented inside the CLI process.
pub trait Plugin {
    fn name(&self) -> &str;

    fn run(
        &self,
        envelope: &Envelope,
        app_path: &Path,
        out: &mut dyn Write,
    ) -> Result<RunOutcome, Error>;
}

pub struct ServiceKernel<W: Write> {
    app_path: PathBuf,
    plugins: Vec<Box<dyn Plugin>>,
    external: Option<ProcessKernel>,
    out: W,
}

impl<W: Write> ServiceKernel<W> {
    pub fn new(app_path: impl Into<PathBuf>, config: KernelConfig, out: W) -> Self {
        let app_path = app_path.into();
        let external = config
            .program
            .map(|program| ProcessKernel::new(program, app_path.clone()));
        Self {
            app_path,
            plugins: Vec::new(),
            external,
            out,
        }
    }

    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write> Kernel for ServiceKernel<W> {
    fn run(&mut self, envelope: Envelope) -> Result<RunOutcome, Error> {
        if let Some(plugin) = self
            .plugins
            .iter()
            .find(|plugin| plugin.name() == envelope.name)
        {
            tracing::debug!(command = %envelope.name, "running in-process plugin");
            let outcome = plugin.run(&envelope, &self.app_path, &mut self.out)?;
            self.out.flush().map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to flush output")
                    .with_source(err)
            })?;
            return Ok(outcome);
        }

        match self.external.as_mut() {
            Some(kernel) => kernel.run(envelope),
            None => Err(Error::new(ErrorKind::NotFound)
                .with_message(format!(
                    "no kernel available for command `{}`",
                    envelope.name
                ))
                .with_hint(format!(
                    "Set {KERNEL_ENV} to the kernel executable that runs project commands."
                ))),
        }
    }
}

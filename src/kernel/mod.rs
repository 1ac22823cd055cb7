//! Purpose: Define the seam between the CLI and the runtime that executes commands.
//! Exports: `Kernel`, `RunOutcome`, `KernelConfig`, `ProcessKernel`, `ServiceKernel`, `Plugin`.
//! Role: The CLI builds one kernel per invocation and hands it one envelope.
//! Invariants: Kernels own all error handling for command execution.

mod process;
mod service;

use crate::core::envelope::Envelope;
use crate::core::error::Error;

pub use process::{KernelConfig, ProcessKernel};
pub use service::{Plugin, ServiceKernel};

pub const KERNEL_ENV: &str = "TARO_KERNEL";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
}

impl RunOutcome {
    pub fn ok() -> Self {
        Self { exit_code: 0 }
    }

    pub fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

pub trait Kernel {
    fn run(&mut self, envelope: Envelope) -> Result<RunOutcome, Error>;
}

impl<K: Kernel + ?Sized> Kernel for Box<K> {
    fn run(&mut self, envelope: Envelope) -> Result<RunOutcome, Error> {
        (**self).run(envelope)
    }
}

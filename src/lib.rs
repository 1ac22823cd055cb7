//! Purpose: Library crate backing the `taro` CLI and its tests.
//! Exports: `cli` (argv normalization), `kernel` (dispatch seam), `doctor`, `runtime`, `core`.
//! Role: Everything except process bootstrap and stderr rendering lives here.
//! Invariants: Modules take explicit inputs (argv, app path, mode); no hidden process state.
pub mod cli;
pub mod core;
pub mod doctor;
pub mod kernel;
pub mod runtime;

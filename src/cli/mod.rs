//! Purpose: Turn raw `taro` argv into one normalized dispatch envelope.
//! Exports: `CliRunner`, `Invocation`, `Parsed`, `normalize`, `parse_args`, option key tables.
//! Role: The only place that knows built-in option schemas; kernels see envelopes only.
//! Invariants: Built-in `options` always hold exactly their schema's key set.
//! Invariants: Usage/version/completion never construct a kernel.
//! Invariants: Normalization is pure for a fixed argv and `ModeConfig`.

mod args;
mod usage;

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;

use crate::core::envelope::{DispatchOptions, Envelope, OptionValue, Options};
use crate::core::error::{Error, ErrorKind};
use crate::core::mode::ModeConfig;
use crate::core::passthrough::parse_passthrough;
use crate::kernel::{Kernel, RunOutcome};

pub use args::{BuildArgs, Cli, Command, ConvertArgs, InitArgs};
pub use usage::{USAGE_LINES, write_usage, write_version};

pub const BUILD_OPTION_KEYS: [&str; 8] = [
    "platform",
    "isWatch",
    "env",
    "port",
    "deviceType",
    "resetCache",
    "qr",
    "blended",
];

pub const INIT_OPTION_KEYS: [&str; 8] = [
    "appPath",
    "projectName",
    "typescript",
    "templateSource",
    "description",
    "clone",
    "template",
    "css",
];

pub const CONVERT_OPTION_KEYS: [&str; 0] = [];

pub const BUILTIN_COMMANDS: [&str; 3] = ["build", "init", "convert"];

/// Schema key set for a built-in command; `None` means a custom command.
pub fn builtin_option_keys(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "build" => Some(&BUILD_OPTION_KEYS),
        "init" => Some(&INIT_OPTION_KEYS),
        "convert" => Some(&CONVERT_OPTION_KEYS),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Usage,
    Version,
    Completion(Shell),
    /// Help text rendered by clap for utility subcommands.
    Rendered(String),
    Dispatch(Envelope),
}

#[derive(Debug)]
pub enum Parsed {
    Args(Cli),
    /// clap already produced the output (help for a utility subcommand).
    Rendered(String),
}

pub fn parse_args<I, T>(argv: I) -> Result<Parsed, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Parsed::Args(cli)),
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Ok(Parsed::Rendered(err.to_string()))
            }
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(clap_error_summary(&err))
                .with_hint(clap_error_hint(&err))),
        },
    }
}

pub fn normalize(cli: Cli, app_path: &Path, mode: ModeConfig) -> Invocation {
    let Some(command) = cli.command else {
        if cli.version && !cli.help {
            return Invocation::Version;
        }
        return Invocation::Usage;
    };

    let envelope = match command {
        Command::Completion { shell } => return Invocation::Completion(shell),
        Command::Build(args) => build_envelope(args, cli.help, mode),
        Command::Init(args) => init_envelope(args, cli.help, app_path, mode),
        Command::Convert(args) => convert_envelope(args, cli.help, mode),
        Command::External(tokens) => {
            let Some((name, rest)) = tokens.split_first() else {
                return Invocation::Usage;
            };
            custom_envelope(name, rest, cli.help, mode)
        }
    };

    tracing::debug!(
        command = %envelope.name,
        is_help = envelope.opts.is_help,
        option_count = envelope.opts.options.len(),
        "normalized command"
    );
    Invocation::Dispatch(envelope)
}

fn build_envelope(args: BuildArgs, global_help: bool, mut mode: ModeConfig) -> Envelope {
    mode.default_node_env("production");
    if let Some(platform) = &args.platform {
        mode.set_taro_env(platform);
    }

    let mut options = Options::new();
    put(&mut options, "platform", args.platform);
    put(&mut options, "isWatch", Some(args.watch));
    put(&mut options, "env", args.env);
    put(&mut options, "port", args.port);
    put(&mut options, "deviceType", args.device_type);
    put(&mut options, "resetCache", Some(args.reset_cache));
    put(&mut options, "qr", Some(args.qr));
    put(&mut options, "blended", Some(args.blended));

    envelope(
        "build",
        args.rest,
        options,
        args.help || global_help,
        mode,
    )
}

fn init_envelope(
    args: InitArgs,
    global_help: bool,
    app_path: &Path,
    mode: ModeConfig,
) -> Envelope {
    let positionals: Vec<String> = args
        .project_name
        .iter()
        .cloned()
        .chain(args.rest)
        .collect();
    let project_name = args.project_name.or(args.name);

    let mut options = Options::new();
    put(
        &mut options,
        "appPath",
        Some(app_path.display().to_string()),
    );
    put(&mut options, "projectName", project_name);
    // Only an explicit flag is reported; absence stays undefined.
    put(&mut options, "typescript", args.typescript.then_some(true));
    put(&mut options, "templateSource", args.template_source);
    put(&mut options, "description", args.description);
    put(&mut options, "clone", Some(args.clone));
    put(&mut options, "template", args.template);
    put(&mut options, "css", args.css);

    envelope("init", positionals, options, args.help || global_help, mode)
}

fn convert_envelope(args: ConvertArgs, global_help: bool, mode: ModeConfig) -> Envelope {
    envelope(
        "convert",
        args.rest,
        Options::new(),
        args.help || global_help,
        mode,
    )
}

fn custom_envelope(name: &str, rest: &[String], global_help: bool, mode: ModeConfig) -> Envelope {
    let mut parsed = parse_passthrough(rest);
    let is_help = parsed.is_help() || global_help;
    parsed.strip_meta_flags();
    envelope(name, parsed.positionals, parsed.options, is_help, mode)
}

fn envelope(
    name: &str,
    positionals: Vec<String>,
    options: Options,
    is_help: bool,
    mode: ModeConfig,
) -> Envelope {
    let mut args = Vec::with_capacity(positionals.len() + 1);
    args.push(name.to_string());
    args.extend(positionals);
    Envelope {
        name: name.to_string(),
        opts: DispatchOptions {
            args,
            options,
            is_help,
        },
        mode,
    }
}

fn put<V: Into<OptionValue>>(options: &mut Options, key: &str, value: Option<V>) {
    options.insert(key.to_string(), value.map(Into::into));
}

/// Parses argv and dispatches to a kernel built on demand.
#[derive(Clone, Debug)]
pub struct CliRunner {
    app_path: PathBuf,
    mode: ModeConfig,
}

impl CliRunner {
    pub fn new(app_path: impl Into<PathBuf>, mode: ModeConfig) -> Self {
        Self {
            app_path: app_path.into(),
            mode,
        }
    }

    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    pub fn invocation<I, T>(&self, argv: I) -> Result<Invocation, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(match parse_args(argv)? {
            Parsed::Args(cli) => normalize(cli, &self.app_path, self.mode.clone()),
            Parsed::Rendered(text) => Invocation::Rendered(text),
        })
    }

    /// Runs one invocation. `make_kernel` is called at most once, and only
    /// when the invocation dispatches.
    pub fn run<I, T, F, K>(
        &self,
        argv: I,
        make_kernel: F,
        out: &mut dyn Write,
    ) -> Result<RunOutcome, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&Path) -> K,
        K: Kernel,
    {
        match self.invocation(argv)? {
            Invocation::Usage => {
                write_usage(out).map_err(output_error)?;
                Ok(RunOutcome::ok())
            }
            Invocation::Version => {
                write_version(out).map_err(output_error)?;
                Ok(RunOutcome::ok())
            }
            Invocation::Completion(shell) => {
                let mut cmd = Cli::command();
                clap_complete::aot::generate(shell, &mut cmd, "taro", out);
                Ok(RunOutcome::ok())
            }
            Invocation::Rendered(text) => {
                write!(out, "{text}").map_err(output_error)?;
                Ok(RunOutcome::ok())
            }
            Invocation::Dispatch(envelope) => {
                let mut kernel = make_kernel(&self.app_path);
                kernel.run(envelope)
            }
        }
    }
}

fn output_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write output")
        .with_source(err)
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `taro --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "taro") else {
        return "Try `taro --help`.".to_string();
    };

    let parts: Vec<&str> = tokens
        .iter()
        .skip(pos + 1)
        .take_while(|token| {
            !(token.starts_with('-') || token.starts_with('<') || token.starts_with('['))
        })
        .copied()
        .collect();

    if parts.is_empty() {
        return "Try `taro --help`.".to_string();
    }
    format!("Try `taro {} --help`.", parts.join(" "))
}

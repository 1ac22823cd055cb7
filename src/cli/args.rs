//! Purpose: clap definitions for the `taro` command line.
//! Exports: `Cli`, `Command`, `BuildArgs`, `InitArgs`, `ConvertArgs`.
//! Role: The built-in command registry; anything else is captured as an external command.
//! Invariants: clap's own help/version flags are disabled; `-h`/`-v` are plain booleans.
//! Invariants: Unknown flags on built-in commands are usage errors.
//! Invariants: A repeated flag keeps its last value.

use clap::{Args, Parser, Subcommand};
use clap_complete::aot::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "taro",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true,
    args_override_self = true
)]
pub struct Cli {
    #[arg(short = 'h', long = "help")]
    pub help: bool,
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(disable_help_flag = true, about = "Build the project for a target platform")]
    Build(BuildArgs),
    #[command(disable_help_flag = true, about = "Create a project from a template")]
    Init(InitArgs),
    #[command(disable_help_flag = true, about = "Convert a native mini-program project")]
    Convert(ConvertArgs),
    #[command(
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ taro completion bash > ~/.local/share/bash-completion/completions/taro
  $ taro completion zsh > ~/.zfunc/_taro"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
    #[command(external_subcommand)]
    External(Vec<String>),
}

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    #[arg(long = "type", value_name = "PLATFORM", help = "Target platform, e.g. weapp or h5")]
    pub platform: Option<String>,
    #[arg(long = "watch", help = "Rebuild on file changes")]
    pub watch: bool,
    #[arg(long, help = "Value for process.env.NODE_ENV inside the project")]
    pub env: Option<String>,
    #[arg(long, help = "Dev server port")]
    pub port: Option<u16>,
    #[arg(long = "device-type", help = "Device type for native targets")]
    pub device_type: Option<String>,
    #[arg(long = "reset-cache", help = "Reset the bundler cache")]
    pub reset_cache: bool,
    #[arg(long, help = "Print a QR code for the dev server")]
    pub qr: bool,
    #[arg(long, help = "Build as a blended native/Taro project")]
    pub blended: bool,
    #[arg(short = 'h', long = "help")]
    pub help: bool,
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,
    #[arg(long, help = "Project name (the positional name wins)")]
    pub name: Option<String>,
    #[arg(long, help = "Use TypeScript")]
    pub typescript: bool,
    #[arg(long = "template-source", help = "Template source URL or path")]
    pub template_source: Option<String>,
    #[arg(long, help = "Project description")]
    pub description: Option<String>,
    #[arg(long, help = "Clone the template source with git")]
    pub clone: bool,
    #[arg(long, help = "Template name")]
    pub template: Option<String>,
    #[arg(long, help = "CSS preprocessor")]
    pub css: Option<String>,
    #[arg(short = 'h', long = "help")]
    pub help: bool,
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ConvertArgs {
    #[arg(short = 'h', long = "help")]
    pub help: bool,
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

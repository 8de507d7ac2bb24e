//! Flags shared by `new`, `init`, `config` and `completions`.
//!
//! Flattened into [`super::Cli`]; every flag is `global`, so
//! `plantgen new -vv` and `plantgen -vv new` mean the same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log verbosity for the generation run.
    ///
    /// `RUST_LOG` takes precedence when set. Any `-v` also hides the
    /// spinner so log lines are not interleaved with it.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more of the run (-v, -vv, -vvv)",
        long_help = "Log more of the generation run:
    (none)  - Warnings and errors only
    -v      - State transitions and the run id
    -vv     - Every copied and rewritten file
    -vvv    - Every walked template entry"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal: no spinner, no summary, no next steps.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain, uncoloured messages. Also set by a non-empty `NO_COLOR`
    /// (<https://no-color.org>) or `output.no_color` in the config file.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Config file to read instead of the per-user one. Unlike the default
    /// location it must exist. `plantgen init` writes here when given.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this plantgen.toml instead of the per-user one"
    )]
    pub config: Option<PathBuf>,

    /// `json` prints the dry-run plan or the generation report as one
    /// document on stdout and switches logs to JSON lines.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results. `auto` defers to `output.format` in the
/// config, then to whether stdout is a terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Coloured summary with a spinner and next steps.
    Human,
    /// The same summary without colour or spinner, for logs and pipes.
    Plain,
    /// Machine-readable report.
    Json,
}

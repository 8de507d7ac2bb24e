//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plantgen",
    bin_name = "plantgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a Go package from the plantpkg template",
    long_about = "plantgen copies the template package into your Go workspace \
                  and rewrites its import path, package name and service name.",
    after_help = "EXAMPLES:\n\
        \x20 plantgen new\n\
        \x20 plantgen new --package github.com/acme/widget --service Widget\n\
        \x20 plantgen new --package github.com/acme/widget -y --dry-run\n\
        \x20 plantgen completions bash > /usr/share/bash-completion/completions/plantgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new package from the template.
    #[command(
        visible_alias = "n",
        about = "Generate a new package",
        after_help = "EXAMPLES:\n\
            \x20 plantgen new                                  # prompt for everything\n\
            \x20 plantgen new --package github.com/acme/widget # prompt for the service\n\
            \x20 plantgen new --package github.com/acme/widget --service Widget --root ./src"
    )]
    New(NewArgs),

    /// Initialise a plantgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plantgen init           # default location\n\
            \x20 plantgen init --force   # overwrite an existing file\n\
            \x20 plantgen -c ./plantgen.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plantgen completions bash > ~/.local/share/bash-completion/completions/plantgen\n\
            \x20 plantgen completions zsh  > ~/.zfunc/_plantgen\n\
            \x20 plantgen completions fish > ~/.config/fish/completions/plantgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the plantgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 plantgen config get workspace.root\n\
            \x20 plantgen config list\n\
            \x20 plantgen config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `plantgen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Go import path of the package to create.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "IMPORT_PATH",
        help = "Package import path, e.g. github.com/acme/widget (prompted if omitted)"
    )]
    pub package: Option<String>,

    /// Exported service type name.
    #[arg(
        short = 's',
        long = "service",
        value_name = "NAME",
        help = "Service name, must start upper-case (prompted if omitted)"
    )]
    pub service: Option<String>,

    /// Template directory to copy instead of the configured one.
    #[arg(
        short = 't',
        long = "template",
        value_name = "DIR",
        help = "Template directory (default: <root>/<template qualified path>)"
    )]
    pub template: Option<PathBuf>,

    /// Workspace root packages are generated under.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Workspace root (default: $GOPATH/src)"
    )]
    pub root: Option<PathBuf>,

    /// Also rename files and directories containing a token.
    #[arg(long = "rename-paths", help = "Rewrite tokens in file and directory names")]
    pub rename_paths: bool,

    /// Preview what would be generated without writing any files.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,

    /// Accept defaults for anything not given as a flag.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Use defaults instead of prompting for missing values"
    )]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `plantgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plantgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `plantgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `workspace.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

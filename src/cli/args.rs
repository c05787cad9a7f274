//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `strip`: Discard comments from stylesheets (dry-run unless `--apply`)
//! - `init`: Initialize csscrub configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Strip(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct StripCommand {
    /// Stylesheets or directories to process (default: config includes).
    /// Pass `-` to read from stdin and write to stdout.
    pub paths: Vec<PathBuf>,

    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Remove important (/*! ... */) comments too
    #[arg(long)]
    pub remove_all: bool,

    /// Remove every important comment except the first one
    #[arg(long)]
    pub remove_all_but_first: bool,

    /// Remove comments whose text matches this regex.
    /// Can be specified multiple times: --remove '^@' --remove 'TODO'
    #[arg(long = "remove", value_name = "REGEX")]
    pub remove_patterns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl StripCommand {
    /// `csscrub strip -`
    pub fn is_stdin(&self) -> bool {
        matches!(self.paths.as_slice(), [path] if path.as_os_str() == "-")
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Discard comments from stylesheets, keeping /*! important */ ones by default
    Strip(StripCommand),
    /// Initialize a new .csscrubrc.json configuration file
    Init,
}

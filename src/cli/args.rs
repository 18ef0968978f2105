//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `routes`: Build the route table of the entry file and print it
//! - `init`: Initialize routemap configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

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
            Some(Command::Routes(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands that read a project.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory, where the config file search starts
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Entry file holding the route elements (overrides config file)
    #[arg(long)]
    pub entry: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the route table is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RouteView {
    /// Nested route objects
    #[default]
    Tree,
    /// Route ref id and full path
    Paths,
    /// Route ref id and the id of its parent
    Parents,
}

#[derive(Debug, Parser)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output layout
    #[arg(long, value_enum, default_value_t)]
    pub view: RouteView,

    /// Print the route table as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show route refs whose id matches this regular expression
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
pub struct RoutesCommand {
    #[command(flatten)]
    pub args: RoutesArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and print the route table of the app's entry file
    Routes(RoutesCommand),
    /// Initialize a new .routemaprc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

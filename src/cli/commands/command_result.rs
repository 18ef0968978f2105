use regex::Regex;

use crate::{cli::args::RouteView, core::RouteTable, issues::Issue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Routes,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Routes(RoutesSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct RoutesSummary {
    /// Entry file the tree was built from.
    pub entry: String,
    /// `None` when the tree has a route configuration error.
    pub table: Option<RouteTable>,
    pub view: RouteView,
    pub json: bool,
    pub filter: Option<Regex>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running routemap commands
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Route configuration errors and warnings found while building the table.
    pub issues: Vec<Issue>,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
}

use anyhow::{Context, Result};
use regex::Regex;

use super::{CommandKind, CommandResult, CommandSummary, RoutesSummary};
use crate::{
    cli::args::RoutesCommand,
    core::{RouteConfigError, RouteContext, context::display_path},
    issues::{Issue, Severity},
};

pub fn routes(cmd: RoutesCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let filter = args
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid --filter pattern")?;

    let ctx = RouteContext::new(&args.common)?;
    let mut issues = ctx.issues();

    let table = match ctx.route_table() {
        Ok(table) => Some(match &filter {
            Some(re) => table.filtered(|route_ref| re.is_match(route_ref.id())),
            None => table,
        }),
        Err(err) => match err.downcast::<RouteConfigError>() {
            Ok(config_error) => {
                issues.push(Issue::from(config_error));
                None
            }
            Err(err) => return Err(err),
        },
    };

    let error_count = issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();
    let parse_error_count = ctx.parse_errors().len();

    Ok(CommandResult {
        kind: CommandKind::Routes,
        summary: CommandSummary::Routes(RoutesSummary {
            entry: display_path(&ctx.entry_path()).to_string(),
            table,
            view: args.view,
            json: args.json,
            filter,
        }),
        error_count,
        warning_count: issues.len() - error_count,
        issues,
        parse_error_count,
        source_files_checked: ctx.files.len(),
    })
}

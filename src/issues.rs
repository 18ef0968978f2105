//! Problems found while building the route table.
//!
//! Each issue carries everything the CLI reporter and the MCP server need to
//! describe it: severity, rule, message and source location.

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{RouteConfigError, SourceLocation};

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingPath,
    UnresolvedMountPoint,
    DuplicateRouteRef,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingPath => write!(f, "missing-path"),
            Rule::UnresolvedMountPoint => write!(f, "unresolved-mount-point"),
            Rule::DuplicateRouteRef => write!(f, "duplicate-route-ref"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

/// A mount point without a usable `path` prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfigIssue {
    pub error: RouteConfigError,
}

/// A routable extension whose `mountPoint` names no known route ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedMountPointIssue {
    pub component: String,
    pub mount_point: String,
    pub location: SourceLocation,
}

/// A route ref binding declared more than once. The first declaration wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRouteRefIssue {
    pub binding: String,
    pub location: SourceLocation,
    pub first_location: SourceLocation,
}

/// A source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// Location information for report output.
pub enum ReportLocation<'a> {
    Source(&'a SourceLocation),
    File { path: &'a str },
    Unknown,
}

impl<'a> ReportLocation<'a> {
    /// `(file, line, col)`, with zeros for file-level and unknown locations.
    pub fn parts(&self) -> (&'a str, usize, usize) {
        match *self {
            ReportLocation::Source(loc) => (loc.file_path.as_str(), loc.line, loc.col),
            ReportLocation::File { path } => (path, 0, 0),
            ReportLocation::Unknown => ("", 0, 0),
        }
    }
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Text for the `= note:` line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for RouteConfigIssue {
    fn location(&self) -> ReportLocation<'_> {
        match self.error.location() {
            Some(loc) => ReportLocation::Source(loc),
            None => ReportLocation::Unknown,
        }
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingPath
    }

    fn details(&self) -> Option<String> {
        Some(format!("mounted at {}", self.error.route_ref()))
    }
}

impl Report for UnresolvedMountPointIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
    }

    fn message(&self) -> String {
        format!(
            "{} mounts unknown route ref `{}`",
            self.component, self.mount_point
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::UnresolvedMountPoint
    }

    fn details(&self) -> Option<String> {
        Some("add it to `mountPoints` in the config file to map it by id".to_string())
    }
}

impl Report for DuplicateRouteRefIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
    }

    fn message(&self) -> String {
        format!("route ref `{}` is declared more than once", self.binding)
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::DuplicateRouteRef
    }

    fn details(&self) -> Option<String> {
        Some(format!("first declared at {}", self.first_location))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::ParseError
    }
}

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    RouteConfig(RouteConfigIssue),
    UnresolvedMountPoint(UnresolvedMountPointIssue),
    DuplicateRouteRef(DuplicateRouteRefIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    pub fn file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::Source(loc) => Some(&loc.file_path),
            ReportLocation::File { path } => Some(path),
            ReportLocation::Unknown => None,
        }
    }
}

impl From<RouteConfigError> for Issue {
    fn from(error: RouteConfigError) -> Self {
        Issue::RouteConfig(RouteConfigIssue { error })
    }
}

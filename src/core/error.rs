use thiserror::Error;

use super::{route_ref::RouteRef, tree::SourceLocation};

/// Fatal problems in the route configuration of the walked tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteConfigError {
    /// Raised by the path collector.
    #[error("Mounted routable extension must have a path")]
    MissingPath {
        route_ref: RouteRef,
        location: Option<SourceLocation>,
    },

    /// Raised by the route-object collector.
    #[error("No path found for mount point {route_ref}")]
    MissingMountPointPath {
        route_ref: RouteRef,
        location: Option<SourceLocation>,
    },
}

impl RouteConfigError {
    pub fn route_ref(&self) -> &RouteRef {
        match self {
            RouteConfigError::MissingPath { route_ref, .. }
            | RouteConfigError::MissingMountPointPath { route_ref, .. } => route_ref,
        }
    }

    /// Source location of the offending node, when the tree was built from source.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RouteConfigError::MissingPath { location, .. }
            | RouteConfigError::MissingMountPointPath { location, .. } => location.as_ref(),
        }
    }
}

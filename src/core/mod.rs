//! Route table engine.
//!
//! - `tree`, `route_ref`, `metadata`: the element tree and the data attached to it
//! - `collector`, `collectors`, `mount_point`, `routes`: tree traversal and the route collectors
//! - `parsers`, `file_scanner`, `collect`, `extract`, `context`: reading a project from disk

pub mod collect;
pub mod collector;
pub mod collectors;
pub mod context;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod metadata;
pub mod mount_point;
pub mod parsers;
pub mod route_ref;
pub mod routes;
pub mod tree;
pub mod utils;

pub use collector::{Collector, FnCollector, create_collector};
pub use collectors::{
    RouteObject, RouteParentMap, RoutePathMap, route_object_collector, route_parent_collector,
    route_path_collector,
};
pub use context::RouteContext;
pub use error::RouteConfigError;
pub use metadata::{ComponentData, ComponentDataTable, MOUNT_POINT_KEY, MetadataLookup};
pub use mount_point::resolve_mount_point;
pub use route_ref::RouteRef;
pub use routes::{RouteTable, build_route_table};
pub use tree::{ElementNode, ElementRef, ElementTree, ElementType, NodeId, PropValue, SourceLocation};

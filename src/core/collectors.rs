//! Route collection strategies built on the generic collector.

use indexmap::IndexMap;
use serde::Serialize;

use super::{
    collector::{Collector, create_collector},
    error::RouteConfigError,
    metadata::MetadataLookup,
    mount_point::resolve_mount_point,
    route_ref::RouteRef,
};

/// Route ref to the path of the node that mounts it.
pub type RoutePathMap = IndexMap<RouteRef, String>;

/// Route ref to its nearest enclosing mounted route ref.
pub type RouteParentMap = IndexMap<RouteRef, Option<RouteRef>>;

/// One mounted route with its nested routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteObject {
    pub path: String,
    pub case_sensitive: bool,
    pub route_ref: RouteRef,
    pub children: Vec<RouteObject>,
}

/// Address of a children list inside the nested route-object accumulator.
///
/// The empty slot is the top-level list; each index steps into the
/// `children` of that route object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildSlot(Vec<usize>);

impl ChildSlot {
    pub fn siblings<'a>(&self, routes: &'a mut Vec<RouteObject>) -> &'a mut Vec<RouteObject> {
        self.0
            .iter()
            .fold(routes, |list, &index| &mut list[index].children)
    }

    /// Slot of the children of the route object at `index` in this slot.
    pub fn child(&self, index: usize) -> ChildSlot {
        let mut path = self.0.clone();
        path.push(index);
        ChildSlot(path)
    }
}

/// Collects the path every mount point is mounted at.
pub fn route_path_collector<L>(
    lookup: &L,
) -> impl Collector<Accumulator = RoutePathMap, Carried = (), Error = RouteConfigError>
where
    L: MetadataLookup + ?Sized,
{
    create_collector(IndexMap::new, move |acc: &mut RoutePathMap, node, parent, _carried: &()| {
        if parent.is_some_and(|p| node.is_pass_through_of(p)) {
            return Ok(());
        }

        if let Some(route_ref) = resolve_mount_point(lookup, node) {
            let Some(path) = node.path() else {
                return Err(RouteConfigError::MissingPath {
                    route_ref,
                    location: node.location().cloned(),
                });
            };
            acc.insert(route_ref, path.to_string());
        }
        Ok(())
    })
}

/// Collects the nearest enclosing mount point of every mount point.
pub fn route_parent_collector<L>(
    lookup: &L,
) -> impl Collector<Accumulator = RouteParentMap, Carried = Option<RouteRef>, Error = RouteConfigError>
where
    L: MetadataLookup + ?Sized,
{
    create_collector(
        IndexMap::new,
        move |acc: &mut RouteParentMap, node, parent, carried: &Option<RouteRef>| {
            if parent.is_some_and(|p| node.is_pass_through_of(p)) {
                return Ok(carried.clone());
            }

            match resolve_mount_point(lookup, node) {
                Some(route_ref) => {
                    acc.insert(route_ref.clone(), carried.clone());
                    Ok(Some(route_ref))
                }
                None => Ok(carried.clone()),
            }
        },
    )
}

/// Collects mount points into a nested tree mirroring their nesting in the elements.
pub fn route_object_collector<L>(
    lookup: &L,
) -> impl Collector<Accumulator = Vec<RouteObject>, Carried = ChildSlot, Error = RouteConfigError>
where
    L: MetadataLookup + ?Sized,
{
    create_collector(
        Vec::new,
        move |acc: &mut Vec<RouteObject>, node, parent, carried: &ChildSlot| {
            if parent.is_some_and(|p| node.is_pass_through_of(p)) {
                return Ok(carried.clone());
            }

            let path = node.path();
            let case_sensitive = node.case_sensitive();

            let Some(route_ref) = resolve_mount_point(lookup, node) else {
                return Ok(carried.clone());
            };
            let Some(path) = path else {
                return Err(RouteConfigError::MissingMountPointPath {
                    route_ref,
                    location: node.location().cloned(),
                });
            };

            let siblings = carried.siblings(acc);
            siblings.push(RouteObject {
                path: path.to_string(),
                case_sensitive,
                route_ref,
                children: Vec::new(),
            });
            Ok(carried.child(siblings.len() - 1))
        },
    )
}

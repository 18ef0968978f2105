use serde::Serialize;

use super::{
    collector::Collector,
    collectors::{
        RouteObject, RouteParentMap, RoutePathMap, route_object_collector, route_parent_collector,
        route_path_collector,
    },
    error::RouteConfigError,
    metadata::MetadataLookup,
    route_ref::RouteRef,
    tree::ElementTree,
};

/// All routing artifacts derived from one element tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    pub paths: RoutePathMap,
    pub parents: RouteParentMap,
    pub routes: Vec<RouteObject>,
    /// Full paths joined before filtering, when ancestors were dropped.
    #[serde(skip)]
    full_paths: RoutePathMap,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Find a collected route ref by id.
    pub fn route_ref(&self, id: &str) -> Option<&RouteRef> {
        self.paths.keys().find(|route_ref| route_ref.id() == id)
    }

    /// Full path of a route, joining the paths of its mount ancestors.
    pub fn full_path(&self, route_ref: &RouteRef) -> Option<String> {
        if let Some(full) = self.full_paths.get(route_ref) {
            return Some(full.clone());
        }
        let mut segments = vec![self.paths.get(route_ref)?.as_str()];
        let mut current = route_ref;
        while let Some(Some(parent)) = self.parents.get(current) {
            // A route ref mounted inside itself.
            if parent == route_ref || segments.len() > self.parents.len() {
                break;
            }
            if let Some(path) = self.paths.get(parent) {
                segments.push(path);
            }
            current = parent;
        }
        segments.reverse();
        Some(join_paths(&segments))
    }

    /// Keep only route refs accepted by `keep`. Route objects that do not
    /// match stay in place when one of their descendants does, and full
    /// paths still include the segments of dropped ancestors.
    pub fn filtered(&self, keep: impl Fn(&RouteRef) -> bool) -> RouteTable {
        fn prune(routes: &[RouteObject], keep: &dyn Fn(&RouteRef) -> bool) -> Vec<RouteObject> {
            routes
                .iter()
                .filter_map(|route| {
                    let children = prune(&route.children, keep);
                    (keep(&route.route_ref) || !children.is_empty()).then(|| RouteObject {
                        children,
                        ..route.clone()
                    })
                })
                .collect()
        }

        RouteTable {
            paths: self
                .paths
                .iter()
                .filter(|(route_ref, _)| keep(*route_ref))
                .map(|(route_ref, path)| (route_ref.clone(), path.clone()))
                .collect(),
            parents: self
                .parents
                .iter()
                .filter(|(route_ref, _)| keep(*route_ref))
                .map(|(route_ref, parent)| (route_ref.clone(), parent.clone()))
                .collect(),
            routes: prune(&self.routes, &keep),
            full_paths: self
                .paths
                .keys()
                .filter(|route_ref| keep(*route_ref))
                .filter_map(|route_ref| Some((route_ref.clone(), self.full_path(route_ref)?)))
                .collect(),
        }
    }
}

fn join_paths(segments: &[&str]) -> String {
    let joined = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}

/// Run the three route collectors over `tree`.
pub fn build_route_table<L>(tree: &ElementTree, lookup: &L) -> Result<RouteTable, RouteConfigError>
where
    L: MetadataLookup + ?Sized,
{
    Ok(RouteTable {
        paths: route_path_collector(lookup).collect(tree)?,
        parents: route_parent_collector(lookup).collect(tree)?,
        routes: route_object_collector(lookup).collect(tree)?,
        full_paths: RoutePathMap::new(),
    })
}

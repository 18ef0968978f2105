//! Extension metadata attached to component types.
//!
//! Route collection never inspects components directly. It asks a
//! `MetadataLookup` for data stored under a string key, the way a plugin
//! system attaches data such as `core.mountPoint` to the components it
//! creates.

use std::collections::HashMap;

use super::{route_ref::RouteRef, tree::ElementRef};

/// Metadata key under which a routable extension stores its route identity.
pub const MOUNT_POINT_KEY: &str = "core.mountPoint";

/// A typed value stored in the metadata side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentData {
    RouteRef(RouteRef),
    Str(String),
    Bool(bool),
}

impl ComponentData {
    pub fn as_route_ref(&self) -> Option<&RouteRef> {
        match self {
            ComponentData::RouteRef(route_ref) => Some(route_ref),
            _ => None,
        }
    }
}

/// Read-only lookup of metadata for a node.
///
/// Implementations must be side-effect free and return the same value for
/// the same `(node, key)` pair for the duration of a traversal.
pub trait MetadataLookup {
    fn lookup(&self, node: ElementRef<'_>, key: &str) -> Option<&ComponentData>;
}

/// Metadata keyed by component type name, then by key.
///
/// Fragments never carry metadata.
#[derive(Debug, Clone, Default)]
pub struct ComponentDataTable {
    entries: HashMap<String, HashMap<String, ComponentData>>,
}

impl ComponentDataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        component: impl Into<String>,
        key: impl Into<String>,
        data: ComponentData,
    ) -> Option<ComponentData> {
        self.entries
            .entry(component.into())
            .or_default()
            .insert(key.into(), data)
    }

    /// Attach `route_ref` as the mount point of `component`, replacing any previous one.
    pub fn attach_mount_point(&mut self, component: impl Into<String>, route_ref: RouteRef) {
        self.insert(component, MOUNT_POINT_KEY, ComponentData::RouteRef(route_ref));
    }

    /// Make `alias` carry the same metadata as `component`, e.g. for
    /// `import { CatalogIndexPage as Catalog }`. Returns false when
    /// `component` has no metadata or `alias` already has some.
    pub fn alias(&mut self, alias: &str, component: &str) -> bool {
        if self.entries.contains_key(alias) {
            return false;
        }
        let Some(data) = self.entries.get(component).cloned() else {
            return false;
        };
        self.entries.insert(alias.to_string(), data);
        true
    }

    pub fn get(&self, component: &str, key: &str) -> Option<&ComponentData> {
        self.entries.get(component).and_then(|data| data.get(key))
    }

    /// Mount point route ref declared for `component`, if any.
    pub fn mount_point(&self, component: &str) -> Option<&RouteRef> {
        self.get(component, MOUNT_POINT_KEY)
            .and_then(ComponentData::as_route_ref)
    }

    /// Number of components with at least one entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataLookup for ComponentDataTable {
    fn lookup(&self, node: ElementRef<'_>, key: &str) -> Option<&ComponentData> {
        let component = node.element_type().name()?;
        self.get(component, key)
    }
}

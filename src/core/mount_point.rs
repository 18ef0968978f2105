use super::{
    metadata::{ComponentData, MOUNT_POINT_KEY, MetadataLookup},
    route_ref::RouteRef,
    tree::ElementRef,
};

/// Resolve the route identity a node is mounted at.
///
/// The node's own metadata wins. Otherwise the node referenced by its
/// `element` prop is checked, and only that one: an `element` of the
/// `element` is not followed.
pub fn resolve_mount_point<L>(lookup: &L, node: ElementRef<'_>) -> Option<RouteRef>
where
    L: MetadataLookup + ?Sized,
{
    mount_point_of(lookup, node)
        .or_else(|| node.element().and_then(|element| mount_point_of(lookup, element)))
        .cloned()
}

fn mount_point_of<'l, L>(lookup: &'l L, node: ElementRef<'_>) -> Option<&'l RouteRef>
where
    L: MetadataLookup + ?Sized,
{
    lookup
        .lookup(node, MOUNT_POINT_KEY)
        .and_then(ComponentData::as_route_ref)
}

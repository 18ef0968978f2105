use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use serde::{Serialize, Serializer};

#[derive(Debug)]
struct RouteRefInner {
    id: String,
    title: Option<String>,
}

/// Opaque route identity.
///
/// Equality and hashing use the identity of the shared allocation, not the
/// id: two route refs created separately are different even when their ids
/// match, while clones of one route ref are always equal.
#[derive(Clone)]
pub struct RouteRef(Arc<RouteRefInner>);

impl RouteRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::new(RouteRefInner {
            id: id.into(),
            title: None,
        }))
    }

    pub fn with_title(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self(Arc::new(RouteRefInner {
            id: id.into(),
            title: Some(title.into()),
        }))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn title(&self) -> Option<&str> {
        self.0.title.as_deref()
    }
}

impl PartialEq for RouteRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RouteRef {}

impl Hash for RouteRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "routeRef{{id={}}}", self.0.id)
    }
}

impl fmt::Debug for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteRef({})", self.0.id)
    }
}

/// Serialized as its id, so maps keyed by route refs become JSON objects.
impl Serialize for RouteRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.id)
    }
}

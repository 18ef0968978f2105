//! Read-only element tree the collectors walk.
//!
//! Nodes are stored in an arena (`ElementTree`) and addressed by `NodeId`.
//! A node can only reference nodes that were added before it, either as a
//! structural child or through an `element` prop, so every tree built through
//! `ElementTree::add_node` is finite and acyclic.

use std::fmt;

use indexmap::IndexMap;

/// Stable identity of a node within one `ElementTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Location of a node's opening tag in its source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file_path: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}

/// The `type` of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A named component or intrinsic tag, e.g. `Route`, `CatalogIndexPage`, `div`.
    Component(String),
    /// `<>...</>` or `<Fragment>` grouping without a name of its own.
    Fragment,
}

impl ElementType {
    pub fn component(name: impl Into<String>) -> Self {
        ElementType::Component(name.into())
    }

    /// Component name, `None` for fragments.
    pub fn name(&self) -> Option<&str> {
        match self {
            ElementType::Component(name) => Some(name),
            ElementType::Fragment => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Component(name) => write!(f, "{}", name),
            ElementType::Fragment => write!(f, "Fragment"),
        }
    }
}

/// Value of a single prop, reduced to what route collection needs to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    Str(String),
    Bool(bool),
    /// Another element of the same tree, e.g. `element={<CatalogPage />}`.
    Element(NodeId),
    /// An expression only known at runtime, kept as written: `{paths.catalog}`.
    Expr(String),
    /// A value that is statically falsy or has no meaning here (`null`, `{}`).
    Other,
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<NodeId> {
        match self {
            PropValue::Element(id) => Some(*id),
            _ => None,
        }
    }

    /// JavaScript truthiness for values known statically; `Expr` and `Other` count as false.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropValue::Str(s) => !s.is_empty(),
            PropValue::Bool(b) => *b,
            PropValue::Element(_) => true,
            PropValue::Expr(_) | PropValue::Other => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<NodeId> for PropValue {
    fn from(value: NodeId) -> Self {
        PropValue::Element(value)
    }
}

/// Owned data of a node before it is added to a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub element_type: ElementType,
    pub props: IndexMap<String, PropValue>,
    pub children: Vec<NodeId>,
    pub location: Option<SourceLocation>,
}

impl ElementNode {
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            props: IndexMap::new(),
            children: Vec::new(),
            location: None,
        }
    }

    pub fn component(name: impl Into<String>) -> Self {
        Self::new(ElementType::component(name))
    }

    pub fn fragment() -> Self {
        Self::new(ElementType::Fragment)
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Arena of element nodes plus the ordered list of top-level nodes.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
    roots: Vec<NodeId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    ///
    /// Children and `Element` props must refer to nodes already in this tree.
    pub fn add_node(&mut self, node: ElementNode) -> NodeId {
        debug_assert!(
            node.children
                .iter()
                .copied()
                .chain(node.props.values().filter_map(PropValue::as_element))
                .all(|id| id.0 < self.nodes.len()),
            "node references an id that is not in this tree"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Mark a node as a top-level node. Roots are walked in the order they were added.
    pub fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    pub fn node(&self, id: NodeId) -> Option<ElementRef<'_>> {
        (id.0 < self.nodes.len()).then_some(ElementRef { tree: self, id })
    }

    pub fn roots(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.roots.iter().filter_map(|id| self.node(*id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Borrowed view of one node. Cheap to copy.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ElementTree,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    fn data(&self) -> &'a ElementNode {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn element_type(&self) -> &'a ElementType {
        &self.data().element_type
    }

    pub fn props(&self) -> &'a IndexMap<String, PropValue> {
        &self.data().props
    }

    pub fn prop(&self, key: &str) -> Option<&'a PropValue> {
        self.data().props.get(key)
    }

    pub fn location(&self) -> Option<&'a SourceLocation> {
        self.data().location.as_ref()
    }

    /// The `path` prop when it is a non-empty string or a runtime expression.
    pub fn path(&self) -> Option<&'a str> {
        match self.prop("path")? {
            PropValue::Str(path) if !path.is_empty() => Some(path),
            PropValue::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    /// The `caseSensitive` prop coerced to a boolean, `false` when absent.
    pub fn case_sensitive(&self) -> bool {
        self.prop("caseSensitive").is_some_and(PropValue::is_truthy)
    }

    /// The node referenced by the `element` prop, if that prop holds an element.
    pub fn element(&self) -> Option<ElementRef<'a>> {
        self.prop("element")
            .and_then(PropValue::as_element)
            .and_then(|id| self.tree.node(id))
    }

    /// Whether this node is the `element` prop of `parent` rather than a
    /// structural child of it.
    pub fn is_pass_through_of(&self, parent: ElementRef<'_>) -> bool {
        std::ptr::eq(self.tree, parent.tree)
            && parent.prop("element").and_then(PropValue::as_element) == Some(self.id)
    }

    /// Nodes the traversal descends into: structural children in order, then
    /// the `element` prop when this node declares both `path` and `element`.
    pub fn children(self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let tree = self.tree;
        let routed_element = if self.path().is_some() {
            self.element()
        } else {
            None
        };
        self.data()
            .children
            .iter()
            .filter_map(move |id| tree.node(*id))
            .chain(routed_element)
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("type", self.element_type())
            .finish()
    }
}

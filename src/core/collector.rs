//! Generic depth-first traversal over an `ElementTree`.
//!
//! A `Collector` owns no state of its own between runs. Each call to
//! `collect` creates a fresh accumulator, walks the tree in pre-order and
//! hands every node to `visit` together with its parent and the value its
//! parent returned. Whatever `visit` returns is handed to that node's
//! children, so strategies can track the nearest enclosing scope without
//! any shared mutable state besides the accumulator.

use std::marker::PhantomData;

use super::tree::{ElementRef, ElementTree};

pub trait Collector {
    type Accumulator;
    /// Value threaded from a node to its children. Roots receive `Default::default()`.
    type Carried: Default;
    type Error;

    fn accumulator(&self) -> Self::Accumulator;

    fn visit(
        &self,
        acc: &mut Self::Accumulator,
        node: ElementRef<'_>,
        parent: Option<ElementRef<'_>>,
        carried: &Self::Carried,
    ) -> Result<Self::Carried, Self::Error>;

    /// Walk every root of `tree` in order, sharing one accumulator.
    fn collect(&self, tree: &ElementTree) -> Result<Self::Accumulator, Self::Error> {
        let mut acc = self.accumulator();
        let carried = Self::Carried::default();
        for root in tree.roots() {
            walk(self, &mut acc, root, None, &carried)?;
        }
        Ok(acc)
    }

    /// Walk the subtree below `root` only.
    fn collect_from(&self, root: ElementRef<'_>) -> Result<Self::Accumulator, Self::Error> {
        let mut acc = self.accumulator();
        walk(self, &mut acc, root, None, &Self::Carried::default())?;
        Ok(acc)
    }
}

fn walk<C>(
    collector: &C,
    acc: &mut C::Accumulator,
    node: ElementRef<'_>,
    parent: Option<ElementRef<'_>>,
    carried: &C::Carried,
) -> Result<(), C::Error>
where
    C: Collector + ?Sized,
{
    let next = collector.visit(acc, node, parent, carried)?;
    for child in node.children() {
        walk(collector, acc, child, Some(node), &next)?;
    }
    Ok(())
}

/// A `Collector` assembled from an accumulator factory and a visit closure.
pub struct FnCollector<A, C, E, I, V> {
    init: I,
    visit: V,
    _marker: PhantomData<fn() -> (A, C, E)>,
}

/// Build a collector from closures.
///
/// ```
/// use routemap::core::{create_collector, Collector, ElementNode, ElementTree};
///
/// let mut tree = ElementTree::new();
/// let leaf = tree.add_node(ElementNode::component("Leaf"));
/// let root = tree.add_node(ElementNode::component("Root").with_children([leaf]));
/// tree.add_root(root);
///
/// let depths = create_collector(Vec::new, |acc: &mut Vec<(String, usize)>, node, _parent, depth: &usize| {
///     acc.push((node.element_type().to_string(), *depth));
///     Ok::<_, std::convert::Infallible>(depth + 1)
/// });
///
/// let collected = depths.collect(&tree).unwrap();
/// assert_eq!(collected, vec![("Root".to_string(), 0), ("Leaf".to_string(), 1)]);
/// ```
pub fn create_collector<A, C, E, I, V>(init: I, visit: V) -> FnCollector<A, C, E, I, V>
where
    C: Default,
    I: Fn() -> A,
    V: for<'t> Fn(&mut A, ElementRef<'t>, Option<ElementRef<'t>>, &C) -> Result<C, E>,
{
    FnCollector {
        init,
        visit,
        _marker: PhantomData,
    }
}

impl<A, C, E, I, V> Collector for FnCollector<A, C, E, I, V>
where
    C: Default,
    I: Fn() -> A,
    V: for<'t> Fn(&mut A, ElementRef<'t>, Option<ElementRef<'t>>, &C) -> Result<C, E>,
{
    type Accumulator = A;
    type Carried = C;
    type Error = E;

    fn accumulator(&self) -> A {
        (self.init)()
    }

    fn visit(
        &self,
        acc: &mut A,
        node: ElementRef<'_>,
        parent: Option<ElementRef<'_>>,
        carried: &C,
    ) -> Result<C, E> {
        (self.visit)(acc, node, parent, carried)
    }
}

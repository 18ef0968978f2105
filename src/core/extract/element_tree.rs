//! Builds an `ElementTree` from the JSX of one parsed file.
//!
//! JSX bound to a `const` is inlined wherever that binding is used as a
//! child or prop, so a route table split across several constants reads as
//! one tree. Nodes are added bottom-up: children and `element` props first,
//! then the node that refers to them.

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use anyhow::{Result, anyhow};
use swc_common::{SourceMapper, Span, Spanned};
use swc_ecma_ast::{
    BinaryOp, Expr, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, JSXExpr,
    JSXExprContainer, JSXFragment, Lit, UnaryOp, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{
    parsers::jsx::ParsedJSX,
    tree::{ElementNode, ElementTree, ElementType, NodeId, PropValue},
    utils::{binding_ident, jsx_attr_name, jsx_element_name, static_string, unwrap_ts_expr},
};

const FRAGMENT_NAMES: &[&str] = &["Fragment", "React.Fragment"];

/// Expressions a JSX child or prop position is expanded into: the expression
/// itself, both branches of `?:`, the right side of `&&`, `||` and `??`, and
/// array items.
fn for_each_inline_expr<'e>(expr: &'e Expr, f: &mut impl FnMut(&'e Expr)) {
    match unwrap_ts_expr(expr) {
        Expr::Cond(cond) => {
            for_each_inline_expr(&cond.cons, f);
            for_each_inline_expr(&cond.alt, f);
        }
        Expr::Bin(bin)
            if matches!(
                bin.op,
                BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing
            ) =>
        {
            for_each_inline_expr(&bin.right, f)
        }
        Expr::Array(array) => {
            for item in array.elems.iter().flatten() {
                if item.spread.is_none() {
                    for_each_inline_expr(&item.expr, f);
                }
            }
        }
        inner => f(inner),
    }
}

/// One pass over the module: JSX bindings, outermost JSX expressions and the
/// identifiers used inline inside JSX.
#[derive(Default)]
struct JsxScanner {
    bindings: HashMap<String, Rc<Expr>>,
    candidates: Vec<Rc<Expr>>,
    referenced: HashSet<String>,
    jsx_depth: usize,
}

impl JsxScanner {
    fn enter_jsx(&mut self, expr: impl FnOnce() -> Expr) {
        if self.jsx_depth == 0 {
            self.candidates.push(Rc::new(expr()));
        }
    }
}

impl Visit for JsxScanner {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(name) = binding_ident(&node.name)
            && let Some(init) = node.init.as_deref()
            && matches!(unwrap_ts_expr(init), Expr::JSXElement(_) | Expr::JSXFragment(_))
        {
            self.bindings
                .entry(name.to_string())
                .or_insert_with(|| Rc::new(unwrap_ts_expr(init).clone()));
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.enter_jsx(|| Expr::JSXElement(Box::new(node.clone())));
        self.jsx_depth += 1;
        node.visit_children_with(self);
        self.jsx_depth -= 1;
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.enter_jsx(|| Expr::JSXFragment(node.clone()));
        self.jsx_depth += 1;
        node.visit_children_with(self);
        self.jsx_depth -= 1;
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &node.expr {
            let referenced = &mut self.referenced;
            for_each_inline_expr(expr, &mut |inner| {
                if let Expr::Ident(ident) = inner {
                    referenced.insert(ident.sym.to_string());
                }
            });
        }
        node.visit_children_with(self);
    }
}

/// Converts the JSX of one parsed file into an `ElementTree`.
pub struct ElementTreeBuilder<'a> {
    parsed: &'a ParsedJSX,
    file_path: &'a str,
    scan: JsxScanner,
    tree: ElementTree,
    /// Bindings currently being inlined, innermost last.
    expanding: Vec<String>,
}

impl<'a> ElementTreeBuilder<'a> {
    pub fn new(parsed: &'a ParsedJSX, file_path: &'a str) -> Self {
        let mut scan = JsxScanner::default();
        parsed.module.visit_with(&mut scan);
        Self {
            parsed,
            file_path,
            scan,
            tree: ElementTree::new(),
            expanding: Vec::new(),
        }
    }

    /// Build the tree.
    ///
    /// With `root_element`, that binding is the only root and must exist.
    /// Otherwise every outermost JSX expression is a root, in document order,
    /// except bindings that are inlined elsewhere.
    pub fn build(mut self, root_element: Option<&str>) -> Result<ElementTree> {
        let roots = match root_element {
            Some(name) => {
                let expr = self.scan.bindings.get(name).cloned().ok_or_else(|| {
                    anyhow!(
                        "Root element `{}` is not a JSX binding in {}",
                        name,
                        self.file_path
                    )
                })?;
                self.expanding.push(name.to_string());
                vec![expr]
            }
            None => {
                let inlined: HashSet<Span> = self
                    .scan
                    .referenced
                    .iter()
                    .filter_map(|name| self.scan.bindings.get(name))
                    .map(|expr| expr.span())
                    .collect();
                std::mem::take(&mut self.scan.candidates)
                    .into_iter()
                    .filter(|expr| !inlined.contains(&expr.span()))
                    .collect()
            }
        };

        for expr in roots {
            if let Some(id) = self.build_expr(&expr) {
                self.tree.add_root(id);
            }
        }
        Ok(self.tree)
    }

    fn build_expr(&mut self, expr: &Expr) -> Option<NodeId> {
        match unwrap_ts_expr(expr) {
            Expr::JSXElement(element) => Some(self.build_element(element)),
            Expr::JSXFragment(fragment) => Some(self.build_fragment(fragment)),
            Expr::Ident(ident) => self.build_binding(ident.sym.as_str()),
            _ => None,
        }
    }

    fn build_binding(&mut self, name: &str) -> Option<NodeId> {
        if self.expanding.iter().any(|expanding| expanding == name) {
            return None;
        }
        let expr = self.scan.bindings.get(name).cloned()?;
        self.expanding.push(name.to_string());
        let id = self.build_expr(&expr);
        self.expanding.pop();
        id
    }

    fn build_element(&mut self, element: &JSXElement) -> NodeId {
        let name = jsx_element_name(&element.opening.name);
        let element_type = if FRAGMENT_NAMES.contains(&name.as_str()) {
            ElementType::Fragment
        } else {
            ElementType::Component(name)
        };

        let mut node = ElementNode::new(element_type);
        for attr in &element.opening.attrs {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                continue;
            };
            let value = match &attr.value {
                None => PropValue::Bool(true),
                Some(JSXAttrValue::Str(s)) => PropValue::Str(s.value.to_string_lossy().to_string()),
                Some(JSXAttrValue::JSXExprContainer(container)) => match &container.expr {
                    JSXExpr::Expr(expr) => self.prop_value(expr),
                    JSXExpr::JSXEmptyExpr(_) => PropValue::Other,
                },
                Some(JSXAttrValue::JSXElement(element)) => {
                    PropValue::Element(self.build_element(element))
                }
                Some(JSXAttrValue::JSXFragment(fragment)) => {
                    PropValue::Element(self.build_fragment(fragment))
                }
            };
            node.props.insert(jsx_attr_name(&attr.name), value);
        }

        node.children = self.build_children(&element.children);
        let location = self.parsed.location(self.file_path, element.opening.span.lo);
        self.tree.add_node(node.with_location(location))
    }

    fn build_fragment(&mut self, fragment: &JSXFragment) -> NodeId {
        let children = self.build_children(&fragment.children);
        let location = self.parsed.location(self.file_path, fragment.opening.span.lo);
        self.tree.add_node(
            ElementNode::fragment()
                .with_children(children)
                .with_location(location),
        )
    }

    fn build_children(&mut self, children: &[JSXElementChild]) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for child in children {
            match child {
                JSXElementChild::JSXElement(element) => ids.push(self.build_element(element)),
                JSXElementChild::JSXFragment(fragment) => ids.push(self.build_fragment(fragment)),
                JSXElementChild::JSXExprContainer(container) => {
                    if let JSXExpr::Expr(expr) = &container.expr {
                        let mut inline = Vec::new();
                        for_each_inline_expr(expr, &mut |inner| inline.push(inner));
                        ids.extend(inline.into_iter().filter_map(|inner| self.build_expr(inner)));
                    }
                }
                JSXElementChild::JSXText(_) | JSXElementChild::JSXSpreadChild(_) => {}
            }
        }
        ids
    }

    fn prop_value(&mut self, expr: &Expr) -> PropValue {
        if let Some(s) = static_string(expr) {
            return PropValue::Str(s);
        }
        match unwrap_ts_expr(expr) {
            Expr::Lit(Lit::Bool(b)) => PropValue::Bool(b.value),
            Expr::Lit(Lit::Null(_)) => PropValue::Other,
            Expr::Lit(Lit::Num(n)) if n.value == 0.0 => PropValue::Other,
            Expr::Ident(ident) if ident.sym.as_str() == "undefined" => PropValue::Other,
            Expr::Unary(unary) if unary.op == UnaryOp::Void => PropValue::Other,
            inner @ (Expr::JSXElement(_) | Expr::JSXFragment(_)) => self
                .build_expr(inner)
                .map_or(PropValue::Other, PropValue::Element),
            inner @ Expr::Ident(_) => match self.build_expr(inner) {
                Some(id) => PropValue::Element(id),
                None => self.runtime_value(expr),
            },
            _ => self.runtime_value(expr),
        }
    }

    /// A value only known at runtime, kept as its source text in braces.
    fn runtime_value(&self, expr: &Expr) -> PropValue {
        self.parsed
            .source_map
            .span_to_snippet(expr.span())
            .map_or(PropValue::Other, |snippet| PropValue::Expr(format!("{{{}}}", snippet)))
    }
}

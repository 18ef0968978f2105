//! Registry collection: route refs, routable extensions and renamed imports.
//!
//! One `RegistryCollector` visits one file. Only simple `const name = ...`
//! bindings are recorded, at any scope.

use swc_common::{BytePos, SourceMap, Span};
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Expr, Function, ImportDecl, ImportSpecifier, ModuleExportName,
    VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::{
    collect::types::{ImportAlias, ROUTE_REF_FACTORIES, RoutableExtensionDecl, RouteRefDecl},
    tree::SourceLocation,
    utils::{
        binding_ident, callee_name, first_object_arg, object_ident_prop, object_prop,
        static_string, unwrap_ts_expr,
    },
};

const ROUTABLE_EXTENSION_FACTORY: &str = "createRoutableExtension";

/// Collects declarations from a single file.
///
/// ```ignore
/// let mut collector = RegistryCollector::new("src/routes.ts", &parsed.source_map);
/// parsed.module.visit_with(&mut collector);
/// registries.add_file("src/routes.ts", collector);
/// ```
pub struct RegistryCollector<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    pub route_refs: Vec<RouteRefDecl>,
    pub extensions: Vec<RoutableExtensionDecl>,
    pub import_aliases: Vec<ImportAlias>,
}

impl<'a> RegistryCollector<'a> {
    pub fn new(file_path: &'a str, source_map: &'a SourceMap) -> Self {
        Self {
            file_path,
            source_map,
            route_refs: Vec::new(),
            extensions: Vec::new(),
            import_aliases: Vec::new(),
        }
    }

    fn location(&self, pos: BytePos) -> SourceLocation {
        let loc = self.source_map.lookup_char_pos(pos);
        SourceLocation::new(self.file_path, loc.line, loc.col_display + 1)
    }

    fn route_ref_decl(
        &self,
        binding: &str,
        call: &CallExpr,
        span: Span,
    ) -> RouteRefDecl {
        let options = first_object_arg(call);
        let string_prop = |name: &str| {
            options
                .and_then(|obj| object_prop(obj, name))
                .and_then(static_string)
        };
        RouteRefDecl {
            binding: binding.to_string(),
            id: string_prop("id").unwrap_or_else(|| binding.to_string()),
            title: string_prop("title"),
            location: self.location(span.lo),
        }
    }
}

impl Visit for RegistryCollector<'_> {
    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        let (Some(binding), Some(init)) = (binding_ident(&node.name), node.init.as_deref()) else {
            node.visit_children_with(self);
            return;
        };

        if let Expr::Call(call) = unwrap_ts_expr(init) {
            if callee_name(call).is_some_and(|name| ROUTE_REF_FACTORIES.contains(&name)) {
                let decl = self.route_ref_decl(binding, call, node.span);
                self.route_refs.push(decl);
                return;
            }
        }

        let mut finder = ExtensionFinder::default();
        init.visit_with(&mut finder);
        if let Some(found) = finder.found {
            self.extensions.push(RoutableExtensionDecl {
                component: binding.to_string(),
                mount_point: found.mount_point,
                location: self.location(node.span.lo),
            });
            return;
        }

        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        for specifier in &node.specifiers {
            let ImportSpecifier::Named(named) = specifier else {
                continue;
            };
            let imported = match &named.imported {
                Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                Some(ModuleExportName::Str(s)) => s.value.to_string_lossy().to_string(),
                None => continue,
            };
            let local = named.local.sym.to_string();
            if local != imported {
                self.import_aliases.push(ImportAlias { local, imported });
            }
        }
    }
}

struct FoundExtension {
    mount_point: Option<String>,
}

/// Finds the first `createRoutableExtension(...)` call inside an initializer.
/// Function bodies belong to their own declarations and are not searched.
#[derive(Default)]
struct ExtensionFinder {
    found: Option<FoundExtension>,
}

impl Visit for ExtensionFinder {
    fn visit_arrow_expr(&mut self, _node: &ArrowExpr) {}

    fn visit_function(&mut self, _node: &Function) {}

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.found.is_some() {
            return;
        }
        if callee_name(node) == Some(ROUTABLE_EXTENSION_FACTORY) {
            self.found = Some(FoundExtension {
                mount_point: first_object_arg(node)
                    .and_then(|obj| object_ident_prop(obj, "mountPoint")),
            });
            return;
        }
        node.visit_children_with(self);
    }
}

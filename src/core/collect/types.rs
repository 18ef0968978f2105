//! Declarations found during collection and the registries they merge into.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    core::{metadata::ComponentDataTable, route_ref::RouteRef, tree::SourceLocation},
    issues::{DuplicateRouteRefIssue, Issue, UnresolvedMountPointIssue},
};

use super::registry::RegistryCollector;

/// Mount point text reported for a `mountPoint` that is not a plain identifier.
pub const NON_IDENT_MOUNT_POINT: &str = "<expression>";

/// Functions whose call result is recorded as a route ref declaration.
pub const ROUTE_REF_FACTORIES: &[&str] =
    &["createRouteRef", "createExternalRouteRef", "createSubRouteRef"];

/// `const catalogRouteRef = createRouteRef({ id: 'catalog' })`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRefDecl {
    /// Variable the route ref is bound to.
    pub binding: String,
    /// The `id` property, or the binding name when there is none.
    pub id: String,
    pub title: Option<String>,
    pub location: SourceLocation,
}

/// `const CatalogPage = plugin.provide(createRoutableExtension({ mountPoint: catalogRouteRef }))`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutableExtensionDecl {
    /// Variable the extension component is bound to.
    pub component: String,
    /// Binding named by `mountPoint`, `None` when it is not an identifier.
    pub mount_point: Option<String>,
    pub location: SourceLocation,
}

/// `import { imported as local } from '...'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias {
    pub local: String,
    pub imported: String,
}

/// Declarations from all scanned files, merged in file order.
#[derive(Debug, Default)]
pub struct Registries {
    /// Route ref declarations keyed by binding name.
    pub route_refs: IndexMap<String, RouteRefDecl>,
    /// Routable extensions keyed by component name.
    pub extensions: IndexMap<String, RoutableExtensionDecl>,
    /// Renamed imports per file.
    pub import_aliases: HashMap<String, Vec<ImportAlias>>,
    /// Warnings raised while merging.
    pub issues: Vec<Issue>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's collection results. Call in sorted file order so the
    /// first declaration of a duplicated binding is stable.
    pub fn add_file(&mut self, file_path: &str, collector: RegistryCollector<'_>) {
        for decl in collector.route_refs {
            match self.route_refs.get(&decl.binding) {
                Some(first) => self.issues.push(Issue::DuplicateRouteRef(DuplicateRouteRefIssue {
                    binding: decl.binding.clone(),
                    location: decl.location.clone(),
                    first_location: first.location.clone(),
                })),
                None => {
                    self.route_refs.insert(decl.binding.clone(), decl);
                }
            }
        }

        for decl in collector.extensions {
            self.extensions.entry(decl.component.clone()).or_insert(decl);
        }

        if !collector.import_aliases.is_empty() {
            self.import_aliases
                .entry(file_path.to_string())
                .or_default()
                .extend(collector.import_aliases);
        }
    }

    /// Build the component metadata table.
    ///
    /// Each route ref declaration becomes one `RouteRef`, shared by every
    /// extension that mounts it. `overrides` maps component names to route
    /// ref ids and wins over scanned extensions. Renamed imports in
    /// `entry_file` make the local name carry the imported component's data.
    pub fn component_data(
        &self,
        overrides: &IndexMap<String, String>,
        entry_file: Option<&str>,
    ) -> (ComponentDataTable, Vec<Issue>) {
        let minted: IndexMap<&str, RouteRef> = self
            .route_refs
            .iter()
            .map(|(binding, decl)| {
                let route_ref = match &decl.title {
                    Some(title) => RouteRef::with_title(decl.id.clone(), title.clone()),
                    None => RouteRef::new(decl.id.clone()),
                };
                (binding.as_str(), route_ref)
            })
            .collect();

        let mut table = ComponentDataTable::new();
        let mut issues = Vec::new();

        for (component, decl) in &self.extensions {
            if overrides.contains_key(component) {
                continue;
            }
            let route_ref = decl
                .mount_point
                .as_deref()
                .and_then(|binding| minted.get(binding));
            match route_ref {
                Some(route_ref) => table.attach_mount_point(component.clone(), route_ref.clone()),
                None => issues.push(Issue::UnresolvedMountPoint(UnresolvedMountPointIssue {
                    component: component.clone(),
                    mount_point: decl
                        .mount_point
                        .clone()
                        .unwrap_or_else(|| NON_IDENT_MOUNT_POINT.to_string()),
                    location: decl.location.clone(),
                })),
            }
        }

        let mut by_id: HashMap<String, RouteRef> = minted
            .values()
            .rev()
            .map(|route_ref| (route_ref.id().to_string(), route_ref.clone()))
            .collect();
        for (component, id) in overrides {
            let route_ref = by_id
                .entry(id.clone())
                .or_insert_with(|| RouteRef::new(id.clone()))
                .clone();
            table.attach_mount_point(component.clone(), route_ref);
        }

        if let Some(aliases) = entry_file.and_then(|file| self.import_aliases.get(file)) {
            for alias in aliases {
                table.alias(&alias.local, &alias.imported);
            }
        }

        (table, issues)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::issues::Report;

    fn route_ref(binding: &str, id: &str, file: &str, line: usize) -> RouteRefDecl {
        RouteRefDecl {
            binding: binding.to_string(),
            id: id.to_string(),
            title: None,
            location: SourceLocation::new(file, line, 14),
        }
    }

    fn extension(component: &str, mount_point: Option<&str>) -> RoutableExtensionDecl {
        RoutableExtensionDecl {
            component: component.to_string(),
            mount_point: mount_point.map(String::from),
            location: SourceLocation::new("plugin.ts", 10, 14),
        }
    }

    fn registries() -> Registries {
        let mut registries = Registries::new();
        for decl in [
            route_ref("catalogRouteRef", "catalog", "catalog/routes.ts", 3),
            route_ref("docsRouteRef", "techdocs", "docs/routes.ts", 3),
        ] {
            registries.route_refs.insert(decl.binding.clone(), decl);
        }
        for decl in [
            extension("CatalogIndexPage", Some("catalogRouteRef")),
            extension("CatalogSearchPage", Some("catalogRouteRef")),
            extension("TechDocsPage", Some("docsRouteRef")),
        ] {
            registries.extensions.insert(decl.component.clone(), decl);
        }
        registries
    }

    #[test]
    fn test_extensions_share_one_route_ref() {
        let (table, issues) = registries().component_data(&IndexMap::new(), None);

        assert!(issues.is_empty());
        let index = table.mount_point("CatalogIndexPage").unwrap();
        let search = table.mount_point("CatalogSearchPage").unwrap();
        assert_eq!(index, search);
        assert_eq!(index.id(), "catalog");
        assert_eq!(table.mount_point("TechDocsPage").unwrap().id(), "techdocs");
    }

    #[test]
    fn test_unresolved_mount_points_warn() {
        let mut registries = registries();
        for decl in [extension("Orphan", Some("missingRef")), extension("Dynamic", None)] {
            registries.extensions.insert(decl.component.clone(), decl);
        }

        let (table, issues) = registries.component_data(&IndexMap::new(), None);

        assert!(table.mount_point("Orphan").is_none());
        let messages: Vec<String> = issues.iter().map(|issue| issue.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Orphan mounts unknown route ref `missingRef`",
                "Dynamic mounts unknown route ref `<expression>`",
            ]
        );
    }

    #[test]
    fn test_overrides_reuse_or_mint_route_refs() {
        let mut registries = registries();
        let orphan = extension("Orphan", Some("missingRef"));
        registries.extensions.insert(orphan.component.clone(), orphan);
        let overrides: IndexMap<String, String> = [
            ("Orphan", "catalog"),
            ("TechDocsPage", "docs.v2"),
            ("LegacyPage", "legacy"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let (table, issues) = registries.component_data(&overrides, None);

        assert!(issues.is_empty());
        assert_eq!(
            table.mount_point("Orphan"),
            table.mount_point("CatalogIndexPage")
        );
        assert_eq!(table.mount_point("TechDocsPage").unwrap().id(), "docs.v2");
        assert_eq!(table.mount_point("LegacyPage").unwrap().id(), "legacy");
    }

    #[test]
    fn test_entry_import_aliases() {
        let mut registries = registries();
        registries.import_aliases.insert(
            "src/App.tsx".to_string(),
            vec![ImportAlias {
                local: "Catalog".to_string(),
                imported: "CatalogIndexPage".to_string(),
            }],
        );

        let (table, _) = registries.component_data(&IndexMap::new(), Some("src/other.tsx"));
        assert!(table.mount_point("Catalog").is_none());

        let (table, _) = registries.component_data(&IndexMap::new(), Some("src/App.tsx"));
        assert_eq!(table.mount_point("Catalog").unwrap().id(), "catalog");
    }
}

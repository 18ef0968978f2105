use std::{
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;
use swc_ecma_visit::VisitWith;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        collect::{Registries, RegistryCollector},
        extract::ElementTreeBuilder,
        file_scanner::scan_files,
        metadata::ComponentDataTable,
        parsers::jsx::{ParsedJSX, parse_jsx_source},
        routes::{RouteTable, build_route_table},
        tree::ElementTree,
    },
    issues::{Issue, ParseErrorIssue},
};

/// Path as shown to users: `./src/App.tsx` becomes `src/App.tsx`.
pub fn display_path(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

fn read_and_parse(file_path: &str) -> Result<ParsedJSX> {
    let code = std::fs::read_to_string(file_path)
        .map_err(|e| anyhow!("Failed to read {}: {}", display_path(file_path), e))?;
    parse_jsx_source(code, display_path(file_path), Arc::new(SourceMap::default()))
}

/// Everything one `routes` run works on.
///
/// Configuration and the file list are resolved up front. Parsing,
/// registry collection and the component metadata table are computed on
/// first access and cached.
pub struct RouteContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,
    pub root_dir: PathBuf,
    /// Scanned source files, sorted.
    pub files: BTreeSet<String>,
    pub verbose: bool,

    parsed_files: OnceCell<BTreeMap<String, ParsedJSX>>,
    parse_errors: OnceCell<Vec<ParseErrorIssue>>,
    registries: OnceCell<Registries>,
    component_data: OnceCell<(ComponentDataTable, Vec<Issue>)>,
}

impl RouteContext {
    /// Load the config found from `--source-root` (default `.`), apply CLI
    /// overrides and scan the source files.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No .routemaprc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref entry) = common_args.entry {
            config.entry = entry.clone();
        }

        let scan_result = scan_files(
            path,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
            verbose,
        );
        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
            parsed_files: OnceCell::new(),
            parse_errors: OnceCell::new(),
            registries: OnceCell::new(),
            component_data: OnceCell::new(),
        })
    }

    /// Path of the entry file, in the same form as the scanned paths.
    pub fn entry_path(&self) -> String {
        let entry = Path::new(&self.config.entry);
        if entry.is_absolute() {
            return self.config.entry.clone();
        }
        let rel = entry.strip_prefix(".").unwrap_or(entry);
        self.root_dir.join(rel).to_string_lossy().into_owned()
    }

    /// Parsed AST of every scanned file, read and parsed in parallel.
    /// Files that fail are left out and reported by `parse_errors()`, which
    /// the CLI prints in full only under `--verbose`.
    pub fn parsed_files(&self) -> &BTreeMap<String, ParsedJSX> {
        self.parsed_files.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| (file_path.clone(), read_and_parse(file_path)))
                .collect();

            let mut parsed = BTreeMap::new();
            let mut errors = Vec::new();
            for (file_path, result) in results {
                match result {
                    Ok(p) => {
                        parsed.insert(file_path, p);
                    }
                    Err(e) => {
                        errors.push(ParseErrorIssue {
                            file_path: display_path(&file_path).to_string(),
                            error: e.to_string(),
                        });
                    }
                }
            }

            let _ = self.parse_errors.set(errors);
            parsed
        })
    }

    pub fn parse_errors(&self) -> &Vec<ParseErrorIssue> {
        self.parsed_files();
        self.parse_errors.get_or_init(Vec::new)
    }

    /// Route refs and routable extensions from all parsed files.
    pub fn registries(&self) -> &Registries {
        self.registries.get_or_init(|| {
            let collected: Vec<_> = self
                .parsed_files()
                .par_iter()
                .map(|(file_path, parsed)| {
                    let display = display_path(file_path);
                    let mut collector = RegistryCollector::new(display, &parsed.source_map);
                    parsed.module.visit_with(&mut collector);
                    (display, collector)
                })
                .collect();

            let mut registries = Registries::new();
            for (file_path, collector) in collected {
                registries.add_file(file_path, collector);
            }
            registries
        })
    }

    /// Component metadata table, plus warnings for mount points that did not resolve.
    pub fn component_data(&self) -> &(ComponentDataTable, Vec<Issue>) {
        self.component_data.get_or_init(|| {
            let entry = self.entry_path();
            self.registries()
                .component_data(&self.config.mount_points, Some(display_path(&entry)))
        })
    }

    /// Element tree of the entry file. Failing to read or parse the entry is fatal.
    pub fn element_tree(&self) -> Result<ElementTree> {
        let entry = self.entry_path();
        let display = display_path(&entry);

        let owned;
        let parsed = match self.parsed_files().get(&entry) {
            Some(parsed) => parsed,
            None => {
                owned = read_and_parse(&entry)
                    .with_context(|| format!("Cannot load entry file {}", display))?;
                &owned
            }
        };

        ElementTreeBuilder::new(parsed, display).build(self.config.root_element.as_deref())
    }

    /// Route table of the entry file's element tree.
    ///
    /// A misconfigured mount point is returned as a `RouteConfigError`
    /// inside the `anyhow::Error`, so callers can tell it apart with
    /// `downcast_ref`.
    pub fn route_table(&self) -> Result<RouteTable> {
        let tree = self.element_tree()?;
        let (table, _) = self.component_data();
        Ok(build_route_table(&tree, table)?)
    }

    /// Warnings raised while scanning: parse errors, duplicate route refs
    /// and unresolved mount points.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .parse_errors()
            .iter()
            .cloned()
            .map(Issue::ParseError)
            .collect();
        issues.extend(self.registries().issues.iter().cloned());
        issues.extend(self.component_data().1.iter().cloned());
        issues
    }
}

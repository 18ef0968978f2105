use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Patterns without `*` or `?` are literal paths, so `app/[id]` needs no escaping.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn warn(verbose: bool, message: impl std::fmt::Display) {
    if verbose {
        eprintln!("{} {}", "warning:".bold().yellow(), message);
    }
}

/// Source files found under the include directories, sorted by path.
pub struct ScanResult {
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

/// Paths excluded from a scan: literal prefixes and glob patterns.
struct IgnoreRules {
    prefixes: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool, verbose: bool) -> Self {
        let mut prefixes = Vec::new();
        let mut patterns = Vec::new();

        for ignore in ignores {
            if !is_glob_pattern(ignore) {
                prefixes.push(base_dir.join(ignore));
                continue;
            }
            match Pattern::new(ignore) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => warn(verbose, format!("Invalid ignore pattern '{}': {}", ignore, e)),
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self { prefixes, patterns }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk. An empty include list walks `base_dir` itself.
fn include_dirs(base_dir: &Path, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut dirs = Vec::new();
    for include in includes {
        let full = base_dir.join(include);
        if !is_glob_pattern(include) {
            if full.exists() {
                dirs.push(full);
            } else {
                warn(verbose, format!("Include path does not exist: {}", full.display()));
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => dirs.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => warn(verbose, format!("Invalid glob pattern '{}': {}", include, e)),
        }
    }
    dirs
}

/// Collect TS/TSX/JS/JSX files under `base_dir`.
///
/// Paths that cannot be read are counted in `skipped_count` and reported
/// only in verbose mode.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ScanResult {
    let base = Path::new(base_dir);
    let rules = IgnoreRules::new(base, ignores, ignore_test_files, verbose);

    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for dir in include_dirs(base, includes, verbose) {
        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|entry| !rules.is_ignored(entry.path()));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    skipped_count += 1;
                    warn(verbose, format!("Cannot access path: {}", e));
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_source_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}

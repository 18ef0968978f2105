use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".routemaprc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Source file holding the app's route elements, relative to the source root.
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Name of the binding in `entry` that holds the root element. When unset,
    /// every top-level JSX expression of the entry file is a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_element: Option<String>,
    /// Component name to route ref id, for extensions the scanner cannot see.
    #[serde(default)]
    pub mount_points: IndexMap<String, String>,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**"].map(String::from).to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_entry() -> String {
    "src/App.tsx".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            entry: default_entry(),
            root_element: None,
            mount_points: IndexMap::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Fails on invalid glob patterns in `ignores` or `includes` and on an empty `entry`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.entry.trim().is_empty() {
            bail!("'entry' must not be empty");
        }

        if let Some((component, _)) = self
            .mount_points
            .iter()
            .find(|(component, id)| component.is_empty() || id.is_empty())
        {
            bail!(
                "Invalid 'mountPoints' entry for \"{}\": component and route ref id must not be empty",
                component
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Look for the config file from `start_dir` upwards, stopping at the repository root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() || !current.pop() {
            return None;
        }
    }
}

pub struct ConfigLoadResult {
    pub config: Config,
    /// False when no config file was found and defaults are used.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}

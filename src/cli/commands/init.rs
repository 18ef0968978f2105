use std::{fs, path::Path};

use anyhow::{Result, bail};

use super::{CommandKind, CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config to `dir`. Fails if the file already exists.
pub fn init_in(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)?;
    Ok(CommandResult {
        kind: CommandKind::Init,
        summary: CommandSummary::Init(InitSummary { created: true }),
        error_count: 0,
        warning_count: 0,
        issues: Vec::new(),
        parse_error_count: 0,
        source_files_checked: 0,
    })
}

pub fn init() -> Result<CommandResult> {
    init_in(Path::new("."))
}

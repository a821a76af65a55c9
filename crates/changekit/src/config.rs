use std::path::Path;

use changekit_core::ChangesetConfig;
use changekit_operations::providers::CHANGESET_DIR;

use crate::error::{CliError, Result};

const CONFIG_FILE: &str = "config.toml";

/// Loads `.changeset/config.toml` from the project root. A missing file
/// yields the defaults; a malformed one is an error.
pub fn load_config(project_root: &Path) -> Result<ChangesetConfig> {
    let path = project_root.join(CHANGESET_DIR).join(CONFIG_FILE);

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ChangesetConfig::default());
        }
        Err(e) => return Err(CliError::Io(e)),
    };

    toml::from_str(&contents).map_err(|source| CliError::ConfigParse { path, source })
}

// src/infra/paths.rs — Config path resolution
//
// PROPHET_HOME overrides everything. Otherwise the platform config dir is used
// (~/.config/prophet on Linux).

use directories::ProjectDirs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "PROPHET_HOME";

/// Returns the PROPHET_HOME override, if set.
fn prophet_home() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Configuration directory, or `None` when no home directory can be determined.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = prophet_home() {
        return Some(home);
    }
    ProjectDirs::from("", "", "prophet").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of config.toml inside the config directory.
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

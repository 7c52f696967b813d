use std::path::PathBuf;

/// XDG app name used for config and state directories.
pub const APP_NAME: &str = "aurum-autopost";

/// Override variable for the state directory, used by tests and by
/// deployments that keep state next to the assets checkout.
pub const STATE_DIR_ENV: &str = "AURUM_STATE_DIR";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Config directory holding `config.toml` and `catalog.toml`.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// State directory holding the rotation state file and its lock.
///
/// `AURUM_STATE_DIR` wins over the XDG location when set.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(STATE_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    project_dirs()
        .map(|dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_local_dir())
                .to_path_buf()
        })
        .unwrap_or_else(state_dir_fallback)
}

pub fn state_dir_fallback() -> PathBuf {
    std::env::temp_dir().join(format!("{APP_NAME}-state"))
}

/// Default path of the rotation state file.
pub fn state_file() -> PathBuf {
    state_dir().join("rotation.toml")
}

/// Default path of the settings file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Default path of the catalog override file.
pub fn catalog_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("catalog.toml"))
}

//! Default paths for coursegate tooling
//!
//! The catalog lives in the user's config directory by default:
//! `$XDG_CONFIG_HOME/coursegate/catalog.toml` or `~/.config/coursegate/catalog.toml`.

use std::path::PathBuf;

/// Environment variable for overriding the catalog path
pub const COURSEGATE_CATALOG_ENV: &str = "COURSEGATE_CATALOG";

/// Catalog filename within the config directory
const CATALOG_FILENAME: &str = "catalog.toml";

/// Application subdirectory name
const APP_DIR: &str = "coursegate";

/// Get the default catalog path.
///
/// Order of precedence:
/// 1. `$COURSEGATE_CATALOG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/coursegate/catalog.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/coursegate/catalog.toml` (fallback)
pub fn default_catalog_path() -> PathBuf {
    if let Ok(path) = std::env::var(COURSEGATE_CATALOG_ENV) {
        return PathBuf::from(path);
    }

    config_dir().join(CATALOG_FILENAME)
}

/// Get the config directory without checking any override.
pub fn config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_contains_app_dir() {
        let path = config_dir();
        assert!(path.to_string_lossy().contains("coursegate"));
    }

    #[test]
    fn catalog_path_is_toml() {
        let path = config_dir().join(CATALOG_FILENAME);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));
    }

    #[test]
    fn catalog_path_follows_override() {
        let expected = match std::env::var_os(COURSEGATE_CATALOG_ENV) {
            Some(path) => PathBuf::from(path),
            None => config_dir().join(CATALOG_FILENAME),
        };
        assert_eq!(default_catalog_path(), expected);
    }
}

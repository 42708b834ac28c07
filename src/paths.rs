//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\PrefabCatalog\`
//! - macOS: `~/Library/Application Support/PrefabCatalog/`
//! - Linux: `~/.config/prefab-catalog/` (config), `~/.local/share/prefab-catalog/` (data)

use std::path::{Path, PathBuf};

/// Folder inside a project that holds its assets.
pub const ASSETS_FOLDER: &str = "Assets";

/// Folder inside `Assets/` where bootstrap materializes the catalog's own files.
pub const WORKSPACE_FOLDER: &str = "PrefabCatalog";

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/prefab-catalog/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("prefab-catalog"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
///
/// - Dev mode: current directory
/// - Windows: `%APPDATA%\PrefabCatalog\`
/// - macOS: `~/Library/Application Support/PrefabCatalog/`
/// - Linux: `~/.local/share/prefab-catalog/`
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::data_dir().map(|p| p.join("prefab-catalog"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        dirs::data_dir().map(|p| p.join("PrefabCatalog"))
    }
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Project opened when the config does not name one.
///
/// - Dev mode: `./project/`
/// - Installed: `{data_dir}/project/`
pub fn default_project_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("project"))
        .unwrap_or_else(|| PathBuf::from("project"))
}

/// Resources that ship with the binary and get copied into the workspace.
///
/// - Dev mode: `./assets/resources/`
/// - Installed: `{exe_dir}/assets/resources/`
pub fn bundled_resources_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("assets").join("resources");
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.join("assets").join("resources")))
        .unwrap_or_else(|| PathBuf::from("assets").join("resources"))
}

/// `<project>/Assets`, the root the asset store catalogs.
pub fn assets_root(project: &Path) -> PathBuf {
    project.join(ASSETS_FOLDER)
}

/// `<project>/Assets/PrefabCatalog`, the bootstrap workspace.
pub fn workspace_dir(project: &Path) -> PathBuf {
    assets_root(project).join(WORKSPACE_FOLDER)
}

/// Ensure all required directories exist.
///
/// Called early in startup to create config and data directories.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        // In dev mode, directories are local and typically exist
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(&data)?;
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_not_none() {
        // In test mode (debug), should return Some
        assert!(config_dir().is_some());
    }

    #[test]
    fn test_config_file_has_json_extension() {
        let path = config_file();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_dev_mode_returns_local_paths() {
        // In tests, is_dev_mode() should be true due to debug_assertions
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(data_dir(), Some(PathBuf::from(".")));
        assert_eq!(default_project_dir(), PathBuf::from("./project"));
        assert_eq!(
            bundled_resources_dir(),
            PathBuf::from("assets").join("resources")
        );
    }

    #[test]
    fn test_workspace_is_inside_assets_root() {
        let project = Path::new("/projects/demo");
        assert_eq!(assets_root(project), PathBuf::from("/projects/demo/Assets"));
        assert_eq!(
            workspace_dir(project),
            PathBuf::from("/projects/demo/Assets/PrefabCatalog")
        );
    }
}

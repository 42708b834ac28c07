use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{MatchCase, SortOrder};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    /// Project whose `Assets/` folder is cataloged (falls back to the default project dir)
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// Last sort order chosen in the catalog panel
    #[serde(default)]
    pub sort_order: SortOrder,

    /// Whether searching ignores case (case-sensitive by default)
    #[serde(default)]
    pub match_case: MatchCase,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

impl AppConfig {
    /// Project root to work in.
    pub fn project_root(&self) -> PathBuf {
        self.data
            .project_root
            .clone()
            .unwrap_or_else(crate::paths::default_project_dir)
    }
}

/// Resource for the "project folder missing" warning dialog
#[derive(Resource, Default)]
pub struct MissingProjectWarning {
    pub show: bool,
    pub path: Option<PathBuf>,
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to remember the sort order chosen in the catalog panel
#[derive(Message)]
pub struct UpdateSortOrderRequest {
    pub order: SortOrder,
}

/// Message to remember the search case mode chosen in the catalog panel
#[derive(Message)]
pub struct UpdateMatchCaseRequest {
    pub match_case: MatchCase,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config JSON, describing why it was rejected on failure.
fn parse_config(json: &str) -> Result<AppConfigData, String> {
    serde_json::from_str(json).map_err(|e| format!("Configuration file was corrupted: {}", e))
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match parse_config(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(reason) => {
                    warn!("Failed to parse config file: {}", reason);
                    (AppConfigData::default(), Some(reason))
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to check that a configured project still exists
fn check_project_exists(config: Res<AppConfig>, mut warning: ResMut<MissingProjectWarning>) {
    if let Some(ref path) = config.data.project_root
        && !path.exists()
    {
        warning.show = true;
        warning.path = Some(path.clone());
        warn!("Configured project folder no longer exists: {:?}", path);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to remember the catalog sort order
fn update_sort_order_system(
    mut events: MessageReader<UpdateSortOrderRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.sort_order != event.order {
            config.data.sort_order = event.order;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

/// System to remember the search case mode
fn update_match_case_system(
    mut events: MessageReader<UpdateMatchCaseRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.match_case != event.match_case {
            config.data.match_case = event.match_case;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<MissingProjectWarning>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateSortOrderRequest>()
            .add_message::<UpdateMatchCaseRequest>()
            .add_systems(
                Startup,
                (load_config_system, check_project_exists)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    update_sort_order_system.run_if(on_message::<UpdateSortOrderRequest>),
                    update_match_case_system.run_if(on_message::<UpdateMatchCaseRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.project_root.is_none());
        assert_eq!(data.sort_order, SortOrder::LastModifiedDescending);
        assert_eq!(data.match_case, MatchCase::Sensitive);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            project_root: Some(PathBuf::from("/path/to/project")),
            sort_order: SortOrder::NameAscending,
            match_case: MatchCase::Insensitive,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.project_root, data.project_root);
        assert_eq!(parsed.sort_order, data.sort_order);
        assert_eq!(parsed.match_case, data.match_case);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed = parse_config("{}").unwrap();
        assert!(parsed.project_root.is_none());
        assert_eq!(parsed.sort_order, SortOrder::default());
    }

    #[test]
    fn test_corrupt_config_reports_reason() {
        let reason = parse_config("{ not json").unwrap_err();
        assert!(reason.starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_project_root_falls_back_to_default() {
        let config = AppConfig::default();
        assert_eq!(config.project_root(), crate::paths::default_project_dir());

        let config = AppConfig {
            data: AppConfigData {
                project_root: Some(PathBuf::from("/projects/demo")),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.project_root(), PathBuf::from("/projects/demo"));
    }

    #[test]
    fn test_missing_project_warning_default() {
        let warning = MissingProjectWarning::default();
        assert!(!warning.show);
        assert!(warning.path.is_none());
    }
}

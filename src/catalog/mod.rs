//! Prefab catalog: the filtered, sorted view over previewable prefabs.
//!
//! ## Module Structure
//!
//! - [`record`] - `AssetRecord`, one catalog entry
//! - [`error`] - `CatalogError` taxonomy
//! - [`store`] - `AssetStore` trait, delete confirmation, naming rules
//! - [`fs_store`] - Filesystem store over a project `Assets/` folder
//! - [`view_model`] - Search/sort state and projection
//! - [`controller`] - Command interface used by the catalog panel

mod controller;
mod error;
mod fs_store;
mod record;
mod store;
mod view_model;


pub use controller::{
    ActionOutcome, CatalogController, EntryAction, NameOutcome, NamePrompt, PromptPurpose,
};
pub use error::CatalogResult;
pub use fs_store::FsAssetStore;
pub use record::AssetRecord;
pub use view_model::{CatalogState, MatchCase, SortOrder};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::config::{AppConfig, ConfigLoaded};

/// The catalog controller over the project's asset store.
#[derive(Resource)]
pub struct Catalog(pub CatalogController<FsAssetStore>);

/// Last catalog error to show above the list.
#[derive(Resource, Default)]
pub struct CatalogStatus {
    pub error: Option<String>,
}

/// Message to re-fetch the catalog from the store
#[derive(Message)]
pub struct RefreshCatalog;

/// Message emitted when the selected prefab changes
#[derive(Message, Debug, Clone)]
pub struct SelectedPrefabChanged {
    pub path: Option<PathBuf>,
}

pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CatalogStatus>()
            .add_message::<RefreshCatalog>()
            .add_message::<SelectedPrefabChanged>()
            .add_systems(Startup, init_catalog_from_config.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    refresh_catalog_system.run_if(on_message::<RefreshCatalog>),
                    emit_selection_changes.run_if(resource_exists_and_changed::<Catalog>),
                )
                    .chain(),
            );
    }
}

/// Build the catalog over the configured project's `Assets/` folder.
fn init_catalog_from_config(mut commands: Commands, config: Res<AppConfig>) {
    let project = config.project_root();
    let assets_root = crate::paths::assets_root(&project);
    let state = CatalogState::new(config.data.sort_order, config.data.match_case);

    info!("Prefab catalog rooted at {:?}", assets_root);
    commands.insert_resource(Catalog(CatalogController::new(
        FsAssetStore::new(assets_root),
        state,
    )));
}

fn refresh_catalog_system(
    mut events: MessageReader<RefreshCatalog>,
    mut catalog: ResMut<Catalog>,
    mut status: ResMut<CatalogStatus>,
) {
    // Several requests in one frame collapse into a single rebuild
    events.clear();

    match catalog.0.refresh() {
        Ok(projection) => {
            info!("Refreshed prefab catalog: {} entries", projection.len());
            status.error = None;
        }
        Err(e) => {
            error!("Failed to refresh prefab catalog: {}", e);
            status.error = Some(e.to_string());
        }
    }
}

fn emit_selection_changes(
    catalog: Res<Catalog>,
    mut last_seen: Local<Option<PathBuf>>,
    mut selection_events: MessageWriter<SelectedPrefabChanged>,
) {
    let current = catalog.0.selected().map(|p| p.to_path_buf());
    if *last_seen != current {
        debug!("Selected prefab changed: {:?}", current);
        selection_events.write(SelectedPrefabChanged {
            path: current.clone(),
        });
        *last_seen = current;
    }
}

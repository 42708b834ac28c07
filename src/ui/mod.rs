mod catalog_panel;
mod helpers;
mod menu_bar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<catalog_panel::CatalogPanelState>()
            .init_resource::<catalog_panel::ThumbnailCache>()
            // Load previews before egui pass
            .add_systems(
                Update,
                (
                    catalog_panel::load_and_register_thumbnails,
                    catalog_panel::sync_preview_with_selection,
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Top panel first so windows fit below it
                    menu_bar::menu_bar_ui,
                    catalog_panel::catalog_panel_ui,
                    menu_bar::missing_project_warning_ui,
                    menu_bar::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}

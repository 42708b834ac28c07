//! Top menu bar and startup notices.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::bootstrap::{display_catalog, Bootstrap, CatalogWindow};
use crate::catalog::RefreshCatalog;
use crate::config::{AppConfig, ConfigResetNotification, MissingProjectWarning, SaveConfigRequest};

use super::helpers::truncate_start;

pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut window: ResMut<CatalogWindow>,
    bootstrap: Res<Bootstrap>,
    mut refresh_events: MessageWriter<RefreshCatalog>,
) -> Result {
    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("Window", |ui| {
                if ui.button("Prefab Catalog").clicked() {
                    display_catalog(&mut *window);
                    ui.close();
                }
            });

            ui.menu_button("Catalog", |ui| {
                if ui.button("Refresh").clicked() {
                    refresh_events.write(RefreshCatalog);
                    ui.close();
                }
            });

            if let Some(ref report) = bootstrap.last_report {
                let missing = report.failures().count();
                if missing > 0 {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let tooltip = report
                            .failures()
                            .map(|a| a.target.display().to_string())
                            .collect::<Vec<_>>()
                            .join("\n");
                        ui.colored_label(
                            egui::Color32::from_rgb(230, 160, 60),
                            format!("{} workspace files missing", missing),
                        )
                        .on_hover_text(tooltip);
                    });
                }
            }
        });
    });

    Ok(())
}

/// Dialog shown when the configured project folder is gone.
pub fn missing_project_warning_ui(
    mut contexts: EguiContexts,
    mut warning: ResMut<MissingProjectWarning>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !warning.show {
        return Ok(());
    }

    egui::Window::new("Project Not Found")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("The configured project folder no longer exists:");

            if let Some(ref path) = warning.path {
                ui.add_space(5.0);
                let path_str = path.to_string_lossy();
                ui.label(egui::RichText::new(truncate_start(&path_str, 50)).weak())
                    .on_hover_text(path_str.as_ref());
                ui.add_space(10.0);
            }

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    warning.show = false;
                }

                if ui.button("Use default project").clicked() {
                    config.data.project_root = None;
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                    warning.show = false;
                }
            });
        });

    Ok(())
}

/// Dialog telling the user their config file was replaced with defaults.
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be read and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).small().weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

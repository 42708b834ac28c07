//! Dialog windows for the catalog panel (name prompt, preview, errors).

use bevy::prelude::*;
use bevy_egui::egui;

use crate::catalog::{Catalog, NameOutcome, PromptPurpose, SelectedPrefabChanged};
use crate::constants::PREVIEW_WINDOW_MIN_SIZE;

use super::state::CatalogPanelState;
use super::thumbnails::ThumbnailCache;

/// Render the rename / name-the-copy prompt.
pub fn render_name_prompt_dialog(
    ctx: &egui::Context,
    panel: &mut CatalogPanelState,
    catalog: &mut Catalog,
) {
    let Some(prompt) = panel.name_prompt.clone() else {
        return;
    };

    let (title, label) = match prompt.purpose {
        PromptPurpose::Rename => ("Rename Prefab", "Enter new name:"),
        PromptPurpose::NameCopy => ("Name Copy", "Enter a name for the copy:"),
    };

    let mut submit = false;
    let mut cancel = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(label);
            ui.add_space(4.0);

            let response = ui.text_edit_singleline(&mut panel.name_input);
            if !response.has_focus() {
                response.request_focus();
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                cancel = true;
            }

            if let Some(ref error) = panel.name_error {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if !submit && !cancel {
        return;
    }

    let answer = submit.then(|| panel.name_input.clone());
    match catalog.0.submit_name(&prompt, answer.as_deref()) {
        NameOutcome::Renamed(new_path) => {
            // Keep an open preview pointed at the renamed entry
            if panel.preview.as_ref().is_some_and(|r| r.path == prompt.path) {
                panel.preview = catalog
                    .0
                    .projection()
                    .iter()
                    .find(|r| r.path == new_path)
                    .cloned();
            }
            panel.close_prompt();
        }
        NameOutcome::Unchanged => panel.close_prompt(),
        NameOutcome::Rejected(e) => {
            panel.name_error = Some(e.to_string());
        }
        NameOutcome::Failed(e) => {
            panel.close_prompt();
            panel.action_error = Some(e.to_string());
        }
    }
}

/// Render the enlarged preview of one entry.
pub fn render_preview_window(
    ctx: &egui::Context,
    panel: &mut CatalogPanelState,
    thumbnail_cache: &ThumbnailCache,
) {
    let Some(record) = panel.preview.clone() else {
        return;
    };

    let mut open = true;
    egui::Window::new(format!("Preview: {}", record.name))
        .id(egui::Id::new("prefab_preview_window"))
        .open(&mut open)
        .min_size([PREVIEW_WINDOW_MIN_SIZE, PREVIEW_WINDOW_MIN_SIZE])
        .show(ctx, |ui| {
            match thumbnail_cache.get_texture_id(&record.preview) {
                Some(texture_id) => {
                    let size = ui.available_size().max(egui::vec2(
                        PREVIEW_WINDOW_MIN_SIZE,
                        PREVIEW_WINDOW_MIN_SIZE,
                    ));
                    ui.add(
                        egui::Image::new(egui::load::SizedTexture::new(texture_id, size))
                            .max_size(size)
                            .maintain_aspect_ratio(true),
                    );
                }
                None if thumbnail_cache.has_failed(&record.preview) => {
                    ui.colored_label(egui::Color32::RED, "Preview image could not be loaded");
                }
                None => {
                    ui.spinner();
                }
            }
            ui.label(egui::RichText::new(record.path.display().to_string()).small().weak());
        });

    if !open {
        panel.preview = None;
    }
}

/// Keep the preview window on the selected entry while it is open.
pub fn sync_preview_with_selection(
    mut events: MessageReader<SelectedPrefabChanged>,
    catalog: Option<Res<Catalog>>,
    mut panel: ResMut<CatalogPanelState>,
) {
    let Some(catalog) = catalog else {
        events.clear();
        return;
    };
    if let Some(path) = events.read().filter_map(|e| e.path.as_deref()).last() {
        panel.follow_selection(path, catalog.0.projection());
    }
}

/// Render the failed-action dialog.
pub fn render_action_error_dialog(ctx: &egui::Context, panel: &mut CatalogPanelState) {
    let Some(error) = panel.action_error.clone() else {
        return;
    };

    egui::Window::new("Catalog Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.colored_label(egui::Color32::RED, error);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                panel.action_error = None;
            }
        });
}

//! Main catalog window UI.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::PathBuf;

use crate::bootstrap::CatalogWindow;
use crate::catalog::{
    ActionOutcome, AssetRecord, Catalog, CatalogResult, CatalogStatus, EntryAction, MatchCase,
    SortOrder,
};
use crate::config::{UpdateMatchCaseRequest, UpdateSortOrderRequest};
use crate::constants::{CATALOG_WINDOW_SIZE, THUMBNAIL_SIZE};
use crate::ui::helpers::truncate_start;

use super::dialogs::{
    render_action_error_dialog, render_name_prompt_dialog, render_preview_window,
};
use super::state::CatalogPanelState;
use super::thumbnails::ThumbnailCache;

const CATALOG_WINDOW_ID: &str = "prefab_catalog_window";

/// What the user asked for this frame; applied after the window is drawn.
enum PanelCommand {
    Search(String),
    Sort(SortOrder),
    MatchCase(MatchCase),
    Refresh,
    Select(PathBuf),
    Action(PathBuf, EntryAction),
}

/// Catalog window system.
#[allow(clippy::too_many_arguments)]
pub fn catalog_panel_ui(
    mut contexts: EguiContexts,
    catalog: Option<ResMut<Catalog>>,
    mut window: ResMut<CatalogWindow>,
    mut panel: ResMut<CatalogPanelState>,
    mut status: ResMut<CatalogStatus>,
    mut thumbnail_cache: ResMut<ThumbnailCache>,
    mut sort_events: MessageWriter<UpdateSortOrderRequest>,
    mut match_case_events: MessageWriter<UpdateMatchCaseRequest>,
) -> Result {
    let Some(mut catalog) = catalog else {
        return Ok(());
    };
    if !window.open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let window_id = egui::Id::new(CATALOG_WINDOW_ID);

    if window.focus_requested {
        ctx.move_to_top(egui::LayerId::new(egui::Order::Middle, window_id));
        window.focus_requested = false;
    }

    let mut commands = Vec::new();
    let mut open = true;

    egui::Window::new("Prefab Catalog")
        .id(window_id)
        .open(&mut open)
        .default_size(CATALOG_WINDOW_SIZE)
        .show(ctx, |ui| {
            render_toolbar(ui, &mut panel, &catalog, &mut commands);

            if let Some(ref error) = status.error {
                ui.colored_label(egui::Color32::RED, egui::RichText::new(error).small());
            }

            ui.separator();
            render_entry_list(ui, &catalog, &thumbnail_cache, &mut commands);
        });

    window.open = open;
    if !open {
        info!("Closed catalog window");
    }

    for command in commands {
        match command {
            PanelCommand::Search(term) => {
                report(&mut status, catalog.0.on_search_changed(&term).map(|_| ()));
            }
            PanelCommand::Sort(order) => {
                report(&mut status, catalog.0.on_sort_changed(order).map(|_| ()));
                sort_events.write(UpdateSortOrderRequest { order });
            }
            PanelCommand::MatchCase(match_case) => {
                report(
                    &mut status,
                    catalog.0.on_match_case_changed(match_case).map(|_| ()),
                );
                match_case_events.write(UpdateMatchCaseRequest { match_case });
            }
            PanelCommand::Refresh => {
                thumbnail_cache.clear();
                report(&mut status, catalog.0.refresh().map(|_| ()));
            }
            PanelCommand::Select(path) => {
                catalog.0.select(Some(&path));
            }
            PanelCommand::Action(path, action) => {
                match catalog.0.on_action(&path, action) {
                    ActionOutcome::ShowPreview(record) => panel.preview = Some(record),
                    ActionOutcome::PromptName(prompt) => {
                        // A prompt left unanswered counts as cancelled
                        if let Some(pending) = panel.name_prompt.take() {
                            catalog.0.submit_name(&pending, None);
                        }
                        panel.open_prompt(prompt);
                    }
                    ActionOutcome::Deleted(path) => {
                        if panel.preview.as_ref().is_some_and(|r| r.path == path) {
                            panel.preview = None;
                        }
                        status.error = None;
                    }
                    ActionOutcome::Declined => {}
                    ActionOutcome::Failed(e) => {
                        warn!("{:?} on {:?} failed: {}", action, path, e);
                        panel.action_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    render_name_prompt_dialog(ctx, &mut panel, &mut catalog);
    render_preview_window(ctx, &mut panel, &thumbnail_cache);
    render_action_error_dialog(ctx, &mut panel);

    Ok(())
}

fn report(status: &mut CatalogStatus, result: CatalogResult<()>) {
    match result {
        Ok(()) => status.error = None,
        Err(e) => {
            error!("Catalog update failed: {}", e);
            status.error = Some(e.to_string());
        }
    }
}

/// Search field, sort picker and refresh button.
fn render_toolbar(
    ui: &mut egui::Ui,
    panel: &mut CatalogPanelState,
    catalog: &Catalog,
    commands: &mut Vec<PanelCommand>,
) {
    let state = catalog.0.state();

    // Store root (truncated if too long)
    let root_str = catalog.0.store().root().to_string_lossy();
    ui.label(egui::RichText::new(truncate_start(&root_str, 60)).small().weak())
        .on_hover_text(root_str.as_ref());

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut panel.search_input)
                .hint_text("Search prefabs")
                .desired_width(200.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Search").clicked() || submitted {
            commands.push(PanelCommand::Search(panel.search_input.clone()));
        }

        let mut ignore_case = state.match_case() == MatchCase::Insensitive;
        if ui.checkbox(&mut ignore_case, "Ignore case").changed() {
            let match_case = if ignore_case {
                MatchCase::Insensitive
            } else {
                MatchCase::Sensitive
            };
            commands.push(PanelCommand::MatchCase(match_case));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Sort:");
        let current = state.sort_order();
        let mut chosen = current;
        egui::ComboBox::from_id_salt("catalog_sort_order")
            .selected_text(current.label())
            .show_ui(ui, |ui| {
                for order in SortOrder::ALL {
                    ui.selectable_value(&mut chosen, order, order.label());
                }
            });
        if chosen != current {
            commands.push(PanelCommand::Sort(chosen));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Refresh").clicked() {
                commands.push(PanelCommand::Refresh);
            }
            ui.label(
                egui::RichText::new(format!("{} prefabs", catalog.0.projection().len()))
                    .small()
                    .weak(),
            );
        });
    });
}

fn render_entry_list(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    thumbnail_cache: &ThumbnailCache,
    commands: &mut Vec<PanelCommand>,
) {
    let projection = catalog.0.projection();

    if projection.is_empty() {
        if catalog.0.state().search_term().is_empty() {
            ui.label("No prefabs with a preview image yet.");
        } else {
            ui.label("No prefabs match the search.");
        }
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for record in projection {
            let is_selected = catalog.0.selected() == Some(record.path.as_path());
            render_entry_row(ui, record, is_selected, thumbnail_cache, commands);
        }
    });
}

/// One entry: thumbnail, name, timestamp and actions.
fn render_entry_row(
    ui: &mut egui::Ui,
    record: &AssetRecord,
    is_selected: bool,
    thumbnail_cache: &ThumbnailCache,
    commands: &mut Vec<PanelCommand>,
) {
    ui.horizontal(|ui| {
        let thumb_size = THUMBNAIL_SIZE as f32;

        let texture_id = thumbnail_cache.get_texture_id(&record.preview);
        let thumb_response = if let Some(texture_id) = texture_id {
            ui.add(
                egui::Image::new(egui::load::SizedTexture::new(
                    texture_id,
                    egui::vec2(thumb_size, thumb_size),
                ))
                .fit_to_exact_size(egui::vec2(thumb_size, thumb_size))
                .corner_radius(2.0)
                .sense(egui::Sense::click()),
            )
        } else {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(thumb_size, thumb_size), egui::Sense::click());
            let fill = if thumbnail_cache.has_failed(&record.preview) {
                egui::Color32::from_rgb(120, 30, 30)
            } else {
                egui::Color32::from_rgb(60, 60, 60)
            };
            ui.painter().rect_filled(rect, 2.0, fill);
            response
        };

        if thumb_response.on_hover_text("Click to enlarge").clicked() {
            commands.push(PanelCommand::Action(record.path.clone(), EntryAction::Preview));
        }

        ui.vertical(|ui| {
            if ui.selectable_label(is_selected, &record.name).clicked() {
                commands.push(PanelCommand::Select(record.path.clone()));
            }
            ui.label(egui::RichText::new(record.last_modified_label()).small().weak());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Delete").clicked() {
                commands.push(PanelCommand::Action(record.path.clone(), EntryAction::Delete));
            }
            if ui.small_button("Duplicate").clicked() {
                commands.push(PanelCommand::Action(
                    record.path.clone(),
                    EntryAction::Duplicate,
                ));
            }
            if ui.small_button("Rename").clicked() {
                commands.push(PanelCommand::Action(record.path.clone(), EntryAction::Rename));
            }
        });
    });
    ui.separator();
}

//! Catalog window module.
//!
//! ## Module Structure
//!
//! - [`state`] - CatalogPanelState resource
//! - [`thumbnails`] - Preview loading and egui registration
//! - [`dialogs`] - Name prompt, enlarged preview and error windows, preview/selection sync
//! - [`main_panel`] - Catalog window system

mod dialogs;
mod main_panel;
mod state;
mod thumbnails;

pub use dialogs::sync_preview_with_selection;
pub use main_panel::catalog_panel_ui;
pub use state::CatalogPanelState;
pub use thumbnails::{load_and_register_thumbnails, ThumbnailCache};

//! Single catalog window instance.

use bevy::log::info;
use bevy::prelude::Resource;

/// Host-owned handle to the one catalog window.
pub trait WindowShell {
    fn is_registered(&self) -> bool;
    fn open(&mut self);
    fn focus(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOutcome {
    Opened,
    Focused,
}

/// Open the catalog, or raise it if an instance already exists.
pub fn display_catalog(shell: &mut impl WindowShell) -> DisplayOutcome {
    if shell.is_registered() {
        info!("Focusing existing catalog window");
        shell.focus();
        DisplayOutcome::Focused
    } else {
        info!("Opening catalog window");
        shell.open();
        DisplayOutcome::Opened
    }
}

/// Catalog window state read by the panel each frame.
#[derive(Resource, Default, Debug)]
pub struct CatalogWindow {
    /// Whether the window is shown
    pub open: bool,
    /// Bring the window to the front on the next frame
    pub focus_requested: bool,
}

impl WindowShell for CatalogWindow {
    fn is_registered(&self) -> bool {
        self.open
    }

    fn open(&mut self) {
        self.open = true;
        self.focus_requested = true;
    }

    fn focus(&mut self) {
        self.focus_requested = true;
    }
}

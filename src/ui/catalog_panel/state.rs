//! Catalog panel state resources.

use bevy::prelude::*;
use std::path::Path;

use crate::catalog::{AssetRecord, NamePrompt};

/// State resource for the catalog panel and its dialogs.
#[derive(Resource, Default)]
pub struct CatalogPanelState {
    /// Text in the search field; applied on Search or Enter
    pub search_input: String,
    /// Rename or copy-naming prompt awaiting an answer
    pub name_prompt: Option<NamePrompt>,
    /// Name typed into the prompt
    pub name_input: String,
    /// Why the last submitted name was refused
    pub name_error: Option<String>,
    /// Entry shown in the enlarged preview window
    pub preview: Option<AssetRecord>,
    /// Failed entry action to report
    pub action_error: Option<String>,
}

impl CatalogPanelState {
    pub fn open_prompt(&mut self, prompt: NamePrompt) {
        self.name_input = prompt.current_name.clone();
        self.name_error = None;
        self.name_prompt = Some(prompt);
    }

    pub fn close_prompt(&mut self) {
        self.name_prompt = None;
        self.name_input.clear();
        self.name_error = None;
    }

    /// Point an open preview at the newly selected entry. A closed preview stays closed.
    pub fn follow_selection(&mut self, selected: &Path, projection: &[AssetRecord]) {
        if self.preview.as_ref().is_none_or(|r| r.path == selected) {
            return;
        }
        if let Some(record) = projection.iter().find(|r| r.path == selected) {
            self.preview = Some(record.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn record(name: &str) -> AssetRecord {
        let path = PathBuf::from(format!("Assets/{}.prefab", name));
        AssetRecord {
            name: name.to_string(),
            preview: path.with_extension("png"),
            path,
            last_modified: Local::now(),
        }
    }

    #[test]
    fn test_open_preview_follows_selection() {
        let projection = vec![record("Chair"), record("Table")];
        let mut panel = CatalogPanelState {
            preview: Some(projection[0].clone()),
            ..Default::default()
        };

        panel.follow_selection(&projection[1].path, &projection);

        assert_eq!(panel.preview.map(|r| r.name), Some("Table".to_string()));
    }

    #[test]
    fn test_closed_preview_stays_closed() {
        let projection = vec![record("Chair")];
        let mut panel = CatalogPanelState::default();

        panel.follow_selection(&projection[0].path, &projection);

        assert!(panel.preview.is_none());
    }

    #[test]
    fn test_open_prompt_seeds_input() {
        let mut panel = CatalogPanelState {
            name_error: Some("stale".to_string()),
            ..Default::default()
        };

        panel.open_prompt(NamePrompt {
            path: PathBuf::from("Assets/Chair_Copy.prefab"),
            current_name: "Chair_Copy".to_string(),
            purpose: crate::catalog::PromptPurpose::NameCopy,
        });

        assert_eq!(panel.name_input, "Chair_Copy");
        assert!(panel.name_error.is_none());
        assert!(panel.name_prompt.is_some());
    }
}

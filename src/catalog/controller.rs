//! Command interface between the catalog panel and the asset store.
//!
//! The panel forwards search/sort edits and per-entry actions here. Every
//! known mutation ends in a full refresh of the projection rather than a
//! patch, so changes made by outside tools are picked up as well.

use bevy::log::{info, warn};
use std::path::{Path, PathBuf};

use super::error::{CatalogError, CatalogResult};
use super::record::AssetRecord;
use super::store::{validate_name, AssetStore};
use super::view_model::{CatalogState, MatchCase, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    Preview,
    Rename,
    Duplicate,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Renaming an existing entry
    Rename,
    /// Naming a freshly made copy; resolving it always refreshes
    NameCopy,
}

/// A pending request for the user to type a name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamePrompt {
    pub path: PathBuf,
    pub current_name: String,
    pub purpose: PromptPurpose,
}

#[derive(Debug)]
pub enum ActionOutcome {
    ShowPreview(AssetRecord),
    PromptName(NamePrompt),
    Deleted(PathBuf),
    /// The user declined a destructive confirmation
    Declined,
    Failed(CatalogError),
}

#[derive(Debug)]
pub enum NameOutcome {
    Renamed(PathBuf),
    /// Cancelled, or the name was left as it was
    Unchanged,
    /// Name refused; the prompt should stay open for another try
    Rejected(CatalogError),
    Failed(CatalogError),
}

pub struct CatalogController<S> {
    store: S,
    state: CatalogState,
    selected: Option<PathBuf>,
}

impl<S: AssetStore> CatalogController<S> {
    pub fn new(store: S, state: CatalogState) -> Self {
        Self {
            store,
            state,
            selected: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn projection(&self) -> &[AssetRecord] {
        self.state.projection()
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Select an entry (or clear with `None`). Returns whether the selection changed.
    pub fn select(&mut self, path: Option<&Path>) -> bool {
        if self.selected.as_deref() == path {
            return false;
        }
        self.selected = path.map(Path::to_path_buf);
        true
    }

    /// Rebuild the projection from the store.
    pub fn refresh(&mut self) -> CatalogResult<&[AssetRecord]> {
        self.state.refresh(&self.store)?;

        if let Some(selected) = &self.selected
            && !self.state.projection().iter().any(|r| &r.path == selected)
        {
            self.selected = None;
        }

        Ok(self.state.projection())
    }

    pub fn on_search_changed(&mut self, term: &str) -> CatalogResult<&[AssetRecord]> {
        self.state.set_search_term(term);
        self.refresh()
    }

    pub fn on_sort_changed(&mut self, order: SortOrder) -> CatalogResult<&[AssetRecord]> {
        self.state.set_sort_order(order);
        self.refresh()
    }

    pub fn on_match_case_changed(
        &mut self,
        match_case: MatchCase,
    ) -> CatalogResult<&[AssetRecord]> {
        self.state.set_match_case(match_case);
        self.refresh()
    }

    /// Run an entry action. Rename and duplicate hand back a [`NamePrompt`]
    /// that must be resolved with [`CatalogController::submit_name`].
    pub fn on_action(&mut self, path: &Path, action: EntryAction) -> ActionOutcome {
        match action {
            EntryAction::Preview => match self.find(path) {
                Some(record) => ActionOutcome::ShowPreview(record.clone()),
                None => self.fail(CatalogError::NotFound(path.to_path_buf())),
            },
            EntryAction::Rename => match self.find(path) {
                Some(record) => ActionOutcome::PromptName(NamePrompt {
                    path: record.path.clone(),
                    current_name: record.name.clone(),
                    purpose: PromptPurpose::Rename,
                }),
                None => self.fail(CatalogError::NotFound(path.to_path_buf())),
            },
            EntryAction::Duplicate => match self.store.duplicate(path) {
                Ok(new_path) => {
                    // The copy exists now, whatever becomes of the naming prompt
                    if let Err(e) = self.refresh() {
                        warn!("Catalog refresh failed: {}", e);
                    }
                    let current_name = new_path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or_default()
                        .to_string();
                    ActionOutcome::PromptName(NamePrompt {
                        path: new_path,
                        current_name,
                        purpose: PromptPurpose::NameCopy,
                    })
                }
                Err(e) => self.fail(e),
            },
            EntryAction::Delete => {
                if !self.store.confirm_destroy(path) {
                    info!("Delete declined for {:?}", path);
                    return ActionOutcome::Declined;
                }
                match self.store.delete(path) {
                    Ok(()) => match self.refresh() {
                        Ok(_) => ActionOutcome::Deleted(path.to_path_buf()),
                        Err(e) => ActionOutcome::Failed(e),
                    },
                    Err(e) => self.fail(e),
                }
            }
        }
    }

    /// Resolve a name prompt. `None` means the user cancelled.
    pub fn submit_name(&mut self, prompt: &NamePrompt, answer: Option<&str>) -> NameOutcome {
        let outcome = match answer {
            None => NameOutcome::Unchanged,
            Some(answer) => self.rename_to(prompt, answer),
        };

        let refresh = match (&outcome, prompt.purpose) {
            (NameOutcome::Rejected(_), _) => false,
            (NameOutcome::Renamed(_), _) => true,
            (_, PromptPurpose::NameCopy) => true,
            (NameOutcome::Failed(e), PromptPurpose::Rename) => e.needs_reconcile(),
            (NameOutcome::Unchanged, PromptPurpose::Rename) => false,
        };

        if let NameOutcome::Failed(e) = &outcome {
            warn!("Rename of {:?} failed: {}", prompt.path, e);
        }

        if refresh && let Err(e) = self.refresh() {
            warn!("Catalog refresh failed: {}", e);
            if matches!(outcome, NameOutcome::Failed(_)) {
                return outcome;
            }
            return NameOutcome::Failed(e);
        }

        outcome
    }

    fn rename_to(&mut self, prompt: &NamePrompt, answer: &str) -> NameOutcome {
        let name = match validate_name(answer) {
            Ok(name) => name,
            Err(e) => return NameOutcome::Rejected(e),
        };
        if name == prompt.current_name {
            return NameOutcome::Unchanged;
        }

        match self.store.rename(&prompt.path, name) {
            Ok(new_path) => {
                if self.selected.as_deref() == Some(prompt.path.as_path()) {
                    self.selected = Some(new_path.clone());
                }
                NameOutcome::Renamed(new_path)
            }
            Err(e @ (CatalogError::NameConflict(_) | CatalogError::InvalidName(_))) => {
                NameOutcome::Rejected(e)
            }
            Err(e) => NameOutcome::Failed(e),
        }
    }

    fn find(&self, path: &Path) -> Option<&AssetRecord> {
        self.state.projection().iter().find(|r| r.path == path)
    }

    fn fail(&mut self, error: CatalogError) -> ActionOutcome {
        warn!("Catalog action failed: {}", error);
        if error.needs_reconcile()
            && let Err(e) = self.refresh()
        {
            warn!("Catalog refresh failed: {}", e);
        }
        ActionOutcome::Failed(error)
    }
}

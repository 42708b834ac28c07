//! Search/sort state and the projection derived from the asset store.

use serde::{Deserialize, Serialize};

use super::error::CatalogResult;
use super::record::AssetRecord;
use super::store::AssetStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    LastModifiedDescending,
    LastModifiedAscending,
    NameDescending,
    NameAscending,
}

impl SortOrder {
    /// All orders, in dropdown index order.
    pub const ALL: [SortOrder; 4] = [
        SortOrder::LastModifiedDescending,
        SortOrder::LastModifiedAscending,
        SortOrder::NameDescending,
        SortOrder::NameAscending,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::LastModifiedDescending => "Last Modified Descending",
            SortOrder::LastModifiedAscending => "Last Modified Ascending",
            SortOrder::NameDescending => "Name Descending",
            SortOrder::NameAscending => "Name Ascending",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCase {
    #[default]
    Sensitive,
    Insensitive,
}

/// Records whose name contains `term`, in their original relative order.
pub fn filter_records(
    records: Vec<AssetRecord>,
    term: &str,
    match_case: MatchCase,
) -> Vec<AssetRecord> {
    if term.is_empty() {
        return records;
    }

    match match_case {
        MatchCase::Sensitive => records
            .into_iter()
            .filter(|r| r.name.contains(term))
            .collect(),
        MatchCase::Insensitive => {
            let term = term.to_lowercase();
            records
                .into_iter()
                .filter(|r| r.name.to_lowercase().contains(&term))
                .collect()
        }
    }
}

/// Stable sort; ties keep their store order.
pub fn sort_records(records: &mut [AssetRecord], order: SortOrder) {
    match order {
        SortOrder::LastModifiedDescending => {
            records.sort_by(|a, b| b.last_modified.cmp(&a.last_modified))
        }
        SortOrder::LastModifiedAscending => {
            records.sort_by(|a, b| a.last_modified.cmp(&b.last_modified))
        }
        SortOrder::NameDescending => records.sort_by(|a, b| b.name.cmp(&a.name)),
        SortOrder::NameAscending => records.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

/// Search term, sort order and the last computed projection.
///
/// Setters only store values; the projection changes on [`CatalogState::refresh`].
#[derive(Debug, Default)]
pub struct CatalogState {
    search_term: String,
    sort_order: SortOrder,
    match_case: MatchCase,
    projection: Vec<AssetRecord>,
}

impl CatalogState {
    pub fn new(sort_order: SortOrder, match_case: MatchCase) -> Self {
        Self {
            sort_order,
            match_case,
            ..Default::default()
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn match_case(&self) -> MatchCase {
        self.match_case
    }

    pub fn projection(&self) -> &[AssetRecord] {
        &self.projection
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    pub fn set_match_case(&mut self, match_case: MatchCase) {
        self.match_case = match_case;
    }

    /// Re-fetch from the store and rebuild the projection.
    ///
    /// On failure the projection is emptied; stale entries are never shown.
    pub fn refresh(&mut self, store: &impl AssetStore) -> CatalogResult<&[AssetRecord]> {
        let records = match store.list_previewable_assets() {
            Ok(records) => records,
            Err(e) => {
                self.projection.clear();
                return Err(e);
            }
        };
        let mut projection = filter_records(records, &self.search_term, self.match_case);
        sort_records(&mut projection, self.sort_order);
        self.projection = projection;
        Ok(&self.projection)
    }
}

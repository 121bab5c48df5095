use crate::catalog;
use crate::errors::DashboardError;
use serde::{Deserialize, Serialize};

/// Metric ids currently drawn on the chart, in the order they were chosen.
///
/// Equality is set equality; the order only decides drawing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids.len() == other.ids.len() && self.ids.iter().all(|id| other.contains(id))
    }
}

impl Eq for SelectionSet {}

impl Default for SelectionSet {
    fn default() -> Self {
        Self {
            ids: catalog::default_selection().map(str::to_string).collect(),
        }
    }
}

impl SelectionSet {
    pub fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    /// Parses a comma-separated id list. Blank entries are skipped, repeats collapse.
    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        let mut ids: Vec<String> = Vec::new();
        for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            catalog::require(id)?;
            if !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
        }
        Ok(Self { ids })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Removes `id` if selected, appends it otherwise.
    pub fn toggle(&self, id: &str) -> Self {
        let ids = if self.contains(id) {
            self.ids.iter().filter(|existing| *existing != id).cloned().collect()
        } else {
            let mut ids = self.ids.clone();
            ids.push(id.to_string());
            ids
        };
        Self { ids }
    }

    pub fn try_toggle(&self, id: &str) -> Result<Self, DashboardError> {
        catalog::require(id)?;
        Ok(self.toggle(id))
    }

    pub fn chart_keys(&self) -> &[String] {
        &self.ids
    }

    pub fn to_query(&self) -> String {
        self.ids.join(",")
    }
}

use serde::Serialize;
use std::collections::BTreeSet;

/// Simulated working-tree status. `modified` and `staged` never share an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcsState {
    pub branch: String,
    modified: BTreeSet<String>,
    staged: BTreeSet<String>,
    is_pushing: bool,
}

impl VcsState {
    pub fn new<I, S>(branch: &str, modified: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            branch: branch.to_string(),
            modified: modified.into_iter().map(Into::into).collect(),
            staged: BTreeSet::new(),
            is_pushing: false,
        }
    }

    pub fn modified(&self) -> &BTreeSet<String> {
        &self.modified
    }

    pub fn staged(&self) -> &BTreeSet<String> {
        &self.staged
    }

    pub fn is_pushing(&self) -> bool {
        self.is_pushing
    }

    pub fn is_modified(&self, id: &str) -> bool {
        self.modified.contains(id)
    }

    pub fn is_staged(&self, id: &str) -> bool {
        self.staged.contains(id)
    }

    /// Marks a file as edited. A staged file keeps its staged status.
    pub fn mark_modified(&mut self, id: &str) {
        if !self.staged.contains(id) {
            self.modified.insert(id.to_string());
        }
    }

    pub fn stage(&mut self, id: &str) {
        self.modified.remove(id);
        self.staged.insert(id.to_string());
        debug_assert!(self.is_disjoint());
    }

    pub fn unstage(&mut self, id: &str) {
        self.staged.remove(id);
        self.modified.insert(id.to_string());
        debug_assert!(self.is_disjoint());
    }

    /// Drops a pending edit. Returns whether anything was discarded.
    pub fn discard(&mut self, id: &str) -> bool {
        let removed = self.modified.remove(id);
        debug_assert!(self.is_disjoint());
        removed
    }

    /// Returns the number of files committed, or `None` when there is
    /// nothing staged or the message is blank.
    pub fn commit(&mut self, message: &str) -> Option<usize> {
        if message.trim().is_empty() || self.staged.is_empty() {
            return None;
        }
        let count = self.staged.len();
        self.staged.clear();
        Some(count)
    }

    /// Returns false when a push is already in flight.
    pub fn begin_push(&mut self) -> bool {
        if self.is_pushing {
            return false;
        }
        self.is_pushing = true;
        true
    }

    pub fn finish_push(&mut self) {
        self.is_pushing = false;
    }

    pub fn switch_branch(&mut self, name: &str) {
        self.branch = name.to_string();
    }

    pub fn is_disjoint(&self) -> bool {
        self.modified.is_disjoint(&self.staged)
    }
}

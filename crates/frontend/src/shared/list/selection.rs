//! Checkbox selection for bulk actions.
//!
//! "Select all" acts on the rows of the current page only. Its checked state
//! is derived from the set on every render instead of being stored, so it
//! can't go stale when the page or the filter changes.

use super::field::TableRecord;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_one(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Header checkbox: if every id on the page is selected, deselect them;
    /// otherwise select them all. Ids on other pages are left alone.
    pub fn toggle_all_on_current_page<I, S>(&mut self, page_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let page_ids: Vec<S> = page_ids.into_iter().collect();
        if self.all_selected(page_ids.iter().map(|id| id.as_ref())) {
            for id in &page_ids {
                self.ids.remove(id.as_ref());
            }
        } else {
            for id in &page_ids {
                self.ids.insert(id.as_ref().to_string());
            }
        }
    }

    /// Checked state of the header checkbox for the given page.
    /// An empty page is never "all selected".
    pub fn all_selected<'a, I>(&self, page_ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in page_ids {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids, sorted for stable request bodies and logs.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop ids that no longer belong to the collection (after reload or delete).
    /// Returns how many were removed.
    pub fn prune<'a, I>(&mut self, known_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<&str> = known_ids.into_iter().collect();
        let before = self.ids.len();
        self.ids.retain(|id| known.contains(id.as_str()));
        before - self.ids.len()
    }

    /// Prune against the rows of a record collection.
    pub fn prune_to<R: TableRecord>(&mut self, records: &[R]) -> usize {
        let known: Vec<String> = records.iter().map(|r| r.record_id().into_owned()).collect();
        self.prune(known.iter().map(String::as_str))
    }

    /// Unselect the given ids (rows deleted on the server).
    pub fn forget<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for id in ids {
            self.ids.remove(id);
        }
    }

    /// Selected rows in collection order.
    pub fn selected_records<R: TableRecord + Clone>(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| self.ids.contains(&*r.record_id()))
            .cloned()
            .collect()
    }
}

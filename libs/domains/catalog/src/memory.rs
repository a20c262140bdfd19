//! Shared storage for the in-memory repositories.

use axum_helpers::PageRequest;
use std::collections::BTreeMap;

/// Rows keyed by a store-assigned, monotonically increasing id.
#[derive(Debug)]
pub(crate) struct Table<T> {
    next_id: i64,
    pub(crate) rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub(crate) fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }
}

/// Slices already-ordered rows to one page and returns the total count.
pub(crate) fn paginate<T>(rows: Vec<T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    (items, total)
}

use chrono::{DateTime, Utc};
use portico_core::record::Record;
use portico_core::{PorticoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entity table.
///
/// Rows are kept in id order, tombstoned rows included. Ids are assigned
/// from a monotonic counter and never reused, so a binary search on id
/// finds any row. The unique-key index only tracks live rows and is
/// rebuilt after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
    #[serde(skip)]
    by_key: HashMap<String, u64>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
            by_key: HashMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live row by id.
    pub fn get(&self, id: u64) -> Result<&T> {
        self.live_position(id)
            .map(|idx| &self.rows[idx])
            .ok_or(PorticoError::NotFound(T::KIND))
    }

    /// Live rows in storage order.
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().filter(|r| r.is_live())
    }

    /// Every row including tombstones, for audit.
    pub fn all_rows(&self) -> &[T] {
        &self.rows
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Live row holding the given unique key.
    pub fn find_by_key(&self, key: &str) -> Option<&T> {
        let id = *self.by_key.get(key)?;
        self.get(id).ok()
    }

    /// Insert a new row, assigning id and timestamps.
    pub fn insert(&mut self, mut record: T, now: DateTime<Utc>) -> Result<T> {
        if let Some(key) = record.unique_key() {
            self.ensure_key_free(key, None)?;
        }

        let id = self.next_id;
        self.next_id += 1;

        let meta = record.meta_mut();
        meta.id = id;
        meta.created_at = now;
        meta.updated_at = now;
        meta.deleted_at = None;

        if let Some(key) = record.unique_key() {
            self.by_key.insert(key.to_string(), id);
        }
        self.rows.push(record.clone());
        Ok(record)
    }

    /// Mutate a live row in place.
    ///
    /// Fails with `NotFound` if the row is absent or tombstoned, and with
    /// `Conflict` if the change would collide with another live row's key.
    pub fn update<F>(&mut self, id: u64, now: DateTime<Utc>, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let idx = self
            .live_position(id)
            .ok_or(PorticoError::NotFound(T::KIND))?;

        let mut next = self.rows[idx].clone();
        mutate(&mut next);
        {
            let meta = next.meta_mut();
            let current = self.rows[idx].meta();
            meta.id = current.id;
            meta.created_at = current.created_at;
            meta.deleted_at = None;
            meta.updated_at = now;
        }

        let old_key = self.rows[idx].unique_key().map(str::to_owned);
        let new_key = next.unique_key().map(str::to_owned);
        if let Some(key) = new_key.as_deref() {
            self.ensure_key_free(key, Some(id))?;
        }
        if old_key != new_key {
            if let Some(old) = old_key {
                self.by_key.remove(&old);
            }
            if let Some(new) = new_key {
                self.by_key.insert(new, id);
            }
        }

        self.rows[idx] = next.clone();
        Ok(next)
    }

    /// Tombstone a live row. The row stays in the table.
    pub fn soft_delete(&mut self, id: u64, now: DateTime<Utc>) -> Result<T> {
        let idx = self
            .live_position(id)
            .ok_or(PorticoError::NotFound(T::KIND))?;

        let row = &mut self.rows[idx];
        row.meta_mut().deleted_at = Some(now);
        let row = row.clone();
        if let Some(key) = row.unique_key() {
            self.by_key.remove(key);
        }
        Ok(row)
    }

    /// Rebuild the unique-key index and repair the id counter.
    pub(crate) fn rebuild_index(&mut self) {
        self.rows.sort_by_key(|r| r.id());
        self.by_key = self
            .rows
            .iter()
            .filter(|r| r.is_live())
            .filter_map(|r| r.unique_key().map(|k| (k.to_string(), r.id())))
            .collect();
        let max_id = self.rows.last().map(|r| r.id()).unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
    }

    fn live_position(&self, id: u64) -> Option<usize> {
        self.rows
            .binary_search_by_key(&id, |r| r.id())
            .ok()
            .filter(|idx| self.rows[*idx].is_live())
    }

    fn ensure_key_free(&self, key: &str, owner: Option<u64>) -> Result<()> {
        match self.by_key.get(key) {
            Some(existing) if Some(*existing) != owner => Err(PorticoError::Conflict(format!(
                "{} with name '{}' already exists",
                T::KIND,
                key
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::{Domain, Route};

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut table = Table::<Domain>::new();
        let a = table.insert(Domain::new("a.test", "u"), now()).unwrap();
        let b = table.insert(Domain::new("b.test", "u"), now()).unwrap();
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(table.live_count(), 2);
    }

    #[test]
    fn duplicate_live_key_conflicts() {
        let mut table = Table::<Domain>::new();
        table.insert(Domain::new("a.test", "u"), now()).unwrap();
        let err = table.insert(Domain::new("a.test", "v"), now()).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(table.all_rows().len(), 1);
    }

    #[test]
    fn tombstoned_key_can_be_reused() {
        let mut table = Table::<Domain>::new();
        let first = table.insert(Domain::new("a.test", "u"), now()).unwrap();
        table.soft_delete(first.id(), now()).unwrap();
        let second = table.insert(Domain::new("a.test", "u"), now()).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(table.all_rows().len(), 2, "tombstone is retained");
        assert_eq!(table.find_by_key("a.test").unwrap().id(), second.id());
    }

    #[test]
    fn get_hides_tombstoned_rows() {
        let mut table = Table::<Route>::new();
        let route = table.insert(Route::new("/", "http://u", "", 1), now()).unwrap();
        table.soft_delete(route.id(), now()).unwrap();
        assert_eq!(table.get(route.id()).unwrap_err(), PorticoError::NotFound("Route"));
        assert_eq!(table.live().count(), 0);
    }

    #[test]
    fn delete_twice_is_not_found() {
        let mut table = Table::<Route>::new();
        let route = table.insert(Route::new("/", "http://u", "", 1), now()).unwrap();
        table.soft_delete(route.id(), now()).unwrap();
        assert!(matches!(
            table.soft_delete(route.id(), now()),
            Err(PorticoError::NotFound(_))
        ));
    }

    #[test]
    fn update_renaming_onto_live_key_conflicts() {
        let mut table = Table::<Domain>::new();
        table.insert(Domain::new("a.test", "u"), now()).unwrap();
        let b = table.insert(Domain::new("b.test", "u"), now()).unwrap();
        let err = table
            .update(b.id(), now(), |d| d.name = "a.test".into())
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(table.get(b.id()).unwrap().name, "b.test");
    }

    #[test]
    fn update_reindexes_renamed_key() {
        let mut table = Table::<Domain>::new();
        let a = table.insert(Domain::new("a.test", "u"), now()).unwrap();
        table.update(a.id(), now(), |d| d.name = "c.test".into()).unwrap();
        assert!(table.find_by_key("a.test").is_none());
        assert_eq!(table.find_by_key("c.test").unwrap().id(), a.id());
        table.insert(Domain::new("a.test", "u"), now()).unwrap();
    }

    #[test]
    fn update_cannot_touch_bookkeeping() {
        let mut table = Table::<Domain>::new();
        let a = table.insert(Domain::new("a.test", "u"), now()).unwrap();
        let updated = table
            .update(a.id(), now(), |d| {
                d.meta.id = 99;
                d.meta.deleted_at = Some(Utc::now());
            })
            .unwrap();
        assert_eq!(updated.id(), a.id());
        assert!(updated.is_live());
        assert_eq!(updated.meta.created_at, a.meta.created_at);
    }

    #[test]
    fn update_missing_row_is_not_found() {
        let mut table = Table::<Domain>::new();
        assert_eq!(
            table.update(42, now(), |_| {}).unwrap_err(),
            PorticoError::NotFound("Domain")
        );
    }

    #[test]
    fn rebuild_after_deserialize_restores_index() {
        let mut table = Table::<Domain>::new();
        table.insert(Domain::new("a.test", "u"), now()).unwrap();
        let json = serde_json::to_string(&table).unwrap();

        let mut restored: Table<Domain> = serde_json::from_str(&json).unwrap();
        assert!(restored.find_by_key("a.test").is_none());
        restored.rebuild_index();
        assert!(restored.find_by_key("a.test").is_some());
        let next = restored.insert(Domain::new("b.test", "u"), now()).unwrap();
        assert_eq!(next.id(), 2);
    }
}

//! In-memory entry store.
//!
//! Entries are string property bags identified by an incrementing id.
//! Nothing is persisted between invocations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{AppError, Result};

/// A stored item with string properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: u32,
    properties: BTreeMap<String, String>,
}

impl Entry {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            properties: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns a property value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyNotFound`] if the property is missing.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AppError::KeyNotFound(key.to_string()))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

/// Entries indexed by id.
#[derive(Debug, Default)]
pub struct EntryStore {
    by_id: BTreeMap<u32, Entry>,
    max_id: u32,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry with the next id and the given properties.
    pub fn create<I, K, V>(&mut self, properties: I) -> &mut Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.max_id += 1;
        let mut entry = Entry::new(self.max_id);
        for (key, value) in properties {
            entry.set(key, value);
        }
        self.by_id.entry(self.max_id).or_insert(entry)
    }

    /// # Errors
    ///
    /// Returns [`AppError::EntryNotFound`] for unknown ids.
    pub fn get(&self, id: u32) -> Result<&Entry> {
        self.by_id.get(&id).ok_or(AppError::EntryNotFound(id))
    }

    pub fn get_mut(&mut self, id: u32) -> Result<&mut Entry> {
        self.by_id.get_mut(&id).ok_or(AppError::EntryNotFound(id))
    }

    /// Entries whose `key` property equals `value`, in id order.
    pub fn find_by<'a>(&'a self, key: &'a str, value: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.by_id
            .values()
            .filter(move |e| e.properties.get(key).is_some_and(|v| v == value))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

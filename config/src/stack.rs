//! Layered namespace stack.
//!
//! A [`NamespaceStack`] keeps an ordered list of named levels on top of the
//! fixed `"DEFAULT"` level, plus one derived *effective* namespace that the
//! rest of the application reads.
//!
//! # Propagation
//!
//! - [`load`](NamespaceStack::load) writes to the effective namespace only.
//! - [`load_into_level`](NamespaceStack::load_into_level) writes to the named
//!   level, every level above it, and the effective namespace.
//! - Writing through [`level_mut`](NamespaceStack::level_mut) touches that
//!   level alone until [`update`](NamespaceStack::update) re-merges all
//!   levels, index 0 upward, into the effective namespace.
//!
//! # Example
//!
//! ```
//! use hole_config::{Namespace, NamespaceStack};
//! use serde_json::json;
//!
//! let mut seed = Namespace::new(["username", "age"]);
//! seed.set("username", "James Chan").unwrap();
//!
//! let mut stack = NamespaceStack::new(seed);
//! stack.create_level("USER").unwrap().set("username", "Andrew Mo").unwrap();
//! assert_eq!(stack.effective().get("username"), Some(&json!("James Chan")));
//!
//! stack.update();
//! assert_eq!(stack.effective().get("username"), Some(&json!("Andrew Mo")));
//! ```

use serde_json::Value;
use tracing::debug;

use crate::Namespace;
use crate::error::{ConfigError, Result};

/// Name of the bottom level, created from the seed namespace.
pub const DEFAULT_LEVEL: &str = "DEFAULT";

/// Ordered levels of namespaces resolving into one effective namespace.
///
/// All namespaces are clones of one seed, so they share its allowed key set.
/// A level's index is its precedence: higher indexes win in
/// [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct NamespaceStack {
    levels: Vec<(String, Namespace)>,
    effective: Namespace,
}

impl NamespaceStack {
    /// Wraps `seed` as the `"DEFAULT"` level; the effective namespace starts
    /// as a clone of it.
    pub fn new(seed: Namespace) -> Self {
        let effective = seed.clone();
        Self {
            levels: vec![(DEFAULT_LEVEL.to_string(), seed)],
            effective,
        }
    }

    /// Registers a new topmost level and returns it.
    ///
    /// The level starts as a clone of the current effective namespace, not
    /// of the seed, so it inherits whatever is effective right now.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LevelExists`] if `name` is already registered.
    pub fn create_level(&mut self, name: &str) -> Result<&mut Namespace> {
        if self.index_of(name).is_some() {
            return Err(ConfigError::LevelExists(name.to_string()));
        }

        let index = self.levels.len();
        debug!(level = name, index, "Creating namespace level");
        self.levels.push((name.to_string(), self.effective.clone()));
        Ok(&mut self.levels[index].1)
    }

    /// Loads entries into the effective namespace only.
    pub fn load<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.effective.load(entries)
    }

    /// Loads entries into the named level and everything above it.
    ///
    /// An unknown level name is a silent no-op.
    pub fn load_into_level<I, K, V>(&mut self, entries: I, level: &str) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)> + Clone,
        K: Into<String>,
        V: Into<Value>,
    {
        match self.index_of(level) {
            Some(index) => self.load_from_index(entries, index),
            None => {
                debug!(level, "Skipping load into unknown level");
                Ok(())
            }
        }
    }

    /// Loads entries into the level at `index`, every level above it, and,
    /// once the top level is reached, the effective namespace.
    ///
    /// An index outside the stack is a silent no-op. A failing key aborts
    /// the walk; levels already written keep their new values.
    pub fn load_from_index<I, K, V>(&mut self, entries: I, index: usize) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)> + Clone,
        K: Into<String>,
        V: Into<Value>,
    {
        if index >= self.levels.len() {
            return Ok(());
        }

        for (name, namespace) in &mut self.levels[index..] {
            debug!(level = %name, "Loading into namespace level");
            namespace.load(entries.clone())?;
        }
        self.effective.load(entries)
    }

    /// Recomputes the effective namespace by merging every level, from index
    /// 0 upward, so higher levels win for shared keys.
    ///
    /// Keys present only in the effective namespace are kept.
    pub fn update(&mut self) {
        for (_, namespace) in &self.levels {
            self.effective.overlay(namespace);
        }
        debug!(levels = self.levels.len(), "Updated effective namespace");
    }

    /// Looks up a level by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LevelNotFound`] for unregistered names.
    pub fn level(&self, name: &str) -> Result<&Namespace> {
        self.levels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ns)| ns)
            .ok_or_else(|| ConfigError::LevelNotFound(name.to_string()))
    }

    /// Mutable access to one level; changes reach the effective namespace on
    /// the next [`update`](Self::update).
    pub fn level_mut(&mut self, name: &str) -> Result<&mut Namespace> {
        self.levels
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, ns)| ns)
            .ok_or_else(|| ConfigError::LevelNotFound(name.to_string()))
    }

    /// Looks up a level by index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IllegalIndex`] outside `0..len()`.
    pub fn level_at(&self, index: usize) -> Result<&Namespace> {
        self.levels
            .get(index)
            .map(|(_, ns)| ns)
            .ok_or(ConfigError::IllegalIndex(index))
    }

    /// Returns the named level, or the effective namespace for `None`.
    pub fn get(&self, level: Option<&str>) -> Result<&Namespace> {
        match level {
            Some(name) => self.level(name),
            None => Ok(&self.effective),
        }
    }

    /// The merged view read by the rest of the application.
    pub fn effective(&self) -> &Namespace {
        &self.effective
    }

    /// Position of a level, if registered.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|(n, _)| n == name)
    }

    /// Level names from lowest to highest precedence.
    pub fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(n, _)| n.as_str())
    }

    /// Number of levels, including `"DEFAULT"`.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`: the `"DEFAULT"` level cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn seed() -> Namespace {
        let mut ns = Namespace::new(["username", "age", "sex"]);
        ns.load([
            ("username", json!("James Chan")),
            ("age", json!(25)),
            ("sex", json!("male")),
        ])
        .unwrap();
        ns
    }

    #[test]
    fn test_new_stack_has_default_level() {
        let stack = NamespaceStack::new(seed());
        assert_eq!(stack.len(), 1);
        assert!(!stack.is_empty());
        assert_eq!(stack.level_names().collect::<Vec<_>>(), vec![DEFAULT_LEVEL]);
        assert_eq!(stack.effective(), stack.level(DEFAULT_LEVEL).unwrap());
    }

    #[test]
    fn test_created_level_inherits_effective() {
        let mut stack = NamespaceStack::new(seed());
        stack.load([("username", json!("Evan"))]).unwrap();
        let user = stack.create_level("USER").unwrap();
        assert_eq!(user.get("username"), Some(&json!("Evan")));
        assert_eq!(stack.index_of("USER"), Some(1));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let mut stack = NamespaceStack::new(seed());
        stack.create_level("USER").unwrap();
        assert!(matches!(
            stack.create_level("USER"),
            Err(ConfigError::LevelExists(_))
        ));
        assert!(matches!(
            stack.create_level(DEFAULT_LEVEL),
            Err(ConfigError::LevelExists(_))
        ));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_load_from_index_propagates_upward() {
        let mut stack = NamespaceStack::new(seed());
        stack.create_level("USER").unwrap();
        stack.create_level("PROJECT").unwrap();

        stack.load_into_level([("age", json!(30))], "USER").unwrap();

        assert_eq!(stack.level(DEFAULT_LEVEL).unwrap().get("age"), Some(&json!(25)));
        assert_eq!(stack.level("USER").unwrap().get("age"), Some(&json!(30)));
        assert_eq!(stack.level("PROJECT").unwrap().get("age"), Some(&json!(30)));
        assert_eq!(stack.effective().get("age"), Some(&json!(30)));
    }

    #[test]
    fn test_load_at_default_reaches_everything() {
        let mut stack = NamespaceStack::new(seed());
        stack.create_level("USER").unwrap();
        stack.load_from_index([("sex", json!("female"))], 0).unwrap();

        for name in [DEFAULT_LEVEL, "USER"] {
            assert_eq!(stack.level(name).unwrap().get("sex"), Some(&json!("female")));
        }
        assert_eq!(stack.effective().get("sex"), Some(&json!("female")));
    }

    #[test]
    fn test_out_of_range_and_unknown_level_are_noops() {
        let mut stack = NamespaceStack::new(seed());
        stack.load_from_index([("age", json!(99))], 5).unwrap();
        stack.load_into_level([("age", json!(99))], "MISSING").unwrap();
        assert_eq!(stack.effective().get("age"), Some(&json!(25)));
    }

    #[test]
    fn test_illegal_key_aborts_propagation() {
        let mut stack = NamespaceStack::new(seed());
        stack.create_level("USER").unwrap();
        let result = stack.load_into_level([("password", json!("x"))], DEFAULT_LEVEL);
        assert!(matches!(result, Err(ConfigError::IllegalKey(_))));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_lookup_errors() {
        let stack = NamespaceStack::new(seed());
        assert!(matches!(
            stack.level("USER"),
            Err(ConfigError::LevelNotFound(ref n)) if n == "USER"
        ));
        assert!(matches!(stack.level_at(1), Err(ConfigError::IllegalIndex(1))));
        assert!(stack.level_at(0).is_ok());
        assert!(stack.get(None).is_ok());
    }

    #[test]
    fn test_update_higher_level_wins() {
        let mut stack = NamespaceStack::new(seed());
        stack.create_level("USER").unwrap();
        stack.create_level("PROJECT").unwrap();
        stack.level_mut("USER").unwrap().set("age", 40).unwrap();
        stack.level_mut("PROJECT").unwrap().set("age", 50).unwrap();

        stack.update();
        assert_eq!(stack.effective().get("age"), Some(&json!(50)));
    }
}

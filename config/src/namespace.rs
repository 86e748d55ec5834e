//! Restricted key/value namespaces.
//!
//! A [`Namespace`] only accepts the keys it was built with. Reads of a
//! permitted but unset key return `None`; writes of any other key fail with
//! [`ConfigError::IllegalKey`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Key/value map whose key set is fixed at construction.
///
/// Cloning copies the stored values; the allowed key set is shared, since it
/// never changes.
///
/// # Examples
///
/// ```
/// use hole_config::Namespace;
/// use serde_json::json;
///
/// let mut ns = Namespace::new(["username", "age", "sex"]);
/// ns.set("username", "James Chan").unwrap();
/// assert_eq!(ns.get("username"), Some(&json!("James Chan")));
/// assert_eq!(ns.get("age"), None);
///
/// assert!(ns.set("password", "123456").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    allowed_keys: Arc<BTreeSet<String>>,
    data: BTreeMap<String, Value>,
}

impl Namespace {
    /// Creates an empty namespace accepting exactly `keys`.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_keys: Arc::new(keys.into_iter().map(Into::into).collect()),
            data: BTreeMap::new(),
        }
    }

    pub fn allowed_keys(&self) -> &BTreeSet<String> {
        &self.allowed_keys
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        self.allowed_keys.contains(key)
    }

    /// Returns the stored value, or `None` if the key was never set.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns the stored value as a string slice, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Stores or overwrites a value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IllegalKey`] if `key` is not allowed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if !self.is_allowed(&key) {
            return Err(ConfigError::IllegalKey(key));
        }
        self.data.insert(key, value.into());
        Ok(())
    }

    /// Applies [`set`](Self::set) to every entry in iteration order.
    ///
    /// Not atomic: entries applied before a failing key stay applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use hole_config::Namespace;
    /// use serde_json::json;
    ///
    /// let mut ns = Namespace::new(["username", "age", "sex"]);
    /// ns.load([("age", json!(24)), ("username", json!("Andrew Mo"))]).unwrap();
    /// assert_eq!(ns.get("username"), Some(&json!("Andrew Mo")));
    /// assert_eq!(ns.get("age"), Some(&json!(24)));
    /// ```
    pub fn load<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Stored entries, sorted by key.
    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies every stored entry of `other` over this namespace.
    ///
    /// Both namespaces must come from the same seed, so no key check is needed.
    pub(crate) fn overlay(&mut self, other: &Namespace) {
        debug_assert!(Arc::ptr_eq(&self.allowed_keys, &other.allowed_keys));
        self.data
            .extend(other.data.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn person() -> Namespace {
        let mut ns = Namespace::new(["username", "age", "sex"]);
        ns.set("username", "James Chan").unwrap();
        ns.set("age", 25).unwrap();
        ns.set("sex", "male").unwrap();
        ns
    }

    #[test]
    fn test_basic_get_set() {
        let ns = person();
        assert_eq!(ns.get("username"), Some(&json!("James Chan")));
        assert_eq!(ns.get("age"), Some(&json!(25)));
        assert_eq!(ns.get_str("sex"), Some("male"));
        assert_eq!(ns.len(), 3);
    }

    #[test]
    fn test_illegal_key() {
        let mut ns = person();
        let err = ns.set("password", "123456").unwrap_err();
        assert!(matches!(err, ConfigError::IllegalKey(ref k) if k == "password"));
        assert!(!ns.contains_key("password"));
    }

    #[test]
    fn test_unset_permitted_key_is_absent() {
        let ns = Namespace::new(["username"]);
        assert_eq!(ns.get("username"), None);
        assert!(ns.is_empty());
    }

    #[test]
    fn test_load_overwrites() {
        let mut ns = person();
        ns.load([("age", json!(24)), ("username", json!("Andrew Mo"))])
            .unwrap();
        assert_eq!(ns.get("username"), Some(&json!("Andrew Mo")));
        assert_eq!(ns.get("age"), Some(&json!(24)));
    }

    #[test]
    fn test_load_is_not_atomic() {
        let mut ns = Namespace::new(["a", "b"]);
        let result = ns.load([("a", json!(1)), ("bad", json!(2)), ("b", json!(3))]);
        assert!(result.is_err());
        assert_eq!(ns.get("a"), Some(&json!(1)));
        assert_eq!(ns.get("b"), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = person();
        let mut cloned = original.clone();
        cloned
            .load([("username", json!("Evan")), ("age", json!(30))])
            .unwrap();

        assert_eq!(original.get("username"), Some(&json!("James Chan")));
        assert_eq!(original.get("age"), Some(&json!(25)));
        assert_eq!(cloned.allowed_keys(), original.allowed_keys());
    }

    #[test]
    fn test_null_values_are_stored() {
        let mut ns = Namespace::new(["plugin.path"]);
        ns.set("plugin.path", Value::Null).unwrap();
        assert!(ns.contains_key("plugin.path"));
        assert_eq!(ns.get("plugin.path"), Some(&Value::Null));
    }
}

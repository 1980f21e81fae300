// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable lookup adapters.
//!
//! `ProcessEnvironment` reads the real process environment. `MapEnvironment` holds
//! a fixed set of variables so tests and embedders can supply overrides without
//! touching the process.

use crate::ports::Environment;
use std::collections::HashMap;
use std::env::{self, VarError};

/// Looks variables up in the process environment.
///
/// A variable whose value is not valid UTF-8 is treated as unset.
///
/// # Examples
///
/// ```rust
/// use envflag::adapters::ProcessEnvironment;
/// use envflag::ports::Environment;
///
/// let env = ProcessEnvironment;
/// assert_eq!(env.lookup("ENVFLAG_DOC_SURELY_UNSET_12345"), None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!(
                    "Ignoring environment variable '{}': value is not valid UTF-8",
                    name
                );
                None
            }
        }
    }
}

/// An in-memory set of environment variables.
///
/// # Examples
///
/// ```rust
/// use envflag::adapters::MapEnvironment;
/// use envflag::ports::Environment;
///
/// let env = MapEnvironment::new()
///     .with_var("MY_STRING", "bar")
///     .with_var("MY_BOOL", "false");
///
/// assert_eq!(env.lookup("MY_STRING").as_deref(), Some("bar"));
/// assert_eq!(env.lookup("OTHER"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Adds or replaces a variable in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Removes a variable.
    pub fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }

    /// The number of variables held.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are held.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_process_env_present() {
        let mut guard = EnvGuard::new();
        guard.set("ENVFLAG_UNIT_PRESENT", "value");

        let value = ProcessEnvironment.lookup("ENVFLAG_UNIT_PRESENT");
        assert_eq!(value.as_deref(), Some("value"));
    }

    #[test]
    fn test_process_env_absent() {
        assert_eq!(ProcessEnvironment.lookup("ENVFLAG_UNIT_NONEXISTENT_12345"), None);
    }

    #[test]
    fn test_process_env_empty_value_is_present() {
        let mut guard = EnvGuard::new();
        guard.set("ENVFLAG_UNIT_EMPTY", "");

        assert_eq!(
            ProcessEnvironment.lookup("ENVFLAG_UNIT_EMPTY").as_deref(),
            Some("")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_process_env_not_unicode() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var("ENVFLAG_UNIT_BYTES", OsStr::from_bytes(&[0x66, 0x6f, 0x80]));
        let value = ProcessEnvironment.lookup("ENVFLAG_UNIT_BYTES");
        env::remove_var("ENVFLAG_UNIT_BYTES");

        assert_eq!(value, None);
    }

    #[test]
    fn test_map_env_builder() {
        let env = MapEnvironment::new().with_var("A", "1").with_var("A", "2");
        assert_eq!(env.lookup("A").as_deref(), Some("2"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_map_env_from_array() {
        let env = MapEnvironment::from([("A", "1"), ("B", "2")]);
        assert_eq!(env.lookup("B").as_deref(), Some("2"));
        assert!(!env.is_empty());
    }

    #[test]
    fn test_map_env_remove() {
        let mut env = MapEnvironment::from([("A", "1")]);
        env.remove("A");
        assert_eq!(env.lookup("A"), None);
        assert!(env.is_empty());
    }
}

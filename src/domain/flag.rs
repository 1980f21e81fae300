// SPDX-License-Identifier: MIT OR Apache-2.0

//! The flag entity.
//!
//! A `Flag` is owned by a registry. The override engine reads its name and usage
//! text, may rewrite the usage text, and asks the registry to change its value.

use crate::domain::errors::Result;
use crate::domain::value::FlagValue;
use std::fmt;

/// A named, typed, declared configuration value.
///
/// # Examples
///
/// ```
/// use envflag::domain::flag::Flag;
/// use envflag::domain::value::{FlagRef, TypedValue};
///
/// let handle = FlagRef::new(String::from("foo"));
/// let flag = Flag::new("my-string", "Some string flag", Box::new(TypedValue::new(handle)));
///
/// assert_eq!(flag.name(), "my-string");
/// assert_eq!(flag.default_value(), "foo");
/// ```
pub struct Flag {
    name: String,
    usage: String,
    default_value: String,
    value: Box<dyn FlagValue>,
}

impl Flag {
    /// Creates a flag; its current value becomes the displayed default.
    pub fn new(name: impl Into<String>, usage: impl Into<String>, value: Box<dyn FlagValue>) -> Self {
        let default_value = value.get_string();
        Self {
            name: name.into(),
            usage: usage.into(),
            default_value,
            value,
        }
    }

    /// The flag's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The help text shown for this flag.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Replaces the help text.
    pub fn set_usage(&mut self, usage: impl Into<String>) {
        self.usage = usage.into();
    }

    /// The default value as it was rendered when the flag was declared.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// The current value rendered as a string.
    pub fn current_value(&self) -> String {
        self.value.get_string()
    }

    /// The underlying value.
    pub fn value(&self) -> &dyn FlagValue {
        self.value.as_ref()
    }

    /// Converts `raw` with the flag's own type and stores it.
    pub fn set_value(&mut self, raw: &str) -> Result<()> {
        self.value.set(raw)
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("default_value", &self.default_value)
            .field("value", &self.value.get_string())
            .finish()
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag registry trait definition.
//!
//! This module defines the `FlagRegistry` trait, the port through which the override
//! engine drives a collection of declared flags. Declaring flags and converting
//! their values belong to the registry; the engine only enumerates, sets and parses.

use crate::domain::{Flag, Result};
use std::io::Write;

/// A collection of declared flags that can be set by name and parsed from arguments.
///
/// [`crate::adapters::FlagSet`] is the bundled implementation. Other registries can
/// implement this trait to be driven by [`crate::parse`].
///
/// # Examples
///
/// ```rust
/// use envflag::domain::{Flag, FlagError, Result};
/// use envflag::ports::FlagRegistry;
/// use std::io::Write;
///
/// struct Empty(Vec<u8>);
///
/// impl FlagRegistry for Empty {
///     fn visit_all(&self, _visitor: &mut dyn FnMut(&Flag)) {}
///     fn visit_all_mut(&mut self, _visitor: &mut dyn FnMut(&mut Flag)) {}
///     fn set(&mut self, name: &str, _value: &str) -> Result<()> {
///         Err(FlagError::NoSuchFlag { name: name.to_string() })
///     }
///     fn parse(&mut self, _arguments: &[String]) -> Result<()> {
///         Ok(())
///     }
///     fn output(&mut self) -> &mut dyn Write {
///         &mut self.0
///     }
///     fn print_usage(&mut self) {}
/// }
///
/// let mut registry = Empty(Vec::new());
/// assert!(registry.flag_names().is_empty());
/// assert!(registry.set("missing", "x").is_err());
/// ```
pub trait FlagRegistry {
    /// Calls `visitor` for every declared flag, in lexicographic order of name.
    fn visit_all(&self, visitor: &mut dyn FnMut(&Flag));

    /// Like [`FlagRegistry::visit_all`], but allows the flag's usage text to be rewritten.
    fn visit_all_mut(&mut self, visitor: &mut dyn FnMut(&mut Flag));

    /// Sets the named flag from a string using the flag's own conversion.
    ///
    /// Fails if the flag is not declared or the value does not convert.
    fn set(&mut self, name: &str, value: &str) -> Result<()>;

    /// Parses `arguments` against the declared flags.
    ///
    /// On failure, implementations write their own diagnostic and usage text to
    /// [`FlagRegistry::output`] before returning. A help request is reported as
    /// [`crate::domain::FlagError::HelpRequested`].
    fn parse(&mut self, arguments: &[String]) -> Result<()>;

    /// The sink diagnostics and usage text are written to.
    fn output(&mut self) -> &mut dyn Write;

    /// Writes the registry's usage text to its output sink.
    fn print_usage(&mut self);

    /// The names of all declared flags, in the order `visit_all` yields them.
    fn flag_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.visit_all(&mut |flag| names.push(flag.name().to_string()));
        names
    }
}

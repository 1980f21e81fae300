// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bundled flag registry.
//!
//! `FlagSet` declares typed flags, sets them by name, and parses single-dash
//! command-line arguments with last-write-wins semantics. A process-wide
//! instance is available through [`command_line`] and is the registry the
//! override engine uses unless told otherwise.

use crate::domain::value::{FlagRef, FlagType, FlagValue, TypedValue};
use crate::domain::{Flag, FlagError, Result};
use crate::ports::FlagRegistry;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Replacement for the default usage text.
pub type UsageFn = Box<dyn Fn(&FlagSet) -> String + Send + Sync>;

/// What [`FlagSet::parse`] does when parsing fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Return the error to the caller.
    #[default]
    ContinueOnError,
    /// Terminate the process: status 0 for a help request, 2 otherwise.
    ExitOnError,
}

/// A set of declared flags.
///
/// # Arguments syntax
///
/// - `-name` or `--name`: boolean flags only
/// - `-name=value` or `--name=value`
/// - `-name value`: non-boolean flags only
///
/// Parsing stops at the first non-flag argument, at a lone `-`, or after `--`.
/// The remaining arguments are available through [`FlagSet::args`].
///
/// # Examples
///
/// ```rust
/// use envflag::adapters::{ErrorHandling, FlagSet};
///
/// let mut set = FlagSet::new("demo", ErrorHandling::ContinueOnError);
/// let host = set.string("host", "localhost", "Server host").unwrap();
/// let port = set.int("port", 8080, "Server port").unwrap();
///
/// set.parse(&["-port=9090".to_string(), "serve".to_string()]).unwrap();
///
/// assert_eq!(host.get(), "localhost");
/// assert_eq!(port.get(), 9090);
/// assert_eq!(set.args(), ["serve"]);
/// ```
pub struct FlagSet {
    name: String,
    error_handling: ErrorHandling,
    /// Declared flags, ordered by name
    formal: BTreeMap<String, Flag>,
    /// Names of flags that have been set since declaration
    actual: BTreeSet<String>,
    /// Arguments left over after parsing
    args: Vec<String>,
    parsed: bool,
    output: Box<dyn Write + Send>,
    usage: Option<UsageFn>,
}

impl FlagSet {
    /// Creates an empty flag set.
    ///
    /// The name appears in the usage header; diagnostics go to standard error
    /// until [`FlagSet::set_output`] is called.
    pub fn new(name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        Self {
            name: name.into(),
            error_handling,
            formal: BTreeMap::new(),
            actual: BTreeSet::new(),
            args: Vec::new(),
            parsed: false,
            output: Box::new(io::stderr()),
            usage: None,
        }
    }

    /// The name shown in the usage header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured failure behaviour of [`FlagSet::parse`].
    pub fn error_handling(&self) -> ErrorHandling {
        self.error_handling
    }

    /// Redirects diagnostics and usage text.
    pub fn set_output<W: Write + Send + 'static>(&mut self, output: W) {
        self.output = Box::new(output);
    }

    /// Replaces the default usage text with the output of `usage`.
    pub fn set_usage<F>(&mut self, usage: F)
    where
        F: Fn(&FlagSet) -> String + Send + Sync + 'static,
    {
        self.usage = Some(Box::new(usage));
    }

    /// Declares a flag of a built-in type and returns a handle to its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envflag::adapters::{ErrorHandling, FlagSet};
    ///
    /// let mut set = FlagSet::new("demo", ErrorHandling::ContinueOnError);
    /// let retries = set.define("retries", 3u32, "Retry count").unwrap();
    /// assert_eq!(retries.get(), 3);
    /// assert!(set.define("retries", 5u32, "again").is_err());
    /// ```
    pub fn define<T: FlagType>(
        &mut self,
        name: &str,
        default: T,
        usage: &str,
    ) -> Result<FlagRef<T>> {
        let handle = FlagRef::new(default);
        self.var(name, usage, Box::new(TypedValue::new(handle.clone())))?;
        Ok(handle)
    }

    /// Declares a string flag.
    pub fn string(
        &mut self,
        name: &str,
        default: impl Into<String>,
        usage: &str,
    ) -> Result<FlagRef<String>> {
        self.define(name, default.into(), usage)
    }

    /// Declares a boolean flag.
    pub fn bool(&mut self, name: &str, default: bool, usage: &str) -> Result<FlagRef<bool>> {
        self.define(name, default, usage)
    }

    /// Declares a signed integer flag.
    pub fn int(&mut self, name: &str, default: i64, usage: &str) -> Result<FlagRef<i64>> {
        self.define(name, default, usage)
    }

    /// Declares an unsigned integer flag.
    pub fn uint(&mut self, name: &str, default: u64, usage: &str) -> Result<FlagRef<u64>> {
        self.define(name, default, usage)
    }

    /// Declares a floating point flag.
    pub fn float(&mut self, name: &str, default: f64, usage: &str) -> Result<FlagRef<f64>> {
        self.define(name, default, usage)
    }

    /// Declares a flag backed by a caller-supplied value.
    pub fn var(&mut self, name: &str, usage: &str, value: Box<dyn FlagValue>) -> Result<()> {
        let reason = if name.is_empty() {
            Some("is empty")
        } else if name.starts_with('-') {
            Some("begins with -")
        } else if name.contains('=') {
            Some("contains =")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(FlagError::InvalidName {
                name: name.to_string(),
                reason,
            });
        }
        if self.formal.contains_key(name) {
            return Err(FlagError::Redefined {
                name: name.to_string(),
            });
        }

        self.formal
            .insert(name.to_string(), Flag::new(name, usage, value));
        Ok(())
    }

    /// Looks up a declared flag.
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.formal.get(name)
    }

    /// Sets a declared flag from a string and records it as set.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let flag = self
            .formal
            .get_mut(name)
            .ok_or_else(|| FlagError::NoSuchFlag {
                name: name.to_string(),
            })?;
        flag.set_value(value)?;
        self.actual.insert(name.to_string());
        Ok(())
    }

    /// Returns `true` if the named flag has been set since it was declared.
    pub fn is_set(&self, name: &str) -> bool {
        self.actual.contains(name)
    }

    /// Calls `visitor` for every declared flag in lexicographic order.
    pub fn visit_all<F: FnMut(&Flag)>(&self, mut visitor: F) {
        for flag in self.formal.values() {
            visitor(flag);
        }
    }

    /// Calls `visitor` for every flag that has been set, in lexicographic order.
    pub fn visit<F: FnMut(&Flag)>(&self, mut visitor: F) {
        for name in &self.actual {
            if let Some(flag) = self.formal.get(name) {
                visitor(flag);
            }
        }
    }

    /// The number of flags that have been set.
    pub fn n_flag(&self) -> usize {
        self.actual.len()
    }

    /// Whether [`FlagSet::parse`] has been called.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// The arguments remaining after flags were parsed.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The `i`th remaining argument.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// The number of remaining arguments.
    pub fn n_arg(&self) -> usize {
        self.args.len()
    }

    /// Renders one help entry per declared flag.
    ///
    /// A back-quoted word in a flag's usage replaces the type placeholder, and the
    /// default is shown unless it is the type's zero value.
    pub fn defaults_text(&self) -> String {
        let mut out = String::new();
        for flag in self.formal.values() {
            let mut line = format!("  -{}", flag.name());
            let (placeholder, usage) = unquote_usage(flag);
            if !placeholder.is_empty() {
                line.push(' ');
                line.push_str(&placeholder);
            }
            // One-letter names without a placeholder fit on a single line
            if line.len() <= 4 {
                line.push('\t');
            } else {
                line.push_str("\n    \t");
            }
            line.push_str(&usage.replace('\n', "\n    \t"));

            let value = flag.value();
            if !value.is_zero_value(flag.default_value()) {
                if value.quotes_default() {
                    line.push_str(&format!(" (default {:?})", flag.default_value()));
                } else {
                    line.push_str(&format!(" (default {})", flag.default_value()));
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Writes [`FlagSet::defaults_text`] to the output sink.
    pub fn print_defaults(&mut self) {
        let text = self.defaults_text();
        let _ = self.output.write_all(text.as_bytes());
    }

    /// The full usage text: a header followed by the flag defaults, or the output
    /// of the function installed with [`FlagSet::set_usage`].
    pub fn usage_text(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage(self);
        }
        let header = if self.name.is_empty() {
            "Usage:\n".to_string()
        } else {
            format!("Usage of {}:\n", self.name)
        };
        header + &self.defaults_text()
    }

    /// Writes [`FlagSet::usage_text`] to the output sink.
    pub fn print_usage(&mut self) {
        let text = self.usage_text();
        let _ = self.output.write_all(text.as_bytes());
    }

    /// Parses flags from `arguments`, which must not include the program name.
    ///
    /// On failure a diagnostic and the usage text are written to the output sink,
    /// then the error is returned or the process exits, depending on
    /// [`ErrorHandling`].
    pub fn parse(&mut self, arguments: &[String]) -> Result<()> {
        self.parsed = true;
        self.args = arguments.to_vec();

        loop {
            match self.parse_one() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(err) => {
                    tracing::debug!("Flag set '{}' failed to parse arguments: {}", self.name, err);
                    if self.error_handling == ErrorHandling::ExitOnError {
                        std::process::exit(if err.is_help() { 0 } else { 2 });
                    }
                    return Err(err);
                }
            }
        }

        tracing::debug!(
            "Flag set '{}' parsed {} flag(s), {} argument(s) remaining",
            self.name,
            self.actual.len(),
            self.args.len()
        );
        Ok(())
    }

    /// Parses a single flag. Returns `Ok(false)` when there are no more flags.
    fn parse_one(&mut self) -> Result<bool> {
        let Some(arg) = self.args.first().cloned() else {
            return Ok(false);
        };
        if arg.len() < 2 || !arg.starts_with('-') {
            return Ok(false);
        }

        let mut minuses = 1;
        if arg.as_bytes()[1] == b'-' {
            minuses += 1;
            if arg.len() == 2 {
                // "--" terminates the flags
                self.args.remove(0);
                return Ok(false);
            }
        }

        let body = &arg[minuses..];
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(self.fail(FlagError::BadSyntax {
                argument: arg.clone(),
            }));
        }
        self.args.remove(0);

        let (name, inline_value) = match body.char_indices().skip(1).find(|(_, c)| *c == '=') {
            Some((i, _)) => (body[..i].to_string(), Some(body[i + 1..].to_string())),
            None => (body.to_string(), None),
        };

        let declared = self
            .formal
            .get(&name)
            .map(|flag| flag.value().is_bool_flag());
        let is_bool = match declared {
            Some(is_bool) => is_bool,
            None if name == "help" || name == "h" => {
                self.print_usage();
                return Err(FlagError::HelpRequested);
            }
            None => return Err(self.fail(FlagError::NotDefined { name })),
        };

        if is_bool {
            match inline_value {
                Some(value) => {
                    if let Err(err) = self.set(&name, &value) {
                        return Err(self.fail(FlagError::InvalidBoolValue {
                            name,
                            value,
                            source: Box::new(err),
                        }));
                    }
                }
                None => {
                    if let Err(err) = self.set(&name, "true") {
                        return Err(self.fail(FlagError::InvalidBoolFlag {
                            name,
                            source: Box::new(err),
                        }));
                    }
                }
            }
        } else {
            let value = match inline_value {
                Some(value) => value,
                None if !self.args.is_empty() => self.args.remove(0),
                None => return Err(self.fail(FlagError::MissingArgument { name })),
            };
            if let Err(err) = self.set(&name, &value) {
                return Err(self.fail(FlagError::InvalidValue {
                    name,
                    value,
                    source: Box::new(err),
                }));
            }
        }

        Ok(true)
    }

    /// Reports `err` and the usage text to the output sink.
    fn fail(&mut self, err: FlagError) -> FlagError {
        let _ = writeln!(self.output, "{}", err);
        self.print_usage();
        err
    }
}

/// Extracts a back-quoted placeholder from the usage text, falling back to the
/// value's type name. Boolean flags have no placeholder.
fn unquote_usage(flag: &Flag) -> (String, String) {
    let usage = flag.usage();
    if let Some(start) = usage.find('`') {
        if let Some(len) = usage[start + 1..].find('`') {
            let end = start + 1 + len;
            let placeholder = &usage[start + 1..end];
            let unquoted = format!("{}{}{}", &usage[..start], placeholder, &usage[end + 1..]);
            return (placeholder.to_string(), unquoted);
        }
    }

    let value = flag.value();
    let placeholder = if value.is_bool_flag() {
        ""
    } else {
        value.type_name()
    };
    (placeholder.to_string(), usage.to_string())
}

impl FlagRegistry for FlagSet {
    fn visit_all(&self, visitor: &mut dyn FnMut(&Flag)) {
        FlagSet::visit_all(self, visitor);
    }

    fn visit_all_mut(&mut self, visitor: &mut dyn FnMut(&mut Flag)) {
        for flag in self.formal.values_mut() {
            visitor(flag);
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        FlagSet::set(self, name, value)
    }

    fn parse(&mut self, arguments: &[String]) -> Result<()> {
        FlagSet::parse(self, arguments)
    }

    fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }

    fn print_usage(&mut self) {
        FlagSet::print_usage(self);
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("error_handling", &self.error_handling)
            .field("formal", &self.formal)
            .field("actual", &self.actual)
            .field("args", &self.args)
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}

static COMMAND_LINE: Lazy<Mutex<FlagSet>> = Lazy::new(|| {
    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();
    Mutex::new(FlagSet::new(program, ErrorHandling::ExitOnError))
});

/// Locks and returns the process-wide default flag set.
///
/// It is named after the program and exits the process on parse failure. Hold the
/// guard only while declaring flags; [`crate::parse`] locks it again itself.
///
/// # Deadlocks
///
/// Calling [`crate::parse`] or [`crate::try_parse`] without
/// [`crate::with_flag_set`] while a guard from this function is still alive on
/// the same thread never returns. Drop the guard before parsing.
///
/// # Examples
///
/// ```rust,no_run
/// let verbose = envflag::adapters::command_line()
///     .bool("verbose", false, "Log more")
///     .unwrap();
///
/// envflag::parse(Vec::new());
/// println!("verbose = {}", verbose.get());
/// ```
pub fn command_line() -> MutexGuard<'static, FlagSet> {
    COMMAND_LINE.lock().unwrap_or_else(PoisonError::into_inner)
}

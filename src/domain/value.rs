// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flag values and their string conversions.
//!
//! A flag's value is stored behind the [`FlagValue`] trait so a registry can hold
//! flags of any type side by side and set them from strings. [`FlagType`] is the
//! conversion contract for the built-in types, and [`FlagRef`] is the typed handle
//! a caller keeps to read the value after parsing.

use crate::domain::errors::{FlagError, Result};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// A type-erased, settable flag value.
///
/// Registries only ever talk to values through this trait: they set them from
/// strings and render them back for help text.
///
/// # Examples
///
/// ```
/// use envflag::domain::value::{FlagValue, FlagRef, TypedValue};
///
/// let handle = FlagRef::new(0i64);
/// let mut value = TypedValue::new(handle.clone());
/// value.set("42").unwrap();
/// assert_eq!(handle.get(), 42);
/// assert_eq!(value.get_string(), "42");
/// ```
pub trait FlagValue: Send + Sync {
    /// Converts `value` and stores it, or reports why it cannot be converted.
    fn set(&mut self, value: &str) -> Result<()>;

    /// Renders the current value as a string.
    fn get_string(&self) -> String;

    /// The placeholder shown after the flag name in help text.
    fn type_name(&self) -> &'static str {
        "value"
    }

    /// Boolean flags may appear without a value (`-verbose` means `-verbose=true`).
    fn is_bool_flag(&self) -> bool {
        false
    }

    /// Returns `true` if `default` is the zero value for this type, in which case
    /// help text omits it.
    fn is_zero_value(&self, default: &str) -> bool {
        default.is_empty()
    }

    /// String defaults are shown quoted in help text.
    fn quotes_default(&self) -> bool {
        false
    }
}

/// Conversion contract for the built-in flag types.
///
/// Integers accept `0x`, `0o`, `0b` and leading-`0` octal forms as well as `_`
/// digit separators, so `0x10`, `020` and `1_6` all parse as 16.
pub trait FlagType: Clone + Send + Sync + 'static {
    /// The placeholder shown in help text; empty for booleans.
    const TYPE_NAME: &'static str;

    /// Parses a value from its command-line or environment string form.
    fn parse_flag(raw: &str) -> Result<Self>;

    /// Renders the value the way it should appear in help text.
    fn format_flag(&self) -> String;

    /// The value a flag of this type has when nothing was declared.
    fn zero() -> Self;

    /// Whether a bare `-name` sets the flag to true.
    fn is_bool() -> bool {
        false
    }

    /// Whether the default value is quoted in help text.
    fn quotes_default() -> bool {
        false
    }
}

impl FlagType for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_flag(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }

    fn format_flag(&self) -> String {
        self.clone()
    }

    fn zero() -> Self {
        String::new()
    }

    fn quotes_default() -> bool {
        true
    }
}

impl FlagType for bool {
    const TYPE_NAME: &'static str = "";

    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
    fn parse_flag(raw: &str) -> Result<Self> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(FlagError::conversion(
                raw,
                "bool",
                "invalid syntax".to_string(),
            )),
        }
    }

    fn format_flag(&self) -> String {
        self.to_string()
    }

    fn zero() -> Self {
        false
    }

    fn is_bool() -> bool {
        true
    }
}

/// Splits an integer literal into a sign-prefixed digit string and its radix.
///
/// Accepts `0x`, `0o` and `0b` prefixes, a leading `0` for octal, and `_`
/// between digits or after a base prefix. Returns `None` for malformed
/// underscores or a sign after the prefix.
fn int_literal(raw: &str) -> Option<(String, u32)> {
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'-') => ("-", &raw[1..]),
        Some(b'+') => ("", &raw[1..]),
        _ => ("", raw),
    };

    let (radix, digits, prefixed) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..], true),
        Some("0o" | "0O") => (8, &rest[2..], true),
        Some("0b" | "0B") => (2, &rest[2..], true),
        _ if rest.len() > 1 && rest.starts_with('0') => (8, &rest[1..], true),
        _ => (10, rest, false),
    };

    if digits.starts_with(&['+', '-'][..]) {
        return None;
    }
    if digits.contains('_') {
        let bad_start = digits.starts_with('_') && !prefixed;
        if bad_start || digits.ends_with('_') || digits.contains("__") {
            return None;
        }
    }

    Some((format!("{}{}", sign, digits.replace('_', "")), radix))
}

macro_rules! int_flag_type {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FlagType for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_flag(raw: &str) -> Result<Self> {
                    let (digits, radix) = int_literal(raw).ok_or_else(|| {
                        FlagError::conversion(raw, $name, "invalid syntax".to_string())
                    })?;
                    <$ty>::from_str_radix(&digits, radix)
                        .map_err(|e| FlagError::conversion(raw, $name, e))
                }

                fn format_flag(&self) -> String {
                    self.to_string()
                }

                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

int_flag_type! {
    i32 => "int",
    i64 => "int",
    u32 => "uint",
    u64 => "uint",
}

impl FlagType for f64 {
    const TYPE_NAME: &'static str = "float";

    fn parse_flag(raw: &str) -> Result<Self> {
        raw.parse::<f64>()
            .map_err(|e| FlagError::conversion(raw, "float", e))
    }

    fn format_flag(&self) -> String {
        self.to_string()
    }

    fn zero() -> Self {
        0.0
    }
}

/// A shared, typed handle to a flag's current value.
///
/// Cloning the handle shares the underlying value; the registry writes through
/// one clone while the caller reads through another.
///
/// # Examples
///
/// ```
/// use envflag::domain::value::FlagRef;
///
/// let port = FlagRef::new(8080u32);
/// let alias = port.clone();
/// alias.replace(9090);
/// assert_eq!(port.get(), 9090);
/// ```
pub struct FlagRef<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: Clone> FlagRef<T> {
    /// Creates a handle holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrites the current value.
    pub fn replace(&self, value: T) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl<T> Clone for FlagRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for FlagRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FlagRef").field(&self.get()).finish()
    }
}

/// [`FlagValue`] implementation backed by a [`FlagRef`] of a built-in type.
pub struct TypedValue<T> {
    slot: FlagRef<T>,
}

impl<T: FlagType> TypedValue<T> {
    /// Wraps a handle so a registry can set it from strings.
    pub fn new(slot: FlagRef<T>) -> Self {
        Self { slot }
    }
}

impl<T: FlagType> FlagValue for TypedValue<T> {
    fn set(&mut self, value: &str) -> Result<()> {
        let parsed = T::parse_flag(value)?;
        self.slot.replace(parsed);
        Ok(())
    }

    fn get_string(&self) -> String {
        self.slot.get().format_flag()
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn is_bool_flag(&self) -> bool {
        T::is_bool()
    }

    fn is_zero_value(&self, default: &str) -> bool {
        default == T::zero().format_flag()
    }

    fn quotes_default(&self) -> bool {
        T::quotes_default()
    }
}

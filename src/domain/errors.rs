// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the envflag crate.
//!
//! Two layers of errors live here. [`FlagError`] covers everything a flag
//! registry can report: bad definitions, values that fail to convert, and
//! arguments that fail to parse. [`EnvFlagError`] is what the override engine
//! reports, and knows which process exit status each failure maps to.

use thiserror::Error;

/// Errors reported by a flag registry.
///
/// Marked `#[non_exhaustive]` so new registry failures can be added without
/// breaking callers that match on it.
///
/// # Examples
///
/// ```
/// use envflag::domain::errors::FlagError;
///
/// let err = FlagError::NotDefined { name: "bazinga".to_string() };
/// assert_eq!(err.to_string(), "flag provided but not defined: -bazinga");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// A flag with this name is already declared.
    #[error("flag redefined: {name}")]
    Redefined {
        /// The duplicated flag name
        name: String,
    },

    /// The flag name cannot be declared.
    #[error("flag {name:?} {reason}")]
    InvalidName {
        /// The rejected flag name
        name: String,
        /// Why the name was rejected
        reason: &'static str,
    },

    /// A value was set on a flag that was never declared.
    #[error("no such flag -{name}")]
    NoSuchFlag {
        /// The unknown flag name
        name: String,
    },

    /// A string could not be converted to the flag's declared type.
    #[error("cannot parse {value:?} as {target_type}: {source}")]
    Conversion {
        /// The string that failed to convert
        value: String,
        /// The name of the type it was converted to
        target_type: &'static str,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// `-help` or `-h` was given without being declared.
    #[error("flag: help requested")]
    HelpRequested,

    /// An argument named a flag that is not declared.
    #[error("flag provided but not defined: -{name}")]
    NotDefined {
        /// The undeclared flag name
        name: String,
    },

    /// An argument looked like a flag but was malformed.
    #[error("bad flag syntax: {argument}")]
    BadSyntax {
        /// The offending argument
        argument: String,
    },

    /// A non-boolean flag was the last argument and had no value.
    #[error("flag needs an argument: -{name}")]
    MissingArgument {
        /// The flag missing its value
        name: String,
    },

    /// An argument value could not be set on its flag.
    #[error("invalid value {value:?} for flag -{name}: {source}")]
    InvalidValue {
        /// The flag name
        name: String,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        source: Box<FlagError>,
    },

    /// An explicit `-name=value` for a boolean flag was rejected.
    #[error("invalid boolean value {value:?} for -{name}: {source}")]
    InvalidBoolValue {
        /// The flag name
        name: String,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        source: Box<FlagError>,
    },

    /// A bare boolean flag could not be set to true.
    #[error("invalid boolean flag {name}: {source}")]
    InvalidBoolFlag {
        /// The flag name
        name: String,
        /// Why the value was rejected
        source: Box<FlagError>,
    },
}

impl FlagError {
    /// Creates a conversion error from any error type.
    pub fn conversion<E>(value: &str, target_type: &'static str, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        FlagError::Conversion {
            value: value.to_string(),
            target_type,
            source: err.into(),
        }
    }

    /// Returns `true` if this is a help request rather than a real failure.
    pub fn is_help(&self) -> bool {
        matches!(self, FlagError::HelpRequested)
    }
}

/// Errors reported by the override engine.
///
/// Both variants are terminal: [`crate::service::apply`] turns them into a call
/// to the configured exit callback using [`EnvFlagError::exit_code`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvFlagError {
    /// An environment variable's value could not be set on its flag.
    #[error("Unable to set flag {flag} value to {value} from environment: {source}")]
    EnvironmentConversion {
        /// The flag being set
        flag: String,
        /// The environment variable the value came from
        variable: String,
        /// The value of the environment variable
        value: String,
        /// The registry's reason for rejecting the value
        source: FlagError,
    },

    /// The registry rejected the argument list, or help was requested.
    #[error("{0}")]
    ArgumentParse(#[from] FlagError),
}

impl EnvFlagError {
    /// The process exit status for this failure: 0 for a help request, 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_help() {
            0
        } else {
            2
        }
    }

    /// Returns `true` if the argument list asked for help.
    pub fn is_help(&self) -> bool {
        matches!(self, EnvFlagError::ArgumentParse(FlagError::HelpRequested))
    }
}

/// A specialized Result type for flag registry operations.
pub type Result<T> = std::result::Result<T, FlagError>;

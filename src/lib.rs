// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable overrides for command-line flags.
//!
//! Every registered flag may also be set from an environment variable whose name
//! is derived from the flag name. Values are applied with this precedence, lowest
//! first:
//!
//! 1. the flag's default value
//! 2. the matching environment variable
//! 3. an explicit command-line argument
//!
//! # Architecture
//!
//! - **Domain Layer**: flags, typed values, name mappers, and errors
//! - **Ports**: the [`FlagRegistry`](ports::FlagRegistry) and
//!   [`Environment`](ports::Environment) traits
//! - **Adapters**: the bundled [`FlagSet`](adapters::FlagSet) registry and
//!   environment lookups
//! - **Service**: option resolution and the override pipeline
//!
//! # Variable names
//!
//! By default a flag name is uppercased and every `-` and `.` becomes `_`, so
//! `log-level` is read from `LOG_LEVEL`. [`with_prefix`] prepends a string to the
//! derived name, and [`with_mapper`] replaces the mapping altogether.
//!
//! Unless disabled with [`with_show_in_usage`], each flag's usage text is prefixed
//! with the variable name, for example `[LOG_LEVEL] Log level`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use envflag::adapters::command_line;
//!
//! let port = command_line().uint("port", 8080, "Port to listen on").unwrap();
//! let host = command_line()
//!     .string("host", "localhost", "Host to bind")
//!     .unwrap();
//!
//! // PORT=9000 ./server -host 0.0.0.0
//! envflag::parse(Vec::new());
//!
//! println!("listening on {}:{}", host.get(), port.get());
//! ```
//!
//! # Custom flag sets
//!
//! ```rust
//! use envflag::adapters::{ErrorHandling, FlagSet, MapEnvironment};
//! use envflag::{with_arguments, with_environment, with_flag_set, with_prefix};
//!
//! let mut set = FlagSet::new("demo", ErrorHandling::ContinueOnError);
//! let name = set.string("name", "world", "Who to greet").unwrap();
//! let loud = set.bool("loud", false, "Shout").unwrap();
//!
//! envflag::try_parse(vec![
//!     with_flag_set(&mut set),
//!     with_prefix("DEMO_"),
//!     with_environment(MapEnvironment::from([("DEMO_NAME", "env"), ("DEMO_LOUD", "true")])),
//!     with_arguments(["-name", "args"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(name.get(), "args");
//! assert!(loud.get());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{EnvFlagError, FlagError};
pub use service::{
    with_arguments, with_environment, with_exit, with_flag_set, with_mapper, with_prefix,
    with_show_in_usage, EnvFlagBuilder, ParseOption,
};

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        command_line, ErrorHandling, FlagSet, MapEnvironment, ProcessEnvironment,
    };
    pub use crate::domain::{EnvFlagError, FlagError, FlagRef, FlagType, FlagValue, Result};
    pub use crate::ports::{Environment, FlagRegistry};
    pub use crate::service::{
        with_arguments, with_environment, with_exit, with_flag_set, with_mapper, with_prefix,
        with_show_in_usage, EnvFlagBuilder, ParseOption,
    };
}

/// Applies environment overrides and then parses the arguments.
///
/// Without options this operates on [`adapters::command_line`] with the process
/// arguments and environment. When help is requested the process exits with
/// status 0; any other failure prints a diagnostic and the usage text and exits
/// with status 2. Use [`with_exit`] to intercept the exit.
pub fn parse<'a, I>(options: I)
where
    I: IntoIterator<Item = ParseOption<'a>>,
{
    service::apply(service::Config::resolve(options))
}

/// Like [`parse`], but returns the failure instead of exiting.
///
/// # Errors
///
/// Returns [`EnvFlagError::EnvironmentConversion`] when a variable holds a value
/// the flag rejects, and [`EnvFlagError::ArgumentParse`] when argument parsing
/// fails or help was requested.
pub fn try_parse<'a, I>(options: I) -> std::result::Result<(), EnvFlagError>
where
    I: IntoIterator<Item = ParseOption<'a>>,
{
    service::try_apply(service::Config::resolve(options))
}

/// Starts a fluent [`EnvFlagBuilder`].
pub fn builder<'a>() -> EnvFlagBuilder<'a> {
    EnvFlagBuilder::new()
}

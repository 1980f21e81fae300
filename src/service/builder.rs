// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fluent front end over the parse options.

use crate::domain::EnvFlagError;
use crate::ports::{Environment, FlagRegistry};
use crate::service::config::{self, Config, ParseOption};
use crate::service::engine;

/// Builder for a single environment-aware parse.
///
/// Each method appends the matching [`ParseOption`], so ordering rules are the
/// same as for [`crate::parse`]: later settings win, and each prefix wraps the
/// mapper current when it is added.
///
/// # Examples
///
/// ```rust
/// use envflag::adapters::{ErrorHandling, FlagSet, MapEnvironment};
/// use envflag::service::EnvFlagBuilder;
///
/// let mut set = FlagSet::new("demo", ErrorHandling::ContinueOnError);
/// let level = set.string("log-level", "info", "Log level").unwrap();
///
/// EnvFlagBuilder::new()
///     .flag_set(&mut set)
///     .prefix("DEMO_")
///     .environment(MapEnvironment::from([("DEMO_LOG_LEVEL", "debug")]))
///     .arguments(Vec::<String>::new())
///     .try_parse()
///     .unwrap();
///
/// assert_eq!(level.get(), "debug");
/// ```
#[derive(Debug, Default)]
pub struct EnvFlagBuilder<'a> {
    options: Vec<ParseOption<'a>>,
}

impl<'a> EnvFlagBuilder<'a> {
    /// Creates a builder with no options.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Appends an arbitrary option.
    pub fn option(mut self, option: ParseOption<'a>) -> Self {
        self.options.push(option);
        self
    }

    /// See [`config::with_flag_set`].
    pub fn flag_set(self, registry: &'a mut (dyn FlagRegistry + 'a)) -> Self {
        self.option(config::with_flag_set(registry))
    }

    /// See [`config::with_show_in_usage`].
    pub fn show_in_usage(self, show_in_usage: bool) -> Self {
        self.option(config::with_show_in_usage(show_in_usage))
    }

    /// See [`config::with_prefix`].
    pub fn prefix(self, prefix: impl Into<String>) -> Self {
        self.option(config::with_prefix(prefix))
    }

    /// See [`config::with_mapper`].
    pub fn mapper<F>(self, mapper: F) -> Self
    where
        F: Fn(&str) -> String + 'a,
    {
        self.option(config::with_mapper(mapper))
    }

    /// See [`config::with_arguments`].
    pub fn arguments<I, S>(self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option(config::with_arguments(arguments))
    }

    /// See [`config::with_environment`].
    pub fn environment<E>(self, environment: E) -> Self
    where
        E: Environment + 'a,
    {
        self.option(config::with_environment(environment))
    }

    /// See [`config::with_exit`].
    pub fn exit<F>(self, exit: F) -> Self
    where
        F: FnMut(i32) + 'a,
    {
        self.option(config::with_exit(exit))
    }

    /// Resolves the options into a [`Config`].
    pub fn build(self) -> Config<'a> {
        Config::resolve(self.options)
    }

    /// Resolves and runs the parse, exiting through the exit callback on failure.
    pub fn parse(self) {
        engine::apply(self.build())
    }

    /// Resolves and runs the parse, returning any failure.
    pub fn try_parse(self) -> Result<(), EnvFlagError> {
        engine::try_apply(self.build())
    }
}

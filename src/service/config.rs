// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration resolver.
//!
//! A [`Config`] is built once per parse from defaults overlaid with
//! [`ParseOption`]s, applied left to right. Later options overwrite earlier ones
//! for the same setting, except [`with_prefix`], which wraps whatever mapper is
//! current when it is applied.

use crate::adapters::ProcessEnvironment;
use crate::domain::mapper::{default_mapper, prefixed, Mapper};
use crate::ports::{Environment, FlagRegistry};
use std::ffi::OsString;
use std::fmt;

/// Called with the process exit status when parsing fails or help is requested.
pub type ExitFn<'a> = Box<dyn FnMut(i32) + 'a>;

/// Which registry the override engine drives.
pub(crate) enum RegistryTarget<'a> {
    /// The process-wide set returned by [`crate::adapters::command_line`]
    CommandLine,
    /// A registry owned by the caller
    Borrowed(&'a mut (dyn FlagRegistry + 'a)),
}

/// The resolved settings for one parse.
///
/// # Examples
///
/// ```rust
/// use envflag::service::{with_arguments, with_prefix, Config};
///
/// let config = Config::resolve(vec![
///     with_prefix("MYAPP_"),
///     with_arguments(["-verbose"]),
/// ]);
///
/// assert_eq!(config.env_name("log-level"), "MYAPP_LOG_LEVEL");
/// assert_eq!(config.arguments(), ["-verbose"]);
/// assert!(config.show_in_usage());
/// ```
pub struct Config<'a> {
    pub(crate) registry: RegistryTarget<'a>,
    pub(crate) show_in_usage: bool,
    pub(crate) mapper: Mapper<'a>,
    pub(crate) arguments: Vec<String>,
    pub(crate) exit: ExitFn<'a>,
    pub(crate) environment: Box<dyn Environment + 'a>,
}

impl<'a> Config<'a> {
    /// Builds a configuration from the defaults and `options`, applied in order.
    ///
    /// Defaults: the process-wide flag set, usage annotation on, the default
    /// mapper, the process arguments without the program name, process
    /// environment lookups, and `std::process::exit`.
    pub fn resolve<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ParseOption<'a>>,
    {
        let mut config = Self {
            registry: RegistryTarget::CommandLine,
            show_in_usage: true,
            mapper: Box::new(default_mapper),
            arguments: std::env::args_os().skip(1).map(argument_string).collect(),
            exit: Box::new(|code: i32| std::process::exit(code)),
            environment: Box::new(ProcessEnvironment),
        };

        for option in options {
            option.apply(&mut config);
        }

        config
    }

    /// Whether flag usage text will be annotated with variable names.
    pub fn show_in_usage(&self) -> bool {
        self.show_in_usage
    }

    /// The arguments that will be parsed.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The environment variable name the mapper derives for `flag_name`.
    pub fn env_name(&self, flag_name: &str) -> String {
        (self.mapper)(flag_name)
    }

    /// Returns `true` if the process-wide flag set will be used.
    pub fn uses_command_line(&self) -> bool {
        matches!(self.registry, RegistryTarget::CommandLine)
    }
}

/// Converts a process argument, replacing invalid UTF-8 sequences.
fn argument_string(arg: OsString) -> String {
    match arg.into_string() {
        Ok(arg) => arg,
        Err(arg) => {
            let lossy = arg.to_string_lossy().into_owned();
            tracing::warn!(
                "Argument {:?} is not valid UTF-8; parsing it as {:?}",
                arg,
                lossy
            );
            lossy
        }
    }
}

impl fmt::Debug for Config<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("command_line", &self.uses_command_line())
            .field("show_in_usage", &self.show_in_usage)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// A single setting applied to a [`Config`] during resolution.
pub struct ParseOption<'a>(Box<dyn FnOnce(&mut Config<'a>) + 'a>);

impl<'a> ParseOption<'a> {
    fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Config<'a>) + 'a,
    {
        ParseOption(Box::new(f))
    }

    fn apply(self, config: &mut Config<'a>) {
        (self.0)(config)
    }
}

impl fmt::Debug for ParseOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParseOption")
    }
}

/// Operates on `registry` instead of the process-wide flag set.
pub fn with_flag_set<'a>(registry: &'a mut (dyn FlagRegistry + 'a)) -> ParseOption<'a> {
    ParseOption::new(move |c| c.registry = RegistryTarget::Borrowed(registry))
}

/// Whether each flag's usage text is prefixed with `[VARIABLE_NAME] `. Defaults to true.
pub fn with_show_in_usage<'a>(show_in_usage: bool) -> ParseOption<'a> {
    ParseOption::new(move |c| c.show_in_usage = show_in_usage)
}

/// Prefixes every derived variable name with `prefix`.
///
/// The prefix wraps the mapper current at the time the option is applied, so
/// `with_prefix("A_")` followed by `with_prefix("B_")` maps `my-flag` to
/// `B_A_MY_FLAG`.
pub fn with_prefix<'a>(prefix: impl Into<String>) -> ParseOption<'a> {
    let prefix = prefix.into();
    ParseOption::new(move |c| {
        let inner = std::mem::replace(&mut c.mapper, Box::new(default_mapper));
        c.mapper = prefixed(prefix, inner);
    })
}

/// Replaces the mapper outright. Prefixes applied after this option wrap `mapper`.
pub fn with_mapper<'a, F>(mapper: F) -> ParseOption<'a>
where
    F: Fn(&str) -> String + 'a,
{
    ParseOption::new(move |c| c.mapper = Box::new(mapper))
}

/// The arguments to parse into flags. Defaults to the process arguments without
/// the program name.
///
/// A flag given both here and in the environment takes the value given here.
pub fn with_arguments<'a, I, S>(arguments: I) -> ParseOption<'a>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let arguments: Vec<String> = arguments.into_iter().map(Into::into).collect();
    ParseOption::new(move |c| c.arguments = arguments)
}

/// Where variables are looked up. Defaults to the process environment.
pub fn with_environment<'a, E>(environment: E) -> ParseOption<'a>
where
    E: Environment + 'a,
{
    ParseOption::new(move |c| c.environment = Box::new(environment))
}

/// Replaces the exit call made on failure or help.
///
/// Intended for tests, which need to observe the status without terminating.
pub fn with_exit<'a, F>(exit: F) -> ParseOption<'a>
where
    F: FnMut(i32) + 'a,
{
    ParseOption::new(move |c| c.exit = Box::new(exit))
}

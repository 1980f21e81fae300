// SPDX-License-Identifier: MIT OR Apache-2.0

//! The override engine.
//!
//! Runs the pipeline for one resolved [`Config`]: annotate usage text, apply
//! environment overrides, then parse the argument list so explicit arguments
//! win. Failures stop the pipeline at once.

use crate::adapters::command_line;
use crate::domain::EnvFlagError;
use crate::ports::{Environment, FlagRegistry};
use crate::service::config::{Config, ExitFn, RegistryTarget};

/// Runs the pipeline and calls the configured exit callback on failure:
/// status 0 if help was requested, 2 for anything else.
///
/// Returns normally when every flag was set successfully, and also when a
/// non-terminating exit callback returns.
pub fn apply(config: Config<'_>) {
    let (result, mut exit) = execute(config);
    if let Err(err) = result {
        tracing::debug!("Exiting with status {}: {}", err.exit_code(), err);
        exit(err.exit_code());
    }
}

/// Runs the pipeline and returns the failure instead of calling the exit callback.
///
/// Diagnostics and usage text are still written to the registry's output sink.
pub fn try_apply(config: Config<'_>) -> Result<(), EnvFlagError> {
    execute(config).0
}

fn execute<'a>(config: Config<'a>) -> (Result<(), EnvFlagError>, ExitFn<'a>) {
    let Config {
        registry,
        show_in_usage,
        mapper,
        arguments,
        exit,
        environment,
    } = config;

    let result = match registry {
        RegistryTarget::CommandLine => override_flags(
            &mut *command_line(),
            show_in_usage,
            &*mapper,
            &arguments,
            &*environment,
        ),
        RegistryTarget::Borrowed(registry) => override_flags(
            registry,
            show_in_usage,
            &*mapper,
            &arguments,
            &*environment,
        ),
    };

    (result, exit)
}

fn override_flags(
    registry: &mut dyn FlagRegistry,
    show_in_usage: bool,
    mapper: &dyn Fn(&str) -> String,
    arguments: &[String],
    environment: &dyn Environment,
) -> Result<(), EnvFlagError> {
    if show_in_usage {
        update_usage(registry, mapper);
    }

    set_values_from_env(registry, mapper, environment)?;

    registry.parse(arguments)?;
    tracing::debug!("Parsed {} argument(s)", arguments.len());
    Ok(())
}

/// Prefixes each flag's usage text with `[VARIABLE_NAME] `, unless it already
/// starts with exactly that prefix.
///
/// Only an identical prefix is detected. Running this again with a different
/// mapper (for example a different `with_prefix`) adds a second bracketed name
/// in front of the first rather than replacing it.
pub fn update_usage(registry: &mut dyn FlagRegistry, mapper: &dyn Fn(&str) -> String) {
    registry.visit_all_mut(&mut |flag| {
        let prefix = format!("[{}] ", mapper(flag.name()));
        if !flag.usage().starts_with(&prefix) {
            tracing::trace!("Annotating usage of flag '{}' with {}", flag.name(), prefix.trim_end());
            let usage = format!("{}{}", prefix, flag.usage());
            flag.set_usage(usage);
        }
    });
}

/// Sets every flag whose mapped variable exists in `environment`.
///
/// The first value the registry rejects is reported to its output sink along
/// with the usage text, and no further flags are set.
pub fn set_values_from_env(
    registry: &mut dyn FlagRegistry,
    mapper: &dyn Fn(&str) -> String,
    environment: &dyn Environment,
) -> Result<(), EnvFlagError> {
    for name in registry.flag_names() {
        let variable = mapper(&name);
        let Some(value) = environment.lookup(&variable) else {
            continue;
        };

        match registry.set(&name, &value) {
            Ok(()) => {
                tracing::debug!("Set flag '{}' from environment variable '{}'", name, variable);
            }
            Err(source) => {
                let err = EnvFlagError::EnvironmentConversion {
                    flag: name,
                    variable,
                    value,
                    source,
                };
                let _ = writeln!(registry.output(), "{}", err);
                registry.print_usage();
                return Err(err);
            }
        }
    }
    Ok(())
}

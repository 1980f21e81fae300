// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: resolving options and running the override pipeline.
//!
//! [`Config::resolve`] turns a list of [`ParseOption`]s into the settings for one
//! parse, and [`apply`] / [`try_apply`] run the pipeline against them.

pub mod builder;
pub mod config;
pub mod engine;

// Re-export commonly used types
pub use builder::EnvFlagBuilder;
pub use config::{
    with_arguments, with_environment, with_exit, with_flag_set, with_mapper, with_prefix,
    with_show_in_usage, Config, ExitFn, ParseOption,
};
pub use engine::{apply, set_values_from_env, try_apply, update_usage};

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! The bundled flag registry, environment lookups, and an in-memory output sink.

pub mod env_var;
pub mod flag_set;
pub mod output;

pub use env_var::{MapEnvironment, ProcessEnvironment};
pub use flag_set::{command_line, ErrorHandling, FlagSet, UsageFn};
pub use output::SharedBuffer;

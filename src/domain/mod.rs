// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the core types.
//!
//! Flags, their values, the flag-name to variable-name mapping, and errors. Nothing
//! here touches the process environment or argument list.

pub mod errors;
pub mod flag;
pub mod mapper;
pub mod value;

// Re-export commonly used types
pub use errors::{EnvFlagError, FlagError, Result};
pub use flag::Flag;
pub use mapper::{default_mapper, prefixed, Mapper};
pub use value::{FlagRef, FlagType, FlagValue, TypedValue};

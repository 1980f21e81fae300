// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams the override engine is written against. The adapters
//! layer provides the bundled implementations.

pub mod environment;
pub mod registry;

// Re-export commonly used types
pub use environment::Environment;
pub use registry::FlagRegistry;

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests.

use envflag::adapters::{ErrorHandling, FlagSet, SharedBuffer};
use std::cell::RefCell;
use std::env;
use std::rc::Rc;

/// Sets process environment variables and removes them again on drop.
///
/// Tests using it must pick variable names no other test reads.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// Records every status passed to the exit callback.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct ExitRecorder {
    codes: Rc<RefCell<Vec<i32>>>,
}

#[allow(dead_code)]
impl ExitRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for `with_exit`.
    pub fn callback(&self) -> impl FnMut(i32) + 'static {
        let codes = Rc::clone(&self.codes);
        move |code| codes.borrow_mut().push(code)
    }

    pub fn codes(&self) -> Vec<i32> {
        self.codes.borrow().clone()
    }

    /// The first recorded status, if any.
    pub fn code(&self) -> Option<i32> {
        self.codes.borrow().first().copied()
    }
}

/// A non-exiting flag set named `test` writing to an in-memory buffer.
#[allow(dead_code)]
pub fn test_flag_set() -> (FlagSet, SharedBuffer) {
    let output = SharedBuffer::new();
    let mut set = FlagSet::new("test", ErrorHandling::ContinueOnError);
    set.set_output(output.clone());
    (set, output)
}

/// Routes `tracing` output through the test harness.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

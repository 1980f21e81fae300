// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-memory output sink that can be shared with a flag set.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A clonable byte buffer implementing [`Write`].
///
/// Give one clone to [`crate::adapters::FlagSet::set_output`] and keep another to
/// read back what was written.
///
/// # Examples
///
/// ```rust
/// use envflag::adapters::SharedBuffer;
/// use std::io::Write;
///
/// let buf = SharedBuffer::new();
/// let mut writer = buf.clone();
/// write!(writer, "Usage of test:").unwrap();
/// assert_eq!(buf.contents(), "Usage of test:");
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! In-memory file backend.
//!
//! [`crate::file::memory::Memory`] owns a byte buffer and serves it through the
//! [`crate::file::Backend`] trait. It is used for images that are already in memory, such as
//! embedded assemblies, fuzzing input or test fixtures.

use super::Backend;
use crate::{Error::OutOfBounds, Result};

/// A file backend over an owned byte buffer.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new in-memory backend that takes ownership of `data`.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

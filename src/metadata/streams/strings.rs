//! The `#Strings` heap (ECMA-335 II.24.2.3).
//!
//! Identifiers (type, member and namespace names) are stored as NUL terminated UTF-8 strings;
//! tables reference them by byte offset. Offset `0` is always the empty string.

use std::{ffi::CStr, str};

use crate::{Error::OutOfBounds, Result};

/// View over the `#Strings` heap.
///
/// # Examples
///
/// ```rust,ignore
/// use serialscope::metadata::streams::Strings;
///
/// let heap = Strings::from(b"\0Foo\0System\0")?;
/// assert_eq!(heap.get(1)?, "Foo");
/// assert_eq!(heap.get(5)?, "System");
/// # Ok::<(), serialscope::Error>(())
/// ```
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Creates a view over the heap data.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with the
    /// mandatory empty string.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #String heap is empty"));
        }

        Ok(Strings { data })
    }

    /// Returns the string starting at byte offset `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is past the heap and
    /// [`crate::Error::Malformed`] if the string is unterminated or not UTF-8.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        match CStr::from_bytes_until_nul(&self.data[index..]) {
            Ok(result) => match result.to_str() {
                Ok(result) => Ok(result),
                Err(_) => Err(malformed_error!("Invalid string at index - {}", index)),
            },
            Err(_) => Err(malformed_error!("Invalid string at index - {}", index)),
        }
    }
}

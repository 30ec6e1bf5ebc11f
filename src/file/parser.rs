//! Cursor-based reader for metadata blobs.
//!
//! [`crate::file::parser::Parser`] keeps a position inside a byte slice and provides the
//! decoding primitives ECMA-335 signatures and heaps are built from: little-endian integers,
//! compressed unsigned integers (II.23.2) and compressed `TypeDefOrRef` tokens (II.23.2.8).
//! Every read is bounds checked; a read past the end returns [`crate::Error::OutOfBounds`]
//! and leaves the position unchanged.

use crate::{
    file::io::{read_le_at, CilIO},
    metadata::token::Token,
    Error::OutOfBounds,
    Result,
};

/// A binary data parser for reading .NET metadata structures.
///
/// # Examples
///
/// ```rust,ignore
/// use serialscope::file::parser::Parser;
///
/// let data = [0x06, 0x08];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_le::<u8>()?, 0x06);
/// assert_eq!(parser.read_compressed_uint()?, 0x08);
/// assert!(!parser.has_more_data());
/// # Ok::<(), serialscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying data buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there are unread bytes left.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Returns the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Move the position forward by one byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the parser is already at the end.
    pub fn advance(&mut self) -> Result<()> {
        if self.position >= self.data.len() {
            return Err(OutOfBounds);
        }

        self.position += 1;
        Ok(())
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the parser is at the end.
    pub fn peek_byte(&self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(OutOfBounds),
        }
    }

    /// Read a value of type `T` in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    pub fn read_le<T: CilIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a compressed unsigned integer (ECMA-335 II.23.2).
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input, or
    /// [`crate::Error::Malformed`] if the leading byte uses the reserved `111xxxxx` pattern.
    pub fn read_compressed_uint(&mut self) -> Result<u32> {
        let start = self.position;
        let first_byte = self.read_le::<u8>()?;

        // 1-byte encoding: 0xxxxxxx
        if (first_byte & 0x80) == 0 {
            return Ok(u32::from(first_byte));
        }

        // 2-byte encoding: 10xxxxxx xxxxxxxx
        if (first_byte & 0xC0) == 0x80 {
            let Ok(second_byte) = self.read_le::<u8>() else {
                self.position = start;
                return Err(OutOfBounds);
            };

            return Ok(((u32::from(first_byte) & 0x3F) << 8) | u32::from(second_byte));
        }

        // 4-byte encoding: 11xxxxxx xxxxxxxx xxxxxxxx xxxxxxxx
        if (first_byte & 0xE0) == 0xC0 {
            if self.data.len() - self.position < 3 {
                self.position = start;
                return Err(OutOfBounds);
            }

            let b1 = u32::from(self.read_le::<u8>()?);
            let b2 = u32::from(self.read_le::<u8>()?);
            let b3 = u32::from(self.read_le::<u8>()?);
            return Ok(((u32::from(first_byte) & 0x1F) << 24) | (b1 << 16) | (b2 << 8) | b3);
        }

        self.position = start;
        Err(malformed_error!("Invalid compressed uint - {}", first_byte))
    }

    /// Read a compressed signed integer (ECMA-335 II.23.2).
    ///
    /// The value is rotated left by one bit before compression, the sign ends up in the
    /// lowest bit.
    ///
    /// # Errors
    /// See [`Parser::read_compressed_uint`].
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_compressed_int(&mut self) -> Result<i32> {
        let first_byte = self.peek_byte()?;
        let raw = self.read_compressed_uint()?;

        let sign_extension: u32 = if first_byte & 0x80 == 0 {
            0xFFFF_FFC0
        } else if first_byte & 0xC0 == 0x80 {
            0xFFFF_E000
        } else {
            0xF000_0000
        };

        let value = raw >> 1;
        if raw & 1 == 0 {
            Ok(value as i32)
        } else {
            Ok((value | sign_extension) as i32)
        }
    }

    /// Read a compressed `TypeDefOrRef` token (ECMA-335 II.23.2.8).
    ///
    /// The two low bits select the table (`TypeDef`, `TypeRef`, `TypeSpec`), the remaining
    /// bits are the row.
    ///
    /// # Errors
    /// Returns an error if the compressed integer is invalid or the table tag is `3`.
    pub fn read_compressed_token(&mut self) -> Result<Token> {
        let compressed_token = self.read_compressed_uint()?;

        let table: u32 = match compressed_token & 0x3 {
            0x0 => 0x0200_0000, // TypeDef
            0x1 => 0x0100_0000, // TypeRef
            0x2 => 0x1B00_0000, // TypeSpec
            _ => {
                return Err(malformed_error!(
                    "Invalid compressed token - {}",
                    compressed_token
                ))
            }
        };

        Ok(Token::new(table | (compressed_token >> 2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_read_compressed_uint() {
        let test_cases = vec![
            (vec![0x03], 3),                             // 1-byte format
            (vec![0x7F], 0x7F),                          // 1-byte format, max value
            (vec![0x80, 0x80], 0x80),                    // 2-byte format, min value
            (vec![0xBF, 0xFF], 0x3FFF),                  // 2-byte format, max value
            (vec![0xC0, 0x00, 0x00, 0x00], 0x00),        // 4-byte format, min value
            (vec![0xDF, 0xFF, 0xFF, 0xFF], 0x1FFF_FFFF), // 4-byte format, max value
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            let result = parser.read_compressed_uint().unwrap();
            assert_eq!(result, expected);
            assert!(!parser.has_more_data());
        }

        let mut parser = Parser::new(&[]);
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::OutOfBounds)
        ));

        let mut parser = Parser::new(&[0xE0]);
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::Malformed { .. })
        ));
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn test_truncated_compressed_uint_keeps_position() {
        let mut parser = Parser::new(&[0xC0, 0x01]);
        assert!(matches!(
            parser.read_compressed_uint(),
            Err(Error::OutOfBounds)
        ));
        assert_eq!(parser.pos(), 0);
    }

    #[test]
    fn test_read_compressed_int() {
        let test_cases = vec![
            (vec![0x06], 3),
            (vec![0x7B], -3),
            (vec![0x80, 0x80], 64),
            (vec![0x01], -64),
            (vec![0xC0, 0x00, 0x40, 0x00], 8192),
            (vec![0x80, 0x01], -8192),
            (vec![0xDF, 0xFF, 0xFF, 0xFE], 268_435_455),
            (vec![0xC0, 0x00, 0x00, 0x01], -268_435_456),
        ];

        for (input, expected) in test_cases {
            let mut parser = Parser::new(&input);
            assert_eq!(parser.read_compressed_int().unwrap(), expected);
        }
    }

    #[test]
    fn test_read_compressed_token() {
        // TypeRef row 0x12: (0x12 << 2) | 1 = 0x49
        let mut parser = Parser::new(&[0x49]);
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x0100_0012));

        // TypeDef row 2: 0x08
        let mut parser = Parser::new(&[0x08]);
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x0200_0002));

        // TypeSpec row 1: 0x06
        let mut parser = Parser::new(&[0x06]);
        assert_eq!(parser.read_compressed_token().unwrap(), Token::new(0x1B00_0001));

        let mut parser = Parser::new(&[0x07]);
        assert!(parser.read_compressed_token().is_err());
    }

    #[test]
    fn test_peek_and_advance() {
        let mut parser = Parser::new(&[0x01, 0x02]);
        assert_eq!(parser.peek_byte().unwrap(), 0x01);
        assert_eq!(parser.pos(), 0);
        parser.advance().unwrap();
        assert_eq!(parser.read_le::<u8>().unwrap(), 0x02);
        assert!(parser.peek_byte().is_err());
        assert!(parser.advance().is_err());
        assert_eq!(parser.len(), 2);
    }
}

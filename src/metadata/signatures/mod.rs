//! Signature blobs for fields, properties and type specifications (ECMA-335 II.23.2).
//!
//! Signatures describe the type of a member in a compact, recursive binary encoding. Every
//! signature starts with a kind byte (`0x06` for fields, `0x08` for properties, possibly
//! combined with `HASTHIS`), followed by optional custom modifiers and the encoded type.
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::metadata::signatures::{parse_field_signature, TypeSignature};
//!
//! // int32[]
//! let field = parse_field_signature(&[0x06, 0x1D, 0x08])?;
//! assert_eq!(field.base, TypeSignature::SzArray(Box::new(TypeSignature::I4)));
//! # Ok::<(), serialscope::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! - Custom modifiers (modreq/modopt) are decoded but do not take part in type identity
//! - Nesting is limited to [`MAX_RECURSION_DEPTH`] levels
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 23.2 - Blobs and Signatures

mod parser;
mod types;

pub use parser::*;
pub use types::*;

use crate::Result;

/// Parse a `FieldSignature` from a byte slice
///
/// ## Arguments
/// * 'data' - The input slice to parse
///
/// # Errors
/// Returns an error if the signature data is malformed or parsing fails
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    let mut parser = SignatureParser::new(data);
    parser.parse_field_signature()
}

/// Parse a `PropertySignature` from a byte slice
///
/// ## Arguments
/// * 'data' - The input slice to parse
///
/// # Errors
/// Returns an error if the signature data is malformed or parsing fails
pub fn parse_property_signature(data: &[u8]) -> Result<SignatureProperty> {
    let mut parser = SignatureParser::new(data);
    parser.parse_property_signature()
}

/// Parse a `TypeSpecSignature` from a byte slice
///
/// ## Arguments
/// * 'data' - The input slice to parse
///
/// # Errors
/// Returns an error if the signature data is malformed or parsing fails
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    let mut parser = SignatureParser::new(data);
    parser.parse_type_spec_signature()
}

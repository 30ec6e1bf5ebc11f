// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # serialscope
//!
//! Reports which fields and properties of a .NET type the XNA / MonoGame content pipeline
//! serializes automatically. `serialscope` reads the ECMA-335 metadata of a compiled module
//! directly, in pure Rust, without loading or executing the module and without requiring the
//! .NET runtime.
//!
//! ## Features
//!
//! - **Efficient memory access** - Memory-mapped file access and reference-based parsing of
//!   the metadata heaps and tables
//! - **Type model** - Types with their base type, fields and properties, declared member types
//!   named like common .NET tooling (``System.Collections.Generic.List`1<System.String>``)
//! - **Serializer rules** - The ordered `[ContentSerializer]` / `[ContentSerializerIgnore]`
//!   eligibility rules, with a reason for every excluded member
//! - **Parallel queries** - The loaded type registry is immutable and shared across threads
//!
//! ## Quick Start
//!
//! ### Using the Prelude
//!
//! ```rust,no_run
//! use serialscope::prelude::*;
//! use std::path::Path;
//!
//! let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
//! for report in inspect(&registry, "Game.Player")? {
//!     println!("{report}");
//! }
//! # Ok::<(), serialscope::Error>(())
//! ```
//!
//! Every member becomes one line, most-derived type first and fields before properties:
//!
//! ```text
//! Name: "Health", Type: "System.Int32", Is Value: True
//! ERROR: INVALID: Setter isn't public!
//! Name: "Weapon", Type: "Game.Weapon", Is Value: False
//! ```
//!
//! ### Validating single members
//!
//! ```rust,no_run
//! use serialscope::{
//!     metadata::typesystem::TypeRegistry,
//!     serialization::{validate, walk, Eligibility},
//! };
//! use std::path::Path;
//!
//! let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
//! let player = registry.by_name("Game.Player")?;
//!
//! for layer in walk(&registry, player)? {
//!     for member in layer.members() {
//!         if let Eligibility::Ineligible(reason) = validate(member)? {
//!             println!("{} is skipped: {:?}", member.qualified_name(), reason);
//!         }
//!     }
//! }
//! # Ok::<(), serialscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - ECMA-335 metadata parsing and the type model built from it
//! - [`serialization`] - Hierarchy walk, eligibility rules and reporting
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`]. Errors fall into two families: resolution errors (the
//! file cannot be loaded, the type does not exist) and integrity errors (damaged metadata).
//! A member that is not serializable is not an error; see
//! [`serialization::Eligibility::Ineligible`].

#[macro_use]
pub(crate) mod error;

/// PE image access and low-level parsing utilities
pub mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the serialscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust,no_run
/// use serialscope::prelude::*;
///
/// let registry = TypeRegistry::from_file("Game.dll".as_ref())?;
/// println!("{} types", registry.len());
/// # Ok::<(), serialscope::Error>(())
/// ```
pub mod prelude;

/// Definitions, parsing and loading of CIL metadata based on ECMA-335
///
/// # Key Components
///
/// - [`metadata::assemblyview`] - A loaded module and its parsed metadata
/// - [`metadata::cor20header`] - CLR 2.0 header information
/// - [`metadata::root`] - Metadata root and stream directory
/// - [`metadata::streams`] - Heaps and the table stream
/// - [`metadata::tables`] - Metadata table rows
/// - [`metadata::signatures`] - Field, property and method signatures
/// - [`metadata::typesystem`] - Type and member descriptors and the type registry
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::metadata::typesystem::TypeRegistry;
/// use std::path::Path;
///
/// let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
/// for descriptor in &registry {
///     println!("{} : {} fields, {} properties",
///         descriptor.fullname(), descriptor.fields.len(), descriptor.properties.len());
/// }
/// # Ok::<(), serialscope::Error>(())
/// ```
pub mod metadata;

/// Content serialization eligibility of fields and properties
///
/// See [`serialization::validate`] for the rules and [`serialization::inspect`] for the
/// complete inspection of a type.
pub mod serialization;

/// `serialscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `serialscope` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::{metadata::typesystem::TypeRegistry, Error};
///
/// match TypeRegistry::from_file(std::path::Path::new("Game.dll")) {
///     Ok(registry) => println!("Loaded {} types", registry.len()),
///     Err(Error::NotSupported) => println!("Not a supported .NET module"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Metadata streams and heaps for direct access to ECMA-335 data structures.
pub use metadata::streams::{Blob, StreamHeader, Strings, TablesHeader};

/// Provides access to low-level file and memory parsing utilities.
///
/// # Example
///
/// ```rust,no_run
/// use serialscope::Parser;
///
/// let data = [0x81, 0x00];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_compressed_uint()?, 0x100);
/// # Ok::<(), serialscope::Error>(())
/// ```
pub use file::{parser::Parser, File};

//! Metadata parsing and representation for .NET modules.
//!
//! This module reads the ECMA-335 metadata of a PE image and turns it into the type model the
//! serialization checks consume.
//!
//! # Key Components
//!
//! - [`assemblyview`] - A loaded module with its parsed metadata root, heaps and tables
//! - [`cor20header`] - The CLI header locating the metadata
//! - [`root`] - The metadata root and its stream directory
//! - [`streams`] - The `#Strings` and `#Blob` heaps and the `#~` table stream
//! - [`tables`] - Typed row readers for the metadata tables
//! - [`signatures`] - Field, property, method and type-spec signature parsing
//! - [`token`] - Metadata table row references
//! - [`typesystem`] - Type and member descriptors, the registry and type resolution
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::metadata::{assemblyview::AssemblyView, tables::TableId};
//! use std::path::Path;
//!
//! let view = AssemblyView::from_file(Path::new("Game.dll"))?;
//! let types = view.with_metadata(|metadata| metadata.tables.row_count(TableId::TypeDef));
//! println!("{} defines {} types", view.metadata_root().version, types);
//! # Ok::<(), serialscope::Error>(())
//! ```

/// Implementation of a loaded module and its parsed metadata
pub mod assemblyview;
/// Implementation of the Header of CIL
pub mod cor20header;
/// Construction of type descriptors from the metadata tables
pub(crate) mod loader;
/// Implementation of the root metadata structure
pub mod root;
/// Implementation of field, property, method and type signatures
pub mod signatures;
/// Implementation of the metadata streams (tables and heaps)
pub mod streams;
/// Implementation of the .NET metadata tables
pub mod tables;
/// Commonly used metadata token type
pub mod token;
/// Type and member descriptors of a loaded module
pub mod typesystem;

//! Metadata streams.
//!
//! A module's metadata is split into named streams: the `#~` table stream and the heaps its
//! rows reference by offset.
//!
//! # Key Components
//!
//! - [`crate::metadata::streams::StreamHeader`] - Stream directory entry
//! - [`crate::metadata::streams::Strings`] - `#Strings` identifier heap
//! - [`crate::metadata::streams::Blob`] - `#Blob` signature heap
//! - [`crate::metadata::streams::TablesHeader`] - `#~` table stream

mod blob;
pub use blob::Blob;

mod streamheader;
pub use streamheader::{StreamHeader, STREAM_NAMES};

mod strings;
pub use strings::Strings;

mod tablesheader;
pub use tablesheader::TablesHeader;

//! Content serialization eligibility of fields and properties.
//!
//! The checks answer, for every member of a type and of its base types, whether the XNA /
//! MonoGame content serializer would read and write it automatically.
//!
//! # Key Components
//!
//! - [`walk`] - The inheritance chain of a type, most-derived first
//! - [`validate`] - The ordered eligibility rules for a single member
//! - [`MemberReport`] / [`ReportEmitter`] - Per-member results and their output
//! - [`inspect`] / [`inspect_all`] - Name lookup, walk, validation and reporting in one call
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::{
//!     metadata::typesystem::TypeRegistry,
//!     serialization::{emit_all, inspect, LineEmitter},
//! };
//! use std::path::Path;
//!
//! let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
//! let reports = inspect(&registry, "Game.Foo")?;
//! emit_all(&mut LineEmitter::new(std::io::stdout()), &reports)?;
//! # Ok::<(), serialscope::Error>(())
//! ```

mod eligibility;
mod inspect;
mod report;
mod walker;

pub use eligibility::{validate, Eligibility, IneligibleReason};
pub use inspect::{inspect, inspect_all, inspect_type};
pub use report::{emit_all, LineEmitter, MemberReport, ReportEmitter};
pub use walker::{walk, MAX_HIERARCHY_DEPTH};

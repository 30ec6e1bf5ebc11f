//! Type and member descriptors of a loaded module.
//!
//! This module turns the raw metadata tables into a small, immutable object model that the
//! serialization checks work on:
//!
//! - [`TypeDescriptor`]: a type defined in the module, with its base type, fields and properties
//! - [`TypeReference`]: a reference to a type by full name, pointing into the registry when the
//!   type is defined locally
//! - [`MemberDescriptor`]: a field or property with its declared type, declaring type,
//!   accessibility and [`Annotations`]
//! - [`TypeRegistry`]: the arena holding every type of the module
//! - [`TypeResolver`]: reference resolution used by the hierarchy walk
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::metadata::typesystem::{TypeRegistry, TypeResolver};
//! use std::path::Path;
//!
//! let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
//! let derived = registry.by_name("Game.Derived")?;
//!
//! if let Some(base) = derived.base.as_ref().and_then(|base| registry.resolve(base)) {
//!     println!("{} derives from {}", derived.fullname(), base.fullname());
//! }
//! # Ok::<(), serialscope::Error>(())
//! ```

mod annotations;
mod base;
mod member;
mod registry;
mod resolver;

pub use annotations::{AnnotationKind, Annotations};
pub use base::{DeclaringType, TypeDescriptor, TypeIndex, TypeReference, OBJECT_TYPE_NAME};
pub use member::{Accessor, MemberAccess, MemberDescriptor, MemberKind, PropertyAccessors};
pub use registry::TypeRegistry;
pub use resolver::TypeResolver;

//! Type descriptors and references to types.

use std::{fmt, sync::Arc};

use crate::metadata::{tables::TypeAttributes, token::Token, typesystem::MemberDescriptor};

/// Full name of the root of every reference type hierarchy
pub const OBJECT_TYPE_NAME: &str = "System.Object";

/// Index of a [`TypeDescriptor`] inside a [`crate::metadata::typesystem::TypeRegistry`]
pub type TypeIndex = usize;

/// A reference to a type, as used for base types and declared member types.
///
/// The referenced type may be defined in the loaded module, in which case `index` locates its
/// descriptor, or anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Full name (`Ns.Type`, `Ns.Outer/Inner`, ``Ns.List`1<System.Int32>``, `System.Int32[]`)
    pub name: String,
    /// Instances of the type are copied by value
    pub is_value_type: bool,
    /// Descriptor of the type, if it is defined in the loaded module
    pub index: Option<TypeIndex>,
}

impl TypeReference {
    /// Creates a reference to a type that is not defined in the loaded module.
    pub fn external(name: impl Into<String>, is_value_type: bool) -> Self {
        TypeReference {
            name: name.into(),
            is_value_type,
            index: None,
        }
    }

    /// Creates a reference to the descriptor at `index`.
    pub fn local(name: impl Into<String>, is_value_type: bool, index: TypeIndex) -> Self {
        TypeReference {
            name: name.into(),
            is_value_type,
            index: Some(index),
        }
    }

    /// Returns `true` if this is `System.Object`.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.name == OBJECT_TYPE_NAME
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The parts of a type that its members refer back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaringType {
    /// `TypeDef` token
    pub token: Token,
    /// Full name
    pub name: String,
    /// `TypeAttributes` flags
    pub flags: u32,
}

impl DeclaringType {
    /// Type is declared `abstract`
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags & TypeAttributes::ABSTRACT != 0
    }

    /// Type is declared `sealed`
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.flags & TypeAttributes::SEALED != 0
    }

    /// Type is abstract and sealed, which is how `static class` is compiled.
    #[must_use]
    pub fn is_static_container(&self) -> bool {
        self.is_abstract() && self.is_sealed()
    }
}

/// A type defined in the loaded module with its serializable member candidates.
///
/// Descriptors are built once by the loader and not modified afterwards.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Identity shared with every member of the type
    pub declaring: Arc<DeclaringType>,
    /// Namespace, empty for nested and global types
    pub namespace: String,
    /// Simple name
    pub name: String,
    /// Base type, `None` for `System.Object`, interfaces and `<Module>`
    pub base: Option<TypeReference>,
    /// Instances of the type are copied by value
    pub is_value_type: bool,
    /// Fields in declaration order
    pub fields: Vec<MemberDescriptor>,
    /// Properties in declaration order
    pub properties: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// `TypeDef` token
    #[must_use]
    pub fn token(&self) -> Token {
        self.declaring.token
    }

    /// Full name (`Ns.Type` or `Ns.Outer/Inner`)
    #[must_use]
    pub fn fullname(&self) -> &str {
        &self.declaring.name
    }

    /// `TypeAttributes` flags
    #[must_use]
    pub fn flags(&self) -> u32 {
        self.declaring.flags
    }

    /// Type is declared `abstract`
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.declaring.is_abstract()
    }

    /// Type is declared `sealed`
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.declaring.is_sealed()
    }

    /// Type is abstract and sealed.
    #[must_use]
    pub fn is_static_container(&self) -> bool {
        self.declaring.is_static_container()
    }

    /// Fields first, then properties.
    pub fn members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.fields.iter().chain(self.properties.iter())
    }
}

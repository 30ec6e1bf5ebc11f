//! Field and property descriptors.

use std::{fmt, sync::Arc};

use strum::{AsRefStr, EnumIter};

use crate::metadata::{
    token::Token,
    typesystem::{AnnotationKind, Annotations, DeclaringType, TypeReference},
};

/// Accessibility of a field or method (ECMA-335 II.23.1.5, II.23.1.10).
///
/// Fields and methods share the encoding of the three low flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
pub enum MemberAccess {
    /// Not referenceable
    CompilerControlled,
    /// `private`
    Private,
    /// `private protected`
    FamilyAndAssembly,
    /// `internal`
    Assembly,
    /// `protected`
    Family,
    /// `protected internal`
    FamilyOrAssembly,
    /// `public`
    Public,
}

impl MemberAccess {
    /// Decodes the access bits of field or method flags, `None` for the reserved value `7`.
    #[must_use]
    pub fn from_flags(flags: u32) -> Option<Self> {
        Some(match flags & 0x0007 {
            0 => MemberAccess::CompilerControlled,
            1 => MemberAccess::Private,
            2 => MemberAccess::FamilyAndAssembly,
            3 => MemberAccess::Assembly,
            4 => MemberAccess::Family,
            5 => MemberAccess::FamilyOrAssembly,
            6 => MemberAccess::Public,
            _ => return None,
        })
    }

    /// Returns `true` only for [`MemberAccess::Public`].
    #[must_use]
    pub fn is_public(self) -> bool {
        self == MemberAccess::Public
    }
}

/// The getter or setter method of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// `MethodDef` token of the accessor
    pub token: Token,
    /// Method name, usually `get_X` / `set_X`
    pub name: String,
    /// Accessibility of the method
    pub access: MemberAccess,
}

impl Accessor {
    /// Returns `true` if the accessor method is public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access.is_public()
    }
}

/// Accessors and shape of a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyAccessors {
    /// The getter, if the property has one
    pub getter: Option<Accessor>,
    /// The setter, if the property has one
    pub setter: Option<Accessor>,
    /// The property takes index parameters (`this[...]`)
    pub has_parameters: bool,
}

impl PropertyAccessors {
    /// Returns `true` if a public getter exists.
    #[must_use]
    pub fn has_public_getter(&self) -> bool {
        self.getter.as_ref().is_some_and(Accessor::is_public)
    }

    /// Returns `true` if a public setter exists.
    #[must_use]
    pub fn has_public_setter(&self) -> bool {
        self.setter.as_ref().is_some_and(Accessor::is_public)
    }
}

/// What kind of member a [`MemberDescriptor`] describes, with the accessibility data that
/// applies to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A field
    Field {
        /// Accessibility of the field
        access: MemberAccess,
    },
    /// A property
    Property(PropertyAccessors),
}

impl MemberKind {
    /// `"Field"` or `"Property"`
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Field { .. } => "Field",
            MemberKind::Property(_) => "Property",
        }
    }
}

/// A field or property together with everything the eligibility rules look at.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// `Field` or `Property` token
    pub token: Token,
    /// Member name
    pub name: String,
    /// The declared type of the field or property
    pub declared_type: TypeReference,
    /// The type that declares this member
    pub declaring_type: Arc<DeclaringType>,
    /// Field or property specific data
    pub kind: MemberKind,
    /// Recognised serialization markers
    pub annotations: Annotations,
}

impl MemberDescriptor {
    /// Returns `true` if `kind` is attached to this member.
    #[must_use]
    pub fn has_annotation(&self, kind: AnnotationKind) -> bool {
        self.annotations.has(kind)
    }

    /// `Declaring.Type::Member`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.declaring_type.name, self.name)
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind.label(),
            self.declared_type.name,
            self.qualified_name()
        )
    }
}

//! Member eligibility rules of the content serializer.
//!
//! A field or property takes part in automatic content serialization unless one of the
//! following rules rejects it. Rules are checked in this order and the first match decides:
//!
//! 1. **Static container** - the declaring type is `abstract sealed` (a C# `static class`)
//! 2. **Explicitly ignored** - the member carries `[ContentSerializerIgnore]`
//! 3. **Getter visibility** (properties) - the getter is missing or not public
//! 4. **Indexer** (properties) - the property takes index parameters
//! 5. **Explicit include** - `[ContentSerializer]` skips rules 6 and 7
//! 6. **Property accessibility** - the getter must be readable and the setter public
//! 7. **Field accessibility** - the field must be public
//!
//! Rejection is a regular result ([`Eligibility::Ineligible`]), never an error. The only error
//! is a property descriptor without any accessor, which no valid module produces.
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::{
//!     metadata::typesystem::TypeRegistry,
//!     serialization::{validate, Eligibility},
//! };
//! use std::path::Path;
//!
//! let registry = TypeRegistry::from_file(Path::new("Game.dll"))?;
//! for member in registry.by_name("Game.Foo")?.members() {
//!     match validate(member)? {
//!         Eligibility::Eligible { declared_type_name, .. } => {
//!             println!("{} is serialized as {}", member.name, declared_type_name)
//!         }
//!         Eligibility::Ineligible(reason) => println!("{} skipped: {}", member.name, reason),
//!     }
//! }
//! # Ok::<(), serialscope::Error>(())
//! ```

use std::fmt;

use strum::{AsRefStr, EnumCount, EnumIter, IntoStaticStr};

use crate::{
    metadata::typesystem::{AnnotationKind, MemberDescriptor, MemberKind, PropertyAccessors},
    Error::InvalidMember,
    Result,
};

/// Why a member is excluded from serialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, AsRefStr, IntoStaticStr,
)]
pub enum IneligibleReason {
    /// The declaring type is abstract and sealed
    StaticContainer,
    /// The member carries `[ContentSerializerIgnore]`
    ExplicitlyIgnored,
    /// The property has no public getter
    GetterNotPublic,
    /// The property is an indexer
    IndexedProperty,
    /// The property getter is not readable from outside the type
    GetterNotReadable,
    /// The property has no public setter
    SetterNotPublic,
    /// The field is not public
    FieldNotPublic,
}

impl IneligibleReason {
    /// Diagnostic line printed for the rejected member.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            IneligibleReason::StaticContainer => "INVALID: Cannot be static!",
            IneligibleReason::ExplicitlyIgnored => "INVALID: ContentSerializerIgnore decorated",
            IneligibleReason::GetterNotPublic => "INVALID: Getter isn't public!",
            IneligibleReason::IndexedProperty => "INVALID: Is an index property!",
            IneligibleReason::GetterNotReadable => "INVALID: Can't read getter!",
            IneligibleReason::SetterNotPublic => "INVALID: Setter isn't public!",
            IneligibleReason::FieldNotPublic => "INVALID: Field isn't public!",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of validating one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The member is serialized
    Eligible {
        /// Full name of the declared type
        declared_type_name: String,
        /// Whether the declared type is a value type
        is_value_type: bool,
    },
    /// The member is skipped
    Ineligible(IneligibleReason),
}

impl Eligibility {
    /// Returns `true` if the member is serialized.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    /// The rejection reason, `None` for eligible members.
    #[must_use]
    pub fn reason(&self) -> Option<IneligibleReason> {
        match self {
            Eligibility::Eligible { .. } => None,
            Eligibility::Ineligible(reason) => Some(*reason),
        }
    }
}

/// Decides whether `member` takes part in content serialization.
///
/// The result depends on the member descriptor alone; validating the same descriptor twice
/// gives the same answer.
///
/// # Errors
/// Returns [`crate::Error::InvalidMember`] for a property with neither getter nor setter.
pub fn validate(member: &MemberDescriptor) -> Result<Eligibility> {
    if let MemberKind::Property(accessors) = &member.kind {
        if accessors.getter.is_none() && accessors.setter.is_none() {
            return Err(InvalidMember {
                member: member.qualified_name(),
                message: "property has neither getter nor setter".to_string(),
            });
        }
    }

    let result = match check_rules(member) {
        Some(reason) => Eligibility::Ineligible(reason),
        None => Eligibility::Eligible {
            declared_type_name: member.declared_type.name.clone(),
            is_value_type: member.declared_type.is_value_type,
        },
    };

    log::trace!("{} {} -> {:?}", member.kind.label(), member.qualified_name(), result);
    Ok(result)
}

fn check_rules(member: &MemberDescriptor) -> Option<IneligibleReason> {
    if member.declaring_type.is_static_container() {
        return Some(IneligibleReason::StaticContainer);
    }

    if member.has_annotation(AnnotationKind::ContentSerializerIgnore) {
        return Some(IneligibleReason::ExplicitlyIgnored);
    }

    if let MemberKind::Property(accessors) = &member.kind {
        if !accessors.has_public_getter() {
            return Some(IneligibleReason::GetterNotPublic);
        }
        if accessors.has_parameters {
            return Some(IneligibleReason::IndexedProperty);
        }
    }

    if member.has_annotation(AnnotationKind::ContentSerializer) {
        return None;
    }

    match &member.kind {
        MemberKind::Property(accessors) => check_property_access(accessors),
        MemberKind::Field { access } => {
            (!access.is_public()).then_some(IneligibleReason::FieldNotPublic)
        }
    }
}

fn check_property_access(accessors: &PropertyAccessors) -> Option<IneligibleReason> {
    // Non-public getters were already rejected as GetterNotPublic
    if !accessors.has_public_getter() {
        return Some(IneligibleReason::GetterNotReadable);
    }

    if !accessors.has_public_setter() {
        return Some(IneligibleReason::SetterNotPublic);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            tables::TypeAttributes,
            typesystem::{AnnotationKind::*, MemberAccess, TypeReference},
        },
        test::{create_declaring, create_field, create_property},
        Error,
    };
    use strum::IntoEnumIterator;

    const STATIC_CLASS: u32 = TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT | TypeAttributes::SEALED;

    fn int32() -> TypeReference {
        TypeReference::external("System.Int32", true)
    }

    fn string() -> TypeReference {
        TypeReference::external("System.String", false)
    }

    fn eligible(name: &str, is_value_type: bool) -> Eligibility {
        Eligibility::Eligible {
            declared_type_name: name.to_string(),
            is_value_type,
        }
    }

    #[test]
    fn foo_scenario() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);

        let x = create_field(&foo, "X", int32(), MemberAccess::Public, &[]);
        assert_eq!(validate(&x).unwrap(), eligible("System.Int32", true));

        let y = create_property(
            &foo,
            "Y",
            string(),
            Some(MemberAccess::Public),
            Some(MemberAccess::Private),
            false,
            &[],
        );
        assert_eq!(
            validate(&y).unwrap(),
            Eligibility::Ineligible(IneligibleReason::SetterNotPublic)
        );

        let z = create_property(
            &foo,
            "Z",
            TypeReference::local("Game.Bar", false, 1),
            Some(MemberAccess::Public),
            Some(MemberAccess::Public),
            false,
            &[],
        );
        assert_eq!(validate(&z).unwrap(), eligible("Game.Bar", false));
    }

    #[test]
    fn explicit_include_getter_only() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);
        let w = create_property(
            &foo,
            "W",
            int32(),
            Some(MemberAccess::Public),
            None,
            false,
            &[ContentSerializer],
        );
        assert_eq!(validate(&w).unwrap(), eligible("System.Int32", true));

        let without = create_property(&foo, "W", int32(), Some(MemberAccess::Public), None, false, &[]);
        assert_eq!(
            validate(&without).unwrap().reason(),
            Some(IneligibleReason::SetterNotPublic)
        );
    }

    #[test]
    fn explicit_include_private_field() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);
        let hidden = create_field(&foo, "hidden", int32(), MemberAccess::Private, &[ContentSerializer]);
        assert!(validate(&hidden).unwrap().is_eligible());

        let plain = create_field(&foo, "hidden", int32(), MemberAccess::Private, &[]);
        assert_eq!(
            validate(&plain).unwrap(),
            Eligibility::Ineligible(IneligibleReason::FieldNotPublic)
        );

        for access in MemberAccess::iter().filter(|access| !access.is_public()) {
            let field = create_field(&foo, "f", int32(), access, &[]);
            assert_eq!(
                validate(&field).unwrap().reason(),
                Some(IneligibleReason::FieldNotPublic)
            );
        }
    }

    #[test]
    fn static_container_wins() {
        let settings = create_declaring("Game.Settings", STATIC_CLASS);

        let members = [
            create_field(&settings, "Volume", int32(), MemberAccess::Public, &[]),
            create_field(&settings, "Hidden", int32(), MemberAccess::Private, &[ContentSerializer]),
            create_field(
                &settings,
                "Both",
                int32(),
                MemberAccess::Public,
                &[ContentSerializer, ContentSerializerIgnore],
            ),
            create_property(&settings, "P", string(), None, Some(MemberAccess::Public), true, &[]),
        ];

        for member in &members {
            assert_eq!(
                validate(member).unwrap(),
                Eligibility::Ineligible(IneligibleReason::StaticContainer)
            );
        }

        // Abstract alone or sealed alone is not a static container
        for flags in [TypeAttributes::ABSTRACT, TypeAttributes::SEALED] {
            let declaring = create_declaring("Game.Partial", flags);
            let field = create_field(&declaring, "F", int32(), MemberAccess::Public, &[]);
            assert!(validate(&field).unwrap().is_eligible());
        }
    }

    #[test]
    fn ignore_beats_include() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);
        let field = create_field(
            &foo,
            "F",
            int32(),
            MemberAccess::Public,
            &[ContentSerializer, ContentSerializerIgnore],
        );
        assert_eq!(
            validate(&field).unwrap(),
            Eligibility::Ineligible(IneligibleReason::ExplicitlyIgnored)
        );

        let property = create_property(
            &foo,
            "P",
            string(),
            None,
            Some(MemberAccess::Public),
            false,
            &[ContentSerializerIgnore],
        );
        assert_eq!(
            validate(&property).unwrap().reason(),
            Some(IneligibleReason::ExplicitlyIgnored)
        );
    }

    #[test]
    fn getter_rules() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);

        let write_only = create_property(&foo, "P", string(), None, Some(MemberAccess::Public), false, &[]);
        assert_eq!(
            validate(&write_only).unwrap().reason(),
            Some(IneligibleReason::GetterNotPublic)
        );

        let protected = create_property(
            &foo,
            "P",
            string(),
            Some(MemberAccess::Family),
            Some(MemberAccess::Public),
            false,
            &[ContentSerializer],
        );
        assert_eq!(
            validate(&protected).unwrap().reason(),
            Some(IneligibleReason::GetterNotPublic)
        );
    }

    #[test]
    fn indexers_never_serialized() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);
        for annotations in [&[][..], &[ContentSerializer][..]] {
            let item = create_property(
                &foo,
                "Item",
                string(),
                Some(MemberAccess::Public),
                Some(MemberAccess::Public),
                true,
                annotations,
            );
            assert_eq!(
                validate(&item).unwrap(),
                Eligibility::Ineligible(IneligibleReason::IndexedProperty)
            );
        }
    }

    #[test]
    fn property_without_accessors() {
        let foo = create_declaring("Game.Foo", STATIC_CLASS);
        let broken = create_property(&foo, "Broken", string(), None, None, false, &[]);

        match validate(&broken) {
            Err(Error::InvalidMember { member, .. }) => assert_eq!(member, "Game.Foo::Broken"),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(validate(&broken).is_err_and(|error| error.is_integrity()));
    }

    #[test]
    fn idempotent() {
        let foo = create_declaring("Game.Foo", TypeAttributes::PUBLIC);
        let members = [
            create_field(&foo, "X", int32(), MemberAccess::Public, &[]),
            create_field(&foo, "x", int32(), MemberAccess::Assembly, &[]),
            create_property(
                &foo,
                "Y",
                string(),
                Some(MemberAccess::Public),
                Some(MemberAccess::Private),
                false,
                &[],
            ),
        ];

        for member in &members {
            assert_eq!(validate(member).unwrap(), validate(member).unwrap());
        }
    }

    #[test]
    fn reason_messages() {
        assert_eq!(IneligibleReason::COUNT, 7);
        for reason in IneligibleReason::iter() {
            assert!(reason.message().starts_with("INVALID: "));
            assert_eq!(reason.to_string(), reason.message());
        }
        assert_eq!(
            IneligibleReason::SetterNotPublic.to_string(),
            "INVALID: Setter isn't public!"
        );
        assert_eq!(IneligibleReason::StaticContainer.as_ref(), "StaticContainer");
        let code: &'static str = IneligibleReason::FieldNotPublic.into();
        assert_eq!(code, "FieldNotPublic");
    }
}

//! Serialization markers attached to fields and properties.
//!
//! Custom attributes are matched by the full name of their type once, when the member
//! descriptor is built. Attributes that do not steer content serialization are dropped at that
//! point, so the validator only ever tests bits.

use bitflags::bitflags;
use strum::{AsRefStr, EnumCount, EnumIter, IntoEnumIterator};

/// Custom attributes recognised by the content pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, AsRefStr)]
pub enum AnnotationKind {
    /// `[ContentSerializerIgnore]`, excludes the member unconditionally
    ContentSerializerIgnore,
    /// `[ContentSerializer]`, includes the member even if it is not fully public
    ContentSerializer,
}

impl AnnotationKind {
    /// Full name of the attribute type.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            AnnotationKind::ContentSerializerIgnore => {
                "Microsoft.Xna.Framework.Content.ContentSerializerIgnoreAttribute"
            }
            AnnotationKind::ContentSerializer => {
                "Microsoft.Xna.Framework.Content.ContentSerializerAttribute"
            }
        }
    }

    /// Maps an attribute type name to the marker it stands for.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        AnnotationKind::iter().find(|kind| kind.type_name() == name)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Set of markers attached to one member
    pub struct Annotations: u8 {
        /// `[ContentSerializerIgnore]`
        const CONTENT_SERIALIZER_IGNORE = 0x01;
        /// `[ContentSerializer]`
        const CONTENT_SERIALIZER = 0x02;
    }
}

impl Annotations {
    /// Builds the set from the type names of every attribute attached to a member.
    pub fn from_type_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter_map(AnnotationKind::from_type_name)
            .fold(Annotations::empty(), |set, kind| set | Annotations::from(kind))
    }

    /// Returns `true` if `kind` is attached.
    #[must_use]
    pub fn has(self, kind: AnnotationKind) -> bool {
        self.contains(Annotations::from(kind))
    }

    /// The attached markers.
    pub fn kinds(self) -> impl Iterator<Item = AnnotationKind> {
        AnnotationKind::iter().filter(move |kind| self.has(*kind))
    }
}

impl From<AnnotationKind> for Annotations {
    fn from(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::ContentSerializerIgnore => Annotations::CONTENT_SERIALIZER_IGNORE,
            AnnotationKind::ContentSerializer => Annotations::CONTENT_SERIALIZER,
        }
    }
}


use std::sync::Arc;

pub use metadata::MetadataBuilder;
pub use pe::PeImageBuilder;

use crate::metadata::{
    tables::{FieldAttributes, MethodAttributes, TableId, TypeAttributes},
    token::Token,
    typesystem::{
        Accessor, AnnotationKind, Annotations, DeclaringType, MemberAccess, MemberDescriptor,
        MemberKind, PropertyAccessors, TypeDescriptor, TypeReference,
    },
};

pub const CONTENT_NAMESPACE: &str = "Microsoft.Xna.Framework.Content";

// TypeDef rows of the module built by `game_metadata`
pub const BAR_ROW: u32 = 2;
pub const FOO_ROW: u32 = 3;
pub const SETTINGS_ROW: u32 = 4;
pub const DERIVED_ROW: u32 = 5;
pub const POINT_ROW: u32 = 6;
pub const NOTE_ROW: u32 = 7;

const PUBLIC_FIELD: u32 = FieldAttributes::PUBLIC;
const PUBLIC_ACCESSOR: u32 = MethodAttributes::PUBLIC | MethodAttributes::SPECIAL_NAME;
const PRIVATE_ACCESSOR: u32 = 0x0001 | MethodAttributes::SPECIAL_NAME;

/// Builds the metadata of a small game library:
///
/// ```csharp
/// namespace Game {
///     public class Bar { }
///     public class Foo {
///         [Note] public int X;
///         public string Y { get; private set; }
///         public Bar Z { get; set; }
///         [ContentSerializer] public int W { get; }
///     }
///     public static class Settings { public static float Volume; }
///     public class Derived : Foo {
///         [ContentSerializer] private int hidden;
///         [ContentSerializerIgnore] public List<string> Ignored;
///         public string this[int index] { get; }
///     }
///     public struct Point { public int X; public int Y; }
///     public class NoteAttribute : Attribute { }
/// }
/// ```
pub fn game_metadata() -> Vec<u8> {
    let mut builder = MetadataBuilder::new();

    let object = builder.type_ref("System", "Object");
    let value_type = builder.type_ref("System", "ValueType");
    let attribute = builder.type_ref("System", "Attribute");
    let list = builder.type_ref("System.Collections.Generic", "List`1");
    let serializer = builder.attribute_ctor(CONTENT_NAMESPACE, "ContentSerializerAttribute");
    let ignore = builder.attribute_ctor(CONTENT_NAMESPACE, "ContentSerializerIgnoreAttribute");

    let public_class = TypeAttributes::PUBLIC;

    builder.type_def(public_class, "Game", "Bar", object);

    let foo = builder.type_def(public_class, "Game", "Foo", object);
    let x = builder.field(PUBLIC_FIELD, "X", &[0x06, 0x08]);
    let get_y = builder.method(PUBLIC_ACCESSOR, "get_Y");
    let set_y = builder.method(PRIVATE_ACCESSOR, "set_Y");
    let get_z = builder.method(PUBLIC_ACCESSOR, "get_Z");
    let set_z = builder.method(PUBLIC_ACCESSOR, "set_Z");
    let get_w = builder.method(PUBLIC_ACCESSOR, "get_W");
    builder.property("Y", &[0x28, 0x00, 0x0E], Some(get_y), Some(set_y));
    builder.property(
        "Z",
        &[0x28, 0x00, 0x12, (BAR_ROW << 2) as u8],
        Some(get_z),
        Some(set_z),
    );
    let w = builder.property("W", &[0x28, 0x00, 0x08], Some(get_w), None);
    builder.custom_attribute(w, serializer);

    builder.type_def(
        public_class | TypeAttributes::ABSTRACT | TypeAttributes::SEALED,
        "Game",
        "Settings",
        object,
    );
    builder.field(
        PUBLIC_FIELD | FieldAttributes::STATIC,
        "Volume",
        &[0x06, 0x0C],
    );

    builder.type_def(public_class, "Game", "Derived", foo);
    let hidden = builder.field(0x0001, "hidden", &[0x06, 0x08]);
    builder.custom_attribute(hidden, serializer);
    let ignored = builder.field(
        PUBLIC_FIELD,
        "Ignored",
        &[0x06, 0x15, 0x12, compressed_type_ref(list), 0x01, 0x0E],
    );
    builder.custom_attribute(ignored, ignore);
    let get_item = builder.method(PUBLIC_ACCESSOR, "get_Item");
    builder.property("Item", &[0x28, 0x01, 0x0E, 0x08], Some(get_item), None);

    builder.type_def(
        public_class | TypeAttributes::SEALED,
        "Game",
        "Point",
        value_type,
    );
    builder.field(PUBLIC_FIELD, "X", &[0x06, 0x08]);
    builder.field(PUBLIC_FIELD, "Y", &[0x06, 0x08]);

    builder.type_def(public_class, "Game", "NoteAttribute", attribute);
    let note = builder.method(PUBLIC_ACCESSOR, ".ctor");
    builder.custom_attribute(x, note);

    assert_eq!(foo.row(), FOO_ROW);
    builder.build()
}

/// `game_metadata` wrapped into a PE image.
pub fn game_image() -> Vec<u8> {
    PeImageBuilder::new(game_metadata()).build()
}

/// Compressed `TypeDefOrRef` encoding of a `TypeRef` token, valid for small row ids.
pub fn compressed_type_ref(token: Token) -> u8 {
    assert_eq!(token.table(), TableId::TypeRef as u8);
    ((token.row() << 2) | 1) as u8
}

// Helper function to create the declaring type of test members
pub fn create_declaring(name: &str, flags: u32) -> Arc<DeclaringType> {
    Arc::new(DeclaringType {
        token: Token::new(0x0200_0002),
        name: name.to_string(),
        flags,
    })
}

// Helper function to create a field descriptor
pub fn create_field(
    declaring: &Arc<DeclaringType>,
    name: &str,
    declared_type: TypeReference,
    access: MemberAccess,
    annotations: &[AnnotationKind],
) -> MemberDescriptor {
    MemberDescriptor {
        token: Token::new(0x0400_0001),
        name: name.to_string(),
        declared_type,
        declaring_type: declaring.clone(),
        kind: MemberKind::Field { access },
        annotations: create_annotations(annotations),
    }
}

// Helper function to create a property descriptor
pub fn create_property(
    declaring: &Arc<DeclaringType>,
    name: &str,
    declared_type: TypeReference,
    getter: Option<MemberAccess>,
    setter: Option<MemberAccess>,
    has_parameters: bool,
    annotations: &[AnnotationKind],
) -> MemberDescriptor {
    let accessor = |prefix: &str, row: u32, access: MemberAccess| Accessor {
        token: Token::new(0x0600_0000 + row),
        name: format!("{prefix}_{name}"),
        access,
    };

    MemberDescriptor {
        token: Token::new(0x1700_0001),
        name: name.to_string(),
        declared_type,
        declaring_type: declaring.clone(),
        kind: MemberKind::Property(PropertyAccessors {
            getter: getter.map(|access| accessor("get", 1, access)),
            setter: setter.map(|access| accessor("set", 2, access)),
            has_parameters,
        }),
        annotations: create_annotations(annotations),
    }
}

// Helper function to create a type descriptor without members
pub fn create_type(
    fullname: &str,
    flags: u32,
    base: Option<TypeReference>,
    is_value_type: bool,
) -> TypeDescriptor {
    let (namespace, name) = fullname.rsplit_once('.').unwrap_or(("", fullname));
    TypeDescriptor {
        declaring: Arc::new(DeclaringType {
            token: Token::new(0x0200_0002),
            name: fullname.to_string(),
            flags,
        }),
        namespace: namespace.to_string(),
        name: name.to_string(),
        base,
        is_value_type,
        fields: Vec::new(),
        properties: Vec::new(),
    }
}

fn create_annotations(kinds: &[AnnotationKind]) -> Annotations {
    kinds
        .iter()
        .fold(Annotations::empty(), |set, kind| set | Annotations::from(*kind))
}

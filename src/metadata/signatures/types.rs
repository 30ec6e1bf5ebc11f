use crate::metadata::token::Token;

#[allow(non_snake_case)]
/// Element type codes used in signature blobs (ECMA-335 II.23.1.16)
pub mod ELEMENT_TYPE {
    /// Marks end of a list
    pub const END: u8 = 0x00;
    /// `System.Void`
    pub const VOID: u8 = 0x01;
    /// `System.Boolean`
    pub const BOOLEAN: u8 = 0x02;
    /// `System.Char`
    pub const CHAR: u8 = 0x03;
    /// `System.SByte`
    pub const I1: u8 = 0x04;
    /// `System.Byte`
    pub const U1: u8 = 0x05;
    /// `System.Int16`
    pub const I2: u8 = 0x06;
    /// `System.UInt16`
    pub const U2: u8 = 0x07;
    /// `System.Int32`
    pub const I4: u8 = 0x08;
    /// `System.UInt32`
    pub const U4: u8 = 0x09;
    /// `System.Int64`
    pub const I8: u8 = 0x0a;
    /// `System.UInt64`
    pub const U8: u8 = 0x0b;
    /// `System.Single`
    pub const R4: u8 = 0x0c;
    /// `System.Double`
    pub const R8: u8 = 0x0d;
    /// `System.String`
    pub const STRING: u8 = 0x0e;
    /// Unmanaged pointer, followed by type
    pub const PTR: u8 = 0x0f;
    /// Managed reference, followed by type
    pub const BYREF: u8 = 0x10;
    /// Value type, followed by `TypeDefOrRef` token
    pub const VALUETYPE: u8 = 0x11;
    /// Reference type, followed by `TypeDefOrRef` token
    pub const CLASS: u8 = 0x12;
    /// Generic parameter of a type, followed by its number
    pub const VAR: u8 = 0x13;
    /// Multi-dimensional array: type rank boundsCount bound1 … loCount lo1 …
    pub const ARRAY: u8 = 0x14;
    /// Generic instantiation: type type-arg-count type-1 ... type-n
    pub const GENERICINST: u8 = 0x15;
    /// `System.TypedReference`
    pub const TYPEDBYREF: u8 = 0x16;
    /// `System.IntPtr`
    pub const I: u8 = 0x18;
    /// `System.UIntPtr`
    pub const U: u8 = 0x19;
    /// Function pointer, followed by a method signature
    pub const FNPTR: u8 = 0x1b;
    /// `System.Object`
    pub const OBJECT: u8 = 0x1c;
    /// Single-dimensional array with zero lower bound
    pub const SZARRAY: u8 = 0x1d;
    /// Generic parameter of a method, followed by its number
    pub const MVAR: u8 = 0x1e;
    /// Required modifier, followed by `TypeDefOrRef` token
    pub const CMOD_REQD: u8 = 0x1f;
    /// Optional modifier, followed by `TypeDefOrRef` token
    pub const CMOD_OPT: u8 = 0x20;
    /// Sentinel for vararg method signatures
    pub const SENTINEL: u8 = 0x41;
    /// Pinned local
    pub const PINNED: u8 = 0x45;
}

/// A decoded type from a signature blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    /// `void`
    Void,
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `sbyte`
    I1,
    /// `byte`
    U1,
    /// `short`
    I2,
    /// `ushort`
    U2,
    /// `int`
    I4,
    /// `uint`
    U4,
    /// `long`
    I8,
    /// `ulong`
    U8,
    /// `float`
    R4,
    /// `double`
    R8,
    /// `nint`
    I,
    /// `nuint`
    U,
    /// `string`
    String,
    /// `object`
    Object,
    /// `System.TypedReference`
    TypedByRef,
    /// Unmanaged pointer
    Ptr(Box<TypeSignature>),
    /// Managed reference
    ByRef(Box<TypeSignature>),
    /// Named value type (`TypeDef`, `TypeRef` or `TypeSpec` token)
    ValueType(Token),
    /// Named reference type (`TypeDef`, `TypeRef` or `TypeSpec` token)
    Class(Token),
    /// Generic parameter of the enclosing type
    GenericParamType(u32),
    /// Generic parameter of the enclosing method
    GenericParamMethod(u32),
    /// Single-dimensional, zero based array
    SzArray(Box<TypeSignature>),
    /// General array
    Array(SignatureArray),
    /// Generic instantiation: the generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
}

/// Shape of a general array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArray {
    /// Element type
    pub base: Box<TypeSignature>,
    /// Number of dimensions
    pub rank: u32,
    /// Sizes of the leading dimensions that declare one
    pub sizes: Vec<u32>,
    /// Lower bounds of the leading dimensions that declare one
    pub lower_bounds: Vec<i32>,
}

/// A parameter or return type of a method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Passed by reference
    pub by_ref: bool,
    /// Parameter type
    pub base: TypeSignature,
}

/// A method signature (ECMA-335 II.23.2.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMethod {
    /// Instance method
    pub has_this: bool,
    /// Number of generic parameters
    pub param_count_generic: u32,
    /// Return type
    pub return_type: SignatureParameter,
    /// Fixed parameters
    pub params: Vec<SignatureParameter>,
}

/// A field signature (ECMA-335 II.23.2.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Field type
    pub base: TypeSignature,
}

/// A property signature (ECMA-335 II.23.2.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// Custom modifiers preceding the type
    pub modifiers: Vec<Token>,
    /// Property type
    pub base: TypeSignature,
    /// Index parameters; empty for ordinary properties
    pub params: Vec<SignatureParameter>,
}

/// A type specification signature (ECMA-335 II.23.2.14).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTypeSpec {
    /// The specified type
    pub base: TypeSignature,
}

impl TypeSignature {
    /// Returns the `System` name of a primitive, or `None` for constructed and named types.
    #[must_use]
    pub fn primitive_name(&self) -> Option<&'static str> {
        Some(match self {
            TypeSignature::Void => "System.Void",
            TypeSignature::Boolean => "System.Boolean",
            TypeSignature::Char => "System.Char",
            TypeSignature::I1 => "System.SByte",
            TypeSignature::U1 => "System.Byte",
            TypeSignature::I2 => "System.Int16",
            TypeSignature::U2 => "System.UInt16",
            TypeSignature::I4 => "System.Int32",
            TypeSignature::U4 => "System.UInt32",
            TypeSignature::I8 => "System.Int64",
            TypeSignature::U8 => "System.UInt64",
            TypeSignature::R4 => "System.Single",
            TypeSignature::R8 => "System.Double",
            TypeSignature::I => "System.IntPtr",
            TypeSignature::U => "System.UIntPtr",
            TypeSignature::String => "System.String",
            TypeSignature::Object => "System.Object",
            TypeSignature::TypedByRef => "System.TypedReference",
            _ => return None,
        })
    }

    /// Returns `true` if instances of this type are copied by value.
    ///
    /// Named types are classified by the element kind that introduced them (`VALUETYPE` or
    /// `CLASS`); a generic instantiation takes the kind of its generic type. Strings,
    /// objects, arrays, pointers, references and generic parameters are not value types.
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        match self {
            TypeSignature::Void
            | TypeSignature::Boolean
            | TypeSignature::Char
            | TypeSignature::I1
            | TypeSignature::U1
            | TypeSignature::I2
            | TypeSignature::U2
            | TypeSignature::I4
            | TypeSignature::U4
            | TypeSignature::I8
            | TypeSignature::U8
            | TypeSignature::R4
            | TypeSignature::R8
            | TypeSignature::I
            | TypeSignature::U
            | TypeSignature::TypedByRef
            | TypeSignature::ValueType(_) => true,
            TypeSignature::GenericInst(base, _) => base.is_value_type(),
            _ => false,
        }
    }
}

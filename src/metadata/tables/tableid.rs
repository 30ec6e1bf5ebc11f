use strum::{EnumCount, EnumIter};

/// Identifiers of the metadata tables a `#~` stream can carry (ECMA-335 II.22).
///
/// The discriminant is the table number used in tokens and in the `valid` bit vector.
/// Iteration order (`strum::IntoEnumIterator`) is the physical order of the tables in the
/// stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TableId {
    /// Module definition
    Module = 0x00,
    /// References to types in other modules or assemblies
    TypeRef = 0x01,
    /// Types defined in this module
    TypeDef = 0x02,
    /// Field indirection (uncompressed metadata only)
    FieldPtr = 0x03,
    /// Field definitions
    Field = 0x04,
    /// Method indirection (uncompressed metadata only)
    MethodPtr = 0x05,
    /// Method definitions
    MethodDef = 0x06,
    /// Parameter indirection (uncompressed metadata only)
    ParamPtr = 0x07,
    /// Parameter definitions
    Param = 0x08,
    /// Interfaces implemented by types
    InterfaceImpl = 0x09,
    /// References to fields and methods of other types
    MemberRef = 0x0A,
    /// Constant values of fields, parameters and properties
    Constant = 0x0B,
    /// Custom attributes
    CustomAttribute = 0x0C,
    /// Marshalling descriptors
    FieldMarshal = 0x0D,
    /// Declarative security
    DeclSecurity = 0x0E,
    /// Explicit type layout
    ClassLayout = 0x0F,
    /// Explicit field offsets
    FieldLayout = 0x10,
    /// Standalone signatures
    StandAloneSig = 0x11,
    /// Type to event list mapping
    EventMap = 0x12,
    /// Event indirection (uncompressed metadata only)
    EventPtr = 0x13,
    /// Event definitions
    Event = 0x14,
    /// Type to property list mapping
    PropertyMap = 0x15,
    /// Property indirection (uncompressed metadata only)
    PropertyPtr = 0x16,
    /// Property definitions
    Property = 0x17,
    /// Accessor methods of properties and events
    MethodSemantics = 0x18,
    /// Explicit method overrides
    MethodImpl = 0x19,
    /// References to other modules
    ModuleRef = 0x1A,
    /// Type specifications
    TypeSpec = 0x1B,
    /// P/Invoke mappings
    ImplMap = 0x1C,
    /// Initial data of fields
    FieldRVA = 0x1D,
    /// Edit-and-continue log
    EncLog = 0x1E,
    /// Edit-and-continue map
    EncMap = 0x1F,
    /// Assembly manifest
    Assembly = 0x20,
    /// Unused processor information
    AssemblyProcessor = 0x21,
    /// Unused OS information
    AssemblyOS = 0x22,
    /// Referenced assemblies
    AssemblyRef = 0x23,
    /// Unused processor information of referenced assemblies
    AssemblyRefProcessor = 0x24,
    /// Unused OS information of referenced assemblies
    AssemblyRefOS = 0x25,
    /// Files of a multi-module assembly
    File = 0x26,
    /// Types exported from other modules
    ExportedType = 0x27,
    /// Manifest resources
    ManifestResource = 0x28,
    /// Nesting of types
    NestedClass = 0x29,
    /// Generic parameters
    GenericParam = 0x2A,
    /// Generic method instantiations
    MethodSpec = 0x2B,
    /// Constraints of generic parameters
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// Highest table number this reader understands.
    pub const MAX: u8 = TableId::GenericParamConstraint as u8;
}

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// `TypeAttributes` flags of a `TypeDef` row (ECMA-335 II.23.1.15)
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Class is not public outside the assembly
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Class is public
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested class with public visibility
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Mask for the class semantics bit
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Class cannot be instantiated
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Class cannot be extended
    pub const SEALED: u32 = 0x0000_0100;
    /// Name is special
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// Type is serializable
    pub const SERIALIZABLE: u32 = 0x0000_2000;
}

/// A row of the `TypeDef` table (ECMA-335 II.22.37).
///
/// Field and method ownership is expressed as ranges: a type owns the fields from its
/// `field_list` up to the `field_list` of the next row (or the end of the table).
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x02xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// Base type, `TypeDefOrRef` coded index (row `0` if there is none)
    pub extends: CodedIndex,
    /// First row of this type's fields in the `Field` table
    pub field_list: u32,
    /// First row of this type's methods in the `MethodDef` table
    pub method_list: u32,
}

impl RowReadable for TypeDefRaw {
    const TABLE_ID: TableId = TableId::TypeDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::from_parts(TableId::TypeDef as u8, rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }
}

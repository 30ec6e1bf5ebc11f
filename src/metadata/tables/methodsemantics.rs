use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// `MethodSemanticsAttributes` flags (ECMA-335 II.23.1.12)
pub mod MethodSemanticsAttributes {
    /// Setter of a property
    pub const SETTER: u32 = 0x0001;
    /// Getter of a property
    pub const GETTER: u32 = 0x0002;
    /// Other accessor of a property or event
    pub const OTHER: u32 = 0x0004;
    /// Add accessor of an event
    pub const ADD_ON: u32 = 0x0008;
    /// Remove accessor of an event
    pub const REMOVE_ON: u32 = 0x0010;
    /// Raise accessor of an event
    pub const FIRE: u32 = 0x0020;
}

/// A row of the `MethodSemantics` table (ECMA-335 II.22.28): links an accessor method to
/// the property or event it implements.
#[derive(Clone, Debug)]
pub struct MethodSemanticsRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x18xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `MethodSemanticsAttributes` flags
    pub semantics: u32,
    /// `MethodDef` row of the accessor
    pub method: u32,
    /// The property or event, `HasSemantics` coded index
    pub association: CodedIndex,
}

impl RowReadable for MethodSemanticsRaw {
    const TABLE_ID: TableId = TableId::MethodSemantics;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: Token::from_parts(TableId::MethodSemantics as u8, rid),
            offset: *offset,
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
        })
    }
}

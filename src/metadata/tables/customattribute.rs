use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `CustomAttribute` table (ECMA-335 II.22.10).
///
/// The attribute type is not stored directly: `constructor` points at the attribute's
/// constructor, a `MethodDef` for attributes defined in this module or a `MemberRef` for
/// attributes from referenced assemblies.
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x0Cxxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// The decorated entity, `HasCustomAttribute` coded index
    pub parent: CodedIndex,
    /// The attribute constructor, `CustomAttributeType` coded index
    pub constructor: CodedIndex,
    /// `#Blob` index of the encoded constructor arguments
    pub value: u32,
}

impl RowReadable for CustomAttributeRaw {
    const TABLE_ID: TableId = TableId::CustomAttribute;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(CustomAttributeRaw {
            rid,
            token: Token::from_parts(TableId::CustomAttribute as u8, rid),
            offset: *offset,
            parent: CodedIndex::read(data, offset, sizes, CodedIndexType::HasCustomAttribute)?,
            constructor: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::CustomAttributeType,
            )?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

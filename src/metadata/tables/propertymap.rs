use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `PropertyMap` table (ECMA-335 II.22.35).
///
/// Assigns the run of `Property` rows starting at `property_list` (up to the next map row's
/// `property_list`) to the type `parent`.
#[derive(Clone, Debug)]
pub struct PropertyMapRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x15xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeDef` row owning the properties
    pub parent: u32,
    /// First row of the owned properties in the `Property` table
    pub property_list: u32,
}

impl RowReadable for PropertyMapRaw {
    const TABLE_ID: TableId = TableId::PropertyMap;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyMapRaw {
            rid,
            token: Token::from_parts(TableId::PropertyMap as u8, rid),
            offset: *offset,
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            property_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Property))?,
        })
    }
}

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `Property` table (ECMA-335 II.22.34).
///
/// Accessibility is not part of the row; it comes from the accessor methods linked through
/// `MethodSemantics`.
#[derive(Clone, Debug)]
pub struct PropertyRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x17xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `PropertyAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the property signature
    pub signature: u32,
}

impl RowReadable for PropertyRaw {
    const TABLE_ID: TableId = TableId::Property;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: Token::from_parts(TableId::Property as u8, rid),
            offset: *offset,
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x00, 0x02, // flags
            0x42, 0x00, // name
            0x43, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Property, 1)], false, false, false));
        let table = MetadataTable::<PropertyRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1700_0001);
        assert_eq!(row.flags, 0x0200);
        assert_eq!(row.name, 0x42);
        assert_eq!(row.signature, 0x43);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, // flags
            0x42, 0x00, 0x00, 0x00, // name
            0x43, 0x00, 0x00, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Property, 1)], true, true, false));
        let table = MetadataTable::<PropertyRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.name, 0x42);
        assert_eq!(row.signature, 0x43);
    }
}

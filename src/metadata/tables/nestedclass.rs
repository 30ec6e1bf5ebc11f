use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `NestedClass` table (ECMA-335 II.22.32).
#[derive(Clone, Debug)]
pub struct NestedClassRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x29xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeDef` row of the nested type
    pub nested_class: u32,
    /// `TypeDef` row of the enclosing type
    pub enclosing_class: u32,
}

impl RowReadable for NestedClassRaw {
    const TABLE_ID: TableId = TableId::NestedClass;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(NestedClassRaw {
            rid,
            token: Token::from_parts(TableId::NestedClass as u8, rid),
            offset: *offset,
            nested_class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            enclosing_class: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
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
            0x03, 0x00, // nested_class
            0x02, 0x00, // enclosing_class
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::TypeDef, 3)], false, false, false));
        let table = MetadataTable::<NestedClassRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x2900_0001);
        assert_eq!(row.nested_class, 3);
        assert_eq!(row.enclosing_class, 2);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x03, 0x00, 0x01, 0x00, // nested_class
            0x02, 0x00, 0x00, 0x00, // enclosing_class
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::TypeDef, u16::MAX as u32 + 4)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<NestedClassRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.nested_class, 0x0001_0003);
        assert_eq!(row.enclosing_class, 2);
    }
}

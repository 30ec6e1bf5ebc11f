use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// `FieldAttributes` flags of a `Field` row (ECMA-335 II.23.1.5)
pub mod FieldAttributes {
    /// Mask for the access bits
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Member not referenceable
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessible by anyone in the assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessible by sub-types anywhere, plus anyone in the assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessible by anyone who has visibility to this scope
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on the type, not per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is a compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Name is special
    pub const SPECIAL_NAME: u32 = 0x0200;
}

/// A row of the `Field` table (ECMA-335 II.22.15).
#[derive(Clone, Debug)]
pub struct FieldRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x04xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `FieldAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the field signature
    pub signature: u32,
}

impl RowReadable for FieldRaw {
    const TABLE_ID: TableId = TableId::Field;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(FieldRaw {
            rid,
            token: Token::from_parts(TableId::Field as u8, rid),
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
            0x06, 0x00, // flags
            0x42, 0x00, // name
            0x43, 0x00, // signature
            0x11, 0x00, // flags
            0x44, 0x00, // name
            0x45, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Field, 2)], false, false, false));
        let table = MetadataTable::<FieldRaw>::new(&data, 2, sizes).unwrap();

        let rows: Vec<FieldRaw> = table.iter().collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].token.value(), 0x0400_0001);
        assert_eq!(
            rows[0].flags & FieldAttributes::FIELD_ACCESS_MASK,
            FieldAttributes::PUBLIC
        );
        assert_eq!(rows[0].name, 0x42);
        assert_eq!(rows[0].signature, 0x43);

        assert_eq!(rows[1].rid, 2);
        assert_eq!(
            rows[1].flags & FieldAttributes::FIELD_ACCESS_MASK,
            FieldAttributes::PRIVATE
        );
        assert_ne!(rows[1].flags & FieldAttributes::STATIC, 0);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x01, 0x01, // flags
            0x02, 0x00, 0x00, 0x00, // name
            0x03, 0x00, 0x00, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Field, 1)], true, true, false));
        let table = MetadataTable::<FieldRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.flags, 0x0101);
        assert_eq!(row.name, 2);
        assert_eq!(row.signature, 3);
    }
}

use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

#[allow(non_snake_case)]
/// `MethodAttributes` flags of a `MethodDef` row (ECMA-335 II.23.1.10)
pub mod MethodAttributes {
    /// Mask for the access bits
    pub const MEMBER_ACCESS_MASK: u32 = 0x0007;
    /// Accessible by anyone who has visibility to this scope
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on the type, not per instance
    pub const STATIC: u32 = 0x0010;
    /// Method is virtual
    pub const VIRTUAL: u32 = 0x0040;
    /// Method has no implementation
    pub const ABSTRACT: u32 = 0x0400;
    /// Name is special (accessors, constructors)
    pub const SPECIAL_NAME: u32 = 0x0800;
}

/// A row of the `MethodDef` table (ECMA-335 II.22.26).
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x06xxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// RVA of the method body
    pub rva: u32,
    /// `MethodImplAttributes` flags
    pub impl_flags: u32,
    /// `MethodAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of this method's parameters in the `Param` table
    pub param_list: u32,
}

impl RowReadable for MethodDefRaw {
    const TABLE_ID: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::from_parts(TableId::MethodDef as u8, rid),
            offset: *offset,
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x86, 0x08, // flags
            0x42, 0x00, // name
            0x43, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodDef, 1), (TableId::Param, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0600_0001);
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.impl_flags, 0);
        assert_eq!(
            row.flags & MethodAttributes::MEMBER_ACCESS_MASK,
            MethodAttributes::PUBLIC
        );
        assert_ne!(row.flags & MethodAttributes::SPECIAL_NAME, 0);
        assert_eq!(row.name, 0x42);
        assert_eq!(row.signature, 0x43);
        assert_eq!(row.param_list, 1);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x01, 0x00, // flags
            0x42, 0x00, 0x00, 0x00, // name
            0x43, 0x00, 0x00, 0x00, // signature
            0x44, 0x00, 0x00, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Param, u16::MAX as u32 + 2)],
            true,
            true,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.flags, 1);
        assert_eq!(row.name, 0x42);
        assert_eq!(row.signature, 0x43);
        assert_eq!(row.param_list, 0x44);
    }
}

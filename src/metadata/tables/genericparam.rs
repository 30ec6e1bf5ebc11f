use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `GenericParam` table (ECMA-335 II.22.20).
///
/// Signatures refer to generic parameters by position only; this table supplies the
/// declared names.
#[derive(Clone, Debug)]
pub struct GenericParamRaw {
    /// Row id (1-based)
    pub rid: u32,
    /// Token of the row (`0x2Axxxxxx`)
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Position of the parameter in the owner's parameter list
    pub number: u32,
    /// Variance and constraint flags
    pub flags: u32,
    /// Declaring type or method, `TypeOrMethodDef` coded index
    pub owner: CodedIndex,
    /// `#Strings` index of the parameter name
    pub name: u32,
}

impl RowReadable for GenericParamRaw {
    const TABLE_ID: TableId = TableId::GenericParam;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: Token::from_parts(TableId::GenericParam as u8, rid),
            offset: *offset,
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
            0x00, 0x00, // number
            0x00, 0x00, // flags
            0x04, 0x00, // owner, TypeDef 2
            0x20, 0x00, // name
            0x01, 0x00, // number
            0x00, 0x00, // flags
            0x03, 0x00, // owner, MethodDef 1
            0x22, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::GenericParam, 2),
                (TableId::TypeDef, 2),
                (TableId::MethodDef, 1),
            ],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamRaw>::new(&data, 2, sizes).unwrap();

        let first = table.get(1).unwrap();
        assert_eq!(first.token.value(), 0x2A00_0001);
        assert_eq!(first.number, 0);
        assert_eq!(first.owner, CodedIndex::new(TableId::TypeDef, 2));
        assert_eq!(first.name, 0x20);

        let second = table.get(2).unwrap();
        assert_eq!(second.number, 1);
        assert_eq!(second.owner, CodedIndex::new(TableId::MethodDef, 1));
        assert_eq!(second.name, 0x22);
    }

    #[test]
    fn crafted_long_strings() {
        let data = vec![
            0x02, 0x00, // number
            0x00, 0x00, // flags
            0x02, 0x00, // owner, TypeDef 1
            0x10, 0x00, 0x01, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::GenericParam, 1), (TableId::TypeDef, 1)],
            true,
            false,
            false,
        ));
        let table = MetadataTable::<GenericParamRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.number, 2);
        assert_eq!(row.owner, CodedIndex::new(TableId::TypeDef, 1));
        assert_eq!(row.name, 0x0001_0010);
    }
}

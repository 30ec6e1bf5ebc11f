//! The compressed `#~` table stream (ECMA-335 II.24.2.6).
//!
//! The stream starts with a 24 byte header: a version, the heap size flags, the `valid` bit
//! vector naming the present tables and the `sorted` bit vector. A row count follows for
//! every present table, then the tables themselves, back to back in table id order.
//!
//! # Examples
//!
//! ```rust,ignore
//! use serialscope::metadata::{streams::TablesHeader, tables::TypeDefRaw};
//!
//! let tables = TablesHeader::from(tables_stream)?;
//! if let Some(types) = tables.table::<TypeDefRaw>() {
//!     for row in types.iter() {
//!         println!("{}", row.token);
//!     }
//! }
//! # Ok::<(), serialscope::Error>(())
//! ```

use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le,
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Error::OutOfBounds,
    Result,
};

/// Parsed header of the `#~` stream with the location of every present table.
pub struct TablesHeader<'a> {
    /// Major version of the table schema
    pub major_version: u8,
    /// Minor version of the table schema
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    tables: Vec<Option<(usize, usize)>>,
}

impl<'a> TablesHeader<'a> {
    /// Parses the header and locates every present table.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the stream is shorter than its tables and
    /// [`crate::Error::Malformed`] if no table is present or an unknown table is marked.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid = read_le::<u64>(&data[8..])?;
        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let info = Arc::new(TableInfo::new(data, valid)?);

        let mut tables = vec![None; TableId::COUNT];
        let mut current_offset = info.rows_end();
        for table_id in TableId::iter() {
            let rows = info.get(table_id).rows;
            if rows == 0 {
                continue;
            }

            let size = (rows as usize)
                .checked_mul(info.row_size(table_id) as usize)
                .ok_or(OutOfBounds)?;
            let end = current_offset.checked_add(size).ok_or(OutOfBounds)?;
            if end > data.len() {
                return Err(OutOfBounds);
            }

            tables[table_id as usize] = Some((current_offset, end));
            current_offset = end;
        }

        Ok(TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            valid,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            tables,
        })
    }

    /// Number of tables marked present.
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Returns `true` if the table `id` has at least one row.
    #[must_use]
    pub fn has_table(&self, id: TableId) -> bool {
        self.tables[id as usize].is_some()
    }

    /// Number of rows of table `id`.
    #[must_use]
    pub fn row_count(&self, id: TableId) -> u32 {
        self.info.get(id).rows
    }

    /// Returns a typed view of the table holding `T` rows, or `None` if it is empty.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let (start, end) = self.tables[T::TABLE_ID as usize]?;
        MetadataTable::new(
            &self.data[start..end],
            self.info.get(T::TABLE_ID).rows,
            self.info.clone(),
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tables::{FieldRaw, TypeDefRaw, TypeRefRaw},
        Error,
    };

    #[rustfmt::skip]
    fn stream() -> Vec<u8> {
        vec![
            0x00, 0x00, 0x00, 0x00,                         // reserved
            0x02, 0x00,                                     // version 2.0
            0x00,                                           // heap sizes
            0x01,                                           // reserved
            0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // valid: Module, TypeDef, Field
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // sorted
            0x01, 0x00, 0x00, 0x00,                         // Module rows
            0x02, 0x00, 0x00, 0x00,                         // TypeDef rows
            0x01, 0x00, 0x00, 0x00,                         // Field rows

            // Module
            0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
            // TypeDef 1: <Module>
            0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
            // TypeDef 2: public class extending TypeDef 1
            0x01, 0x00, 0x10, 0x00, 0x0E, 0x00, 0x07, 0x00, 0x04, 0x00, 0x01, 0x00, 0x01, 0x00,
            // Field 1
            0x06, 0x00, 0x12, 0x00, 0x01, 0x00,
        ]
    }

    #[test]
    fn crafted() {
        let data = stream();
        let tables = TablesHeader::from(&data).unwrap();

        assert_eq!(tables.major_version, 2);
        assert_eq!(tables.minor_version, 0);
        assert_eq!(tables.table_count(), 3);
        assert_eq!(tables.row_count(TableId::TypeDef), 2);
        assert!(tables.has_table(TableId::Field));
        assert!(!tables.has_table(TableId::TypeRef));
        assert!(tables.table::<TypeRefRaw>().is_none());

        let types = tables.table::<TypeDefRaw>().unwrap();
        assert_eq!(types.row_count(), 2);
        let second = types.get(2).unwrap();
        assert_eq!(second.flags, 0x0010_0001);
        assert_eq!(second.type_name, 0x0E);
        assert_eq!(second.type_namespace, 0x07);
        assert_eq!(second.extends.tag, TableId::TypeDef);
        assert_eq!(second.extends.row, 1);

        let fields = tables.table::<FieldRaw>().unwrap();
        let field = fields.get(1).unwrap();
        assert_eq!(field.flags, 0x0006);
        assert_eq!(field.name, 0x12);
        assert_eq!(field.signature, 0x01);
    }

    #[test]
    fn crafted_invalid() {
        let data = stream();
        assert!(matches!(
            TablesHeader::from(&data[..data.len() - 1]),
            Err(Error::OutOfBounds)
        ));

        let mut empty = stream();
        empty[8..16].fill(0);
        assert!(matches!(TablesHeader::from(&empty), Err(Error::Malformed { .. })));

        assert!(matches!(TablesHeader::from(&data[..20]), Err(Error::OutOfBounds)));
    }
}

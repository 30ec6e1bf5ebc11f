//! Metadata tables of the `#~` stream (ECMA-335 II.22).
//!
//! Rows are decoded lazily: a [`crate::metadata::tables::MetadataTable`] is a typed view over
//! the bytes of one table and reads a row only when it is requested. Heap and table index
//! widths come from the shared [`crate::metadata::tables::TableInfo`].
//!
//! Only the tables needed to describe types and their serializable members have row readers;
//! the layout of every other table is still known so that the tables following it can be
//! located.

mod codedindex;
mod customattribute;
mod field;
mod genericparam;
mod memberref;
mod methoddef;
mod methodsemantics;
mod nestedclass;
mod property;
mod propertymap;
mod tableid;
mod tableinfo;
mod typedef;
mod typeref;
mod typespec;

use std::marker::PhantomData;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use customattribute::CustomAttributeRaw;
pub use field::{FieldAttributes, FieldRaw};
pub use genericparam::GenericParamRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::{MethodAttributes, MethodDefRaw};
pub use methodsemantics::{MethodSemanticsAttributes, MethodSemanticsRaw};
pub use nestedclass::NestedClassRaw;
pub use property::PropertyRaw;
pub use propertymap::PropertyMapRaw;
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};
pub use typedef::{TypeAttributes, TypeDefRaw};
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

use crate::Result;

/// A row type that can be decoded from its table.
pub trait RowReadable: Sized + Send {
    /// The table this row type belongs to
    const TABLE_ID: TableId;

    /// Reads one row at `offset`, advancing it past the row.
    ///
    /// ## Arguments
    /// * `data`   - The bytes of the table
    /// * `offset` - Read position within `data`
    /// * `rid`    - 1-based row id of the row being read
    /// * `sizes`  - Index widths of the stream
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row exceeds `data` or a coded index uses
    /// an undefined tag.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed, lazily decoded view over one metadata table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Creates a view over `row_count` rows stored in `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than the rows it should hold.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = sizes.row_size(T::TABLE_ID);
        if (row_count as usize).saturating_mul(row_size as usize) > data.len() {
            return Err(crate::Error::OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Total size of the table in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of a single row in bytes.
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Returns the row with 1-based id `rid`, or `None` if it does not exist or cannot be
    /// decoded.
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<T> {
        self.row(rid).ok()
    }

    /// Returns the row with 1-based id `rid`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `rid` is not a row of this table, or the error
    /// of the row reader.
    pub fn row(&self, rid: u32) -> Result<T> {
        if rid == 0 || rid > self.row_count {
            return Err(malformed_error!(
                "Row {} of table {:?} does not exist ({} rows)",
                rid,
                T::TABLE_ID,
                self.row_count
            ));
        }

        T::row_read(
            self.data,
            &mut ((rid as usize - 1) * self.row_size as usize),
            rid,
            &self.sizes,
        )
    }

    /// Iterates over all rows in order. Iteration stops at the first row that cannot be
    /// decoded.
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = T;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over the rows of a [`MetadataTable`].
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        match T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        ) {
            Ok(row) => {
                self.current_row += 1;
                Some(row)
            }
            Err(_) => None,
        }
    }
}

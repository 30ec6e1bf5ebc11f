use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{CodedIndexType, TableId},
    Error::OutOfBounds,
    Result,
};

/// Heap size flag: `#Strings` indexes are 4 bytes
const HEAP_LARGE_STRINGS: u8 = 0x01;
/// Heap size flag: `#GUID` indexes are 4 bytes
const HEAP_LARGE_GUID: u8 = 0x02;
/// Heap size flag: `#Blob` indexes are 4 bytes
const HEAP_LARGE_BLOB: u8 = 0x04;
/// Heap size flag: 4 extra bytes follow the row counts
const HEAP_EXTRA_DATA: u8 = 0x40;

/// Row count of one table and the number of bits needed to index it.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits needed to store a row index
    pub bits: u8,
    /// `true` if a plain index into this table needs 4 bytes
    pub is_large: bool,
}

impl TableRowInfo {
    /// Creates the row info for a table with `rows` rows.
    #[must_use]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Sizing information of a `#~` stream.
///
/// Holds the row count of every table and derives from them the byte width of heap indexes,
/// table indexes and coded indexes, which in turn determine every row size.
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
    rows_end: usize,
}

/// Shared reference to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Reads the row counts that follow the 24 byte `#~` header.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row counts exceed `data` and
    /// [`crate::Error::Malformed`] if a table beyond
    /// [`crate::metadata::tables::TableId::GenericParamConstraint`] is marked present.
    pub fn new(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        if valid_bitvec >> (TableId::MAX + 1) != 0 {
            return Err(malformed_error!(
                "Unsupported tables marked as present - 0x{:016X}",
                valid_bitvec
            ));
        }

        let heap_size_flags = *data.get(6).ok_or(OutOfBounds)?;

        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];
        let mut next_row_offset = 24;
        for table_id in TableId::iter() {
            if valid_bitvec & (1 << table_id as u8) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            rows[table_id as usize] = TableRowInfo::new(row_count);
        }

        if heap_size_flags & HEAP_EXTRA_DATA != 0 {
            next_row_offset += 4;
        }

        let mut table_info = TableInfo {
            rows,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & HEAP_LARGE_STRINGS != 0,
            is_large_index_guid: heap_size_flags & HEAP_LARGE_GUID != 0,
            is_large_index_blob: heap_size_flags & HEAP_LARGE_BLOB != 0,
            rows_end: next_row_offset,
        };

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Builds sizing information directly, for tests of single row readers.
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
            rows_end: 24,
        };

        for valid_table in valid_tables {
            table_info.rows[valid_table.0 as usize] = TableRowInfo::new(valid_table.1);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Offset, relative to the `#~` stream, where the table data starts.
    #[must_use]
    pub fn rows_end(&self) -> usize {
        self.rows_end
    }

    /// Returns `true` if a plain index into `id` needs 4 bytes.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// Returns `true` if `#Strings` indexes are 4 bytes.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// Returns `true` if `#GUID` indexes are 4 bytes.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// Returns `true` if `#Blob` indexes are 4 bytes.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index in bytes.
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index in bytes.
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index in bytes.
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Returns the row information of `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Width of a plain index into `table_id` in bytes.
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].bits > 16 {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of kind `coded_index_type` in bytes.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Size in bytes of one row of `table`.
    #[must_use]
    #[rustfmt::skip]
    pub fn row_size(&self, table: TableId) -> u32 {
        let s = self.str_bytes();
        let g = self.guid_bytes();
        let b = self.blob_bytes();
        let t = |id| self.table_index_bytes(id);
        let c = |kind| self.coded_index_bytes(kind);

        u32::from(match table {
            TableId::Module                 => 2 + s + g * 3,
            TableId::TypeRef                => c(CodedIndexType::ResolutionScope) + s * 2,
            TableId::TypeDef                => 4 + s * 2 + c(CodedIndexType::TypeDefOrRef) + t(TableId::Field) + t(TableId::MethodDef),
            TableId::FieldPtr               => t(TableId::Field),
            TableId::Field                  => 2 + s + b,
            TableId::MethodPtr              => t(TableId::MethodDef),
            TableId::MethodDef              => 4 + 2 + 2 + s + b + t(TableId::Param),
            TableId::ParamPtr               => t(TableId::Param),
            TableId::Param                  => 2 + 2 + s,
            TableId::InterfaceImpl          => t(TableId::TypeDef) + c(CodedIndexType::TypeDefOrRef),
            TableId::MemberRef              => c(CodedIndexType::MemberRefParent) + s + b,
            TableId::Constant               => 2 + c(CodedIndexType::HasConstant) + b,
            TableId::CustomAttribute        => c(CodedIndexType::HasCustomAttribute) + c(CodedIndexType::CustomAttributeType) + b,
            TableId::FieldMarshal           => c(CodedIndexType::HasFieldMarshal) + b,
            TableId::DeclSecurity           => 2 + c(CodedIndexType::HasDeclSecurity) + b,
            TableId::ClassLayout            => 2 + 4 + t(TableId::TypeDef),
            TableId::FieldLayout            => 4 + t(TableId::Field),
            TableId::StandAloneSig          => b,
            TableId::EventMap               => t(TableId::TypeDef) + t(TableId::Event),
            TableId::EventPtr               => t(TableId::Event),
            TableId::Event                  => 2 + s + c(CodedIndexType::TypeDefOrRef),
            TableId::PropertyMap            => t(TableId::TypeDef) + t(TableId::Property),
            TableId::PropertyPtr            => t(TableId::Property),
            TableId::Property               => 2 + s + b,
            TableId::MethodSemantics        => 2 + t(TableId::MethodDef) + c(CodedIndexType::HasSemantics),
            TableId::MethodImpl             => t(TableId::TypeDef) + c(CodedIndexType::MethodDefOrRef) * 2,
            TableId::ModuleRef              => s,
            TableId::TypeSpec               => b,
            TableId::ImplMap                => 2 + c(CodedIndexType::MemberForwarded) + s + t(TableId::ModuleRef),
            TableId::FieldRVA               => 4 + t(TableId::Field),
            TableId::EncLog                 => 4 + 4,
            TableId::EncMap                 => 4,
            TableId::Assembly               => 4 + 8 + 4 + b + s * 2,
            TableId::AssemblyProcessor      => 4,
            TableId::AssemblyOS             => 12,
            TableId::AssemblyRef            => 8 + 4 + b * 2 + s * 2,
            TableId::AssemblyRefProcessor   => 4 + t(TableId::AssemblyRef),
            TableId::AssemblyRefOS          => 12 + t(TableId::AssemblyRef),
            TableId::File                   => 4 + s + b,
            TableId::ExportedType           => 4 + 4 + s * 2 + c(CodedIndexType::Implementation),
            TableId::ManifestResource       => 4 + 4 + s + c(CodedIndexType::Implementation),
            TableId::NestedClass            => t(TableId::TypeDef) * 2,
            TableId::GenericParam           => 2 + 2 + c(CodedIndexType::TypeOrMethodDef) + s,
            TableId::MethodSpec             => c(CodedIndexType::MethodDefOrRef) + b,
            TableId::GenericParamConstraint => t(TableId::GenericParam) + c(CodedIndexType::TypeDefOrRef),
        })
    }

    fn calculate_coded_index_size(&self, coded_index_type: CodedIndexType) -> u8 {
        let max_bits = coded_index_type
            .tables()
            .iter()
            .flatten()
            .map(|table| self.rows[*table as usize].bits)
            .max()
            .unwrap_or(1);

        max_bits + coded_index_type.tag_bits()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let size = self.calculate_coded_index_size(coded_index);
            self.coded_indexes[coded_index as usize] = size;
        }
    }
}

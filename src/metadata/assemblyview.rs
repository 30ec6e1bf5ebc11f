//! Read-only access to the metadata of a .NET module.
//!
//! [`AssemblyView`] owns the loaded image (memory-mapped or in memory) and keeps the parsed
//! [`Metadata`] (root, heaps and tables) borrowed from it. [`Metadata::parse`] works on a
//! bare metadata blob, which is what the type loader consumes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use serialscope::metadata::assemblyview::AssemblyView;
//! use std::path::Path;
//!
//! let view = AssemblyView::from_file(Path::new("Game.dll"))?;
//! println!("Runtime {}", view.metadata_root().version);
//! # Ok::<(), serialscope::Error>(())
//! ```

use ouroboros::self_referencing;
use std::{path::Path, sync::Arc};

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, Strings, TablesHeader},
    },
    Error::NotSupported,
    Result,
};

/// Heaps and tables of one metadata blob.
pub struct Metadata<'a> {
    /// Metadata root with the stream directory
    pub root: Root,
    /// The `#~` table stream
    pub tables: TablesHeader<'a>,
    /// The `#Strings` heap
    pub strings: Strings<'a>,
    /// The `#Blob` heap
    pub blobs: Blob<'a>,
}

impl<'a> Metadata<'a> {
    /// Parses the metadata root at the start of `data` and every stream it lists.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for uncompressed (`#-`) tables,
    /// [`crate::Error::Malformed`] if a required stream is missing or damaged and
    /// [`crate::Error::OutOfBounds`] if a stream lies outside `data`.
    pub fn parse(data: &'a [u8]) -> Result<Metadata<'a>> {
        let root = Root::read(data)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;

        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let Some(stream_data) = data.get(start..start + stream.size as usize) else {
                return Err(crate::Error::OutOfBounds);
            };

            match stream.name.as_str() {
                "#~" => tables = Some(TablesHeader::from(stream_data)?),
                "#-" => return Err(NotSupported),
                "#Strings" => strings = Some(Strings::from(stream_data)?),
                "#Blob" => blobs = Some(Blob::from(stream_data)?),
                _ => log::trace!("Skipping stream {}", stream.name),
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Metadata has no #~ stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Metadata has no #Strings stream"));
        };
        let Some(blobs) = blobs else {
            return Err(malformed_error!("Metadata has no #Blob stream"));
        };

        Ok(Metadata {
            root,
            tables,
            strings,
            blobs,
        })
    }
}

/// Parsed structures borrowed from the image.
pub struct AssemblyViewData<'a> {
    /// CLI header
    pub cor20header: Cor20Header,
    /// Root, heaps and tables
    pub metadata: Metadata<'a>,
}

impl<'a> AssemblyViewData<'a> {
    fn from_file(file: &'a File) -> Result<Self> {
        let (clr_rva, clr_size) = file.clr()?;
        let clr_offset = file.rva_to_offset(clr_rva)?;
        let cor20header = Cor20Header::read(file.data_slice(clr_offset, clr_size)?)?;

        let metadata_offset = file.rva_to_offset(cor20header.meta_data_rva as usize)?;
        let metadata_slice =
            file.data_slice(metadata_offset, cor20header.meta_data_size as usize)?;

        Ok(AssemblyViewData {
            cor20header,
            metadata: Metadata::parse(metadata_slice)?,
        })
    }
}

#[self_referencing]
/// A loaded .NET module with its parsed metadata.
///
/// The view is immutable; it can be shared between threads once loaded.
pub struct AssemblyView {
    /// Holds the input data, either as memory buffer or memory-mapped file
    file: Arc<File>,

    #[borrows(file)]
    #[not_covariant]
    /// Holds direct references to metadata structures in the file
    data: AssemblyViewData<'this>,
}

impl AssemblyView {
    /// Loads a .NET module from disk.
    ///
    /// # Errors
    /// Returns a resolution error ([`crate::Error::FileError`], [`crate::Error::Empty`],
    /// [`crate::Error::GoblinErr`], [`crate::Error::NotSupported`]) if the file is not a
    /// loadable .NET image, and an integrity error if its metadata is damaged.
    pub fn from_file(file: &Path) -> Result<Self> {
        let input = Arc::new(File::from_file(file)?);
        Self::load(input)
    }

    /// Loads a .NET module from a buffer.
    ///
    /// # Errors
    /// See [`AssemblyView::from_file`].
    pub fn from_mem(data: Vec<u8>) -> Result<Self> {
        let input = Arc::new(File::from_mem(data)?);
        Self::load(input)
    }

    fn load(file: Arc<File>) -> Result<Self> {
        AssemblyView::try_new(file, |file| AssemblyViewData::from_file(file))
    }

    /// Returns the CLI header.
    #[must_use]
    pub fn cor20header(&self) -> &Cor20Header {
        self.with_data(|data| &data.cor20header)
    }

    /// Returns the metadata root.
    #[must_use]
    pub fn metadata_root(&self) -> &Root {
        self.with_data(|data| &data.metadata.root)
    }

    /// Runs `f` on the parsed metadata.
    pub fn with_metadata<R>(&self, f: impl FnOnce(&Metadata<'_>) -> R) -> R {
        self.with_data(|data| f(&data.metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::tables::TableId,
        test::{game_image, game_metadata, MetadataBuilder, PeImageBuilder},
        Error,
    };

    #[test]
    fn parse_metadata() {
        let data = game_metadata();
        let metadata = Metadata::parse(&data).unwrap();

        assert_eq!(metadata.root.version, "v4.0.30319");
        assert_eq!(metadata.root.stream_headers.len(), 4);
        assert_eq!(metadata.tables.row_count(TableId::TypeDef), 7);
        assert_eq!(metadata.tables.row_count(TableId::Field), 6);
        assert_eq!(metadata.tables.row_count(TableId::Property), 4);
        assert!(!metadata.tables.has_table(TableId::Param));
        assert_eq!(metadata.strings.get(0).unwrap(), "");
    }

    #[test]
    fn load_image() {
        let view = AssemblyView::from_mem(game_image()).unwrap();

        assert_eq!(view.cor20header().cb, 72);
        assert_eq!(
            view.cor20header().meta_data_rva,
            PeImageBuilder::SECTION_RVA + 72
        );
        assert_eq!(view.metadata_root().stream_headers.len(), 4);
        assert_eq!(
            view.with_metadata(|metadata| metadata.tables.row_count(TableId::MethodDef)),
            7
        );
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &game_image()).unwrap();

        let view = AssemblyView::from_file(file.path()).unwrap();
        assert_eq!(view.metadata_root().version, "v4.0.30319");
    }

    #[test]
    fn uncompressed_tables_not_supported() {
        let data = MetadataBuilder::new().uncompressed().build();
        assert!(matches!(Metadata::parse(&data), Err(Error::NotSupported)));

        let image = PeImageBuilder::new(data).build();
        assert!(matches!(AssemblyView::from_mem(image), Err(Error::NotSupported)));
    }

    #[test]
    fn damaged_metadata() {
        let mut data = game_metadata();
        data[0] = 0x00;
        assert!(matches!(Metadata::parse(&data), Err(Error::Malformed { .. })));

        let data = game_metadata();
        assert!(Metadata::parse(&data[..64]).is_err());

        let mut image = game_image();
        // Metadata size in the CLI header, past the end of the section
        let size_offset = PeImageBuilder::SECTION_FILE_OFFSET as usize + 12;
        image[size_offset..size_offset + 4].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
        let result = AssemblyView::from_mem(image);
        assert!(result.is_err_and(|error| error.is_integrity()));
    }

    #[test]
    fn missing_files() {
        let result = AssemblyView::from_file(Path::new("/nonexistent/Game.dll"));
        assert!(matches!(result, Err(Error::FileError(_))));
    }
}

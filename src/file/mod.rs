//! PE file access for .NET assemblies.
//!
//! [`crate::file::File`] pairs a data backend (memory-mapped file or owned buffer) with the
//! `goblin` PE view borrowed from it, and offers the few operations the metadata reader needs:
//! locating the CLR runtime header and translating relative virtual addresses into file
//! offsets.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - Loaded PE image
//! - [`crate::file::Backend`] - Byte source abstraction
//! - [`crate::file::io`] - Bounds-checked little-endian reads
//! - [`crate::file::parser::Parser`] - Cursor used for blobs and signatures

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr, NotSupported},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Backend that provides the raw bytes of an image.
///
/// Implementations must be thread-safe; a loaded [`crate::file::File`] can be shared across
/// the threads that inspect types in parallel.
pub trait Backend: Send + Sync {
    /// Returns a slice of `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the complete data.
    fn data(&self) -> &[u8];

    /// Returns the total size of the data in bytes.
    fn len(&self) -> usize;
}

/// A loaded PE image together with its parsed headers.
///
/// The PE view borrows from the backend it was parsed from, the self-referencing struct keeps
/// both alive together.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Loads a PE file from disk using memory-mapped I/O.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read, [`crate::Error::Empty`]
    /// for an empty file, [`crate::Error::GoblinErr`] if it is not a PE file and
    /// [`crate::Error::NotSupported`] if it carries no CLR runtime header.
    pub fn from_file(file: &Path) -> Result<File> {
        if std::fs::metadata(file)?.len() == 0 {
            return Err(Empty);
        }

        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Loads a PE image from an in-memory buffer.
    ///
    /// # Errors
    /// See [`crate::file::File::from_file`].
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref();
            match PE::parse(data.data()) {
                Ok(pe) => match pe.header.optional_header {
                    Some(optional_header) => {
                        match optional_header.data_directories.get_clr_runtime_header() {
                            Some(clr) if clr.virtual_address != 0 && clr.size != 0 => Ok(pe),
                            _ => Err(NotSupported),
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                },
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Returns the total size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the image has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the RVA and size of the CLR runtime header.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] if the directory is missing; `load` already
    /// rejects such files, so this only fires on a misuse of the type.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let clr_dir = pe
                .header
                .optional_header
                .and_then(|header| header.data_directories.get_clr_runtime_header().copied())
                .ok_or(NotSupported)?;

            Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
        })
    }

    /// Returns the complete image data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Returns `len` bytes starting at file offset `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translates a relative virtual address into a file offset using the section table.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section contains the address or a section
    /// header overflows.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            let rva_u32 =
                u32::try_from(rva).map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

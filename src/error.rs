use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into two fatal families, matching how an inspection can fail:
///
/// ## Resolution Errors
/// The assembly could not be loaded, or the requested type does not exist in it. These abort
/// before any member is validated. See [`Error::is_resolution`].
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from the goblin crate
/// - [`Error::NotSupported`] - Not a .NET image, or an unsupported metadata layout
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::TypeNotFound`] - The requested type is not defined in the module
///
/// ## Integrity Errors
/// The metadata is damaged, or a descriptor handed to the validator is malformed. These abort
/// the running inspection rather than skipping anything silently. See [`Error::is_integrity`].
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond data boundaries
/// - [`Error::RecursionLimit`] - Signature nesting deeper than allowed
/// - [`Error::HierarchyLimit`] - Base type chain longer than allowed
/// - [`Error::InvalidMember`] - Member descriptor that cannot be validated
///
/// A member that is merely not serializable is *not* an error, it is reported through
/// [`crate::serialization::Eligibility::Ineligible`].
///
/// # Examples
///
/// ```rust,no_run
/// use serialscope::{Error, metadata::typesystem::TypeRegistry};
/// use std::path::Path;
///
/// match TypeRegistry::from_file(Path::new("Game.dll")) {
///     Ok(registry) => println!("{} types", registry.len()),
///     Err(Error::NotSupported) => eprintln!("Not a .NET assembly"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Returned for PE files without a CLR runtime header, and for metadata using the
    /// uncompressed `#-` table stream.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// The requested type is not defined in the loaded module.
    ///
    /// The associated value is the name that was looked up.
    #[error("Failed to find type - {0}")]
    TypeNotFound(String),

    /// Recursion limit reached while decoding a signature.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// The base type chain of a type is longer than the walker allows.
    ///
    /// Real inheritance chains are short and acyclic, so hitting this limit means the metadata
    /// describes a cycle or is otherwise corrupt.
    #[error("Base type chain of {type_name} exceeds {limit} types")]
    HierarchyLimit {
        /// The type the walk started from
        type_name: String,
        /// The number of types the walker was allowed to emit
        limit: usize,
    },

    /// A member descriptor is missing information the validator requires.
    #[error("Invalid member {member} - {message}")]
    InvalidMember {
        /// Qualified name of the member (`Type::Member`)
        member: String,
        /// What is missing
        message: String,
    },
}

impl Error {
    /// Returns `true` if the assembly could not be loaded or the requested type is unknown.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::FileError(_)
                | Error::GoblinErr(_)
                | Error::NotSupported
                | Error::Empty
                | Error::TypeNotFound(_)
        )
    }

    /// Returns `true` if the error was caused by malformed metadata or descriptors.
    #[must_use]
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            Error::Malformed { .. }
                | Error::OutOfBounds
                | Error::RecursionLimit(_)
                | Error::HierarchyLimit { .. }
                | Error::InvalidMember { .. }
        )
    }
}

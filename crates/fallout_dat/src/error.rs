//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`std::string::FromUtf8Error`]
    #[error(transparent)]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// a fixed-width or count-driven read ran past the end of the buffer
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes but only {available} remain")]
    UnexpectedEof {
        /// Offset the failing read started at
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// archive failed an internal consistency check
    #[error("archive is corrupt")]
    CorruptArchive(#[from] CorruptArchiveError),

    /// a script record's raw tag has no matching [`crate::types::ScriptTagType`]
    #[error("unrecognized script tag value {0:#x}")]
    UnrecognizedScriptTag(u32),

    /// the header declared a map version this library does not understand
    #[error("unsupported map version {0}")]
    UnsupportedVersion(u32),

    /// {0}
    #[error("{0}")]
    CustomError(String),
}

/// Error type to provide further information when an archive is corrupt
#[derive(Error, Diagnostic, Debug)]
pub enum CorruptArchiveError {
    /// the compressed stream could not be fully expanded
    #[error("compressed stream could not be fully expanded: {0}")]
    Stream(String),

    /// a script's local variable range escapes the local variable table
    #[error(
        "script {id}: local variable range {offset}+{count} escapes a table of length {len}"
    )]
    ScriptRange {
        /// Identifier of the offending script record
        id: u32,
        /// First local variable slot the script claims
        offset: u32,
        /// Number of slots the script claims
        count: u32,
        /// Length of the decoded local variable table
        len: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;

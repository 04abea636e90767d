//! This library handles reading from and creating the **map archives** stored in Fallout `SAVE.DAT` files.
//!
//! # Map Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the map archive format used by
//! the games *Fallout* and *Fallout 2*. A save slot stores one archive per visited map; each
//! archive carries the map's scripting state - the variable tables and the script records that
//! address them.
//!
//! ## File Structure
//!
//! An archive may be stored raw or gzip compressed. A buffer starting with the two-byte gzip
//! magic `0x1F 0x8B` is expanded first; anything else is treated as an already-raw archive.
//! The decompressed archive consists of a fixed-width header, the two variable tables, and a
//! count-prefixed script table.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Version                | 4 bytes: 19 for Fallout 1, 20 for Fallout 2                |
//! | 0x0004         | Filename               | 16 bytes: NUL-terminated ASCII map filename                |
//! | 0x0014         | Player Position        | 4 bytes: Default spawn tile                                |
//! | 0x0018         | Player Elevation       | 4 bytes: Default spawn elevation                           |
//! | 0x001C         | Player Orientation     | 4 bytes: Default spawn facing                              |
//! | 0x0020         | Local Variable Count   | 4 bytes: Number of entries in the local variable table     |
//! | 0x0024         | Script Id              | 4 bytes: Id of the map's own script, -1 when absent        |
//! | 0x0028         | Flags                  | 4 bytes: Map flags, kept raw                               |
//! | 0x002C         | Darkness               | 4 bytes: Ambient darkness level                            |
//! | 0x0030         | Global Variable Count  | 4 bytes: Number of entries in the global variable table    |
//! | 0x0034         | Map Id                 | 4 bytes: Numeric id of the map                             |
//! | 0x0038         | Ticks                  | 4 bytes: Game ticks at save time                           |
//! | 0x003C         | Reserved               | 176 bytes: Skipped on read, written as zeroes              |
//!
//! ### Header
//!
//! The header is always 236 bytes. Only the two variable counts drive the rest of the decode;
//! the remaining fields are carried through for inspection tools and editors. A version other
//! than 19 or 20 aborts the decode.
//!
//! ### Variable Tables
//!
//! Immediately after the header come the local variables (`Local Variable Count` signed 32-bit
//! values) followed by the global variables (`Global Variable Count` signed 32-bit values).
//! No count is re-read here - the header's counts are the only authority, and running out of
//! bytes mid-table is a corruption signal. Slot order is load-bearing: the scripting runtime
//! addresses variables by index.
//!
//! ### Script Table
//!
//! After the variable tables, a 4-byte record count followed by that many 16-byte records:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Id                     | 4 bytes: The script's definition identifier             |
//! | 0x0004         | Local Variable Offset  | 4 bytes: First local variable slot owned by the script  |
//! | 0x0008         | Local Variable Count   | 4 bytes: Number of consecutive slots owned              |
//! | 0x000C         | Type                   | 4 bytes: Script classification tag                      |
//!
//! The type tag is a closed enumeration:
//!
//! - `0`: System (map-entry scripts)
//! - `1`: Spatial (tile-triggered scripts)
//! - `2`: Timed (periodic scripts)
//! - `3`: Item (use-triggered scripts)
//! - `4`: Critter
//!
//! Any other value fails the whole decode; a script's `offset + count` range must also fit the
//! local variable table, and records keep their byte-stream order.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression Methods**: raw, or gzip (detected by magic)
//!

pub mod compression;
pub mod error;
pub mod read;
pub mod reader;
pub mod types;
pub mod write;

pub use compression::{try_decompress, CompressionMethod};
pub use read::DatArchive;
pub use types::ScriptTagType;
pub use write::DatWriter;

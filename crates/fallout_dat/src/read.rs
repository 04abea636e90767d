//! Types for reading map archives
//!

use std::mem;

use tracing::debug;

use crate::{
    compression::try_decompress,
    error::{CorruptArchiveError, Error, Result},
    reader::ByteReader,
    types::{DatHeader, FormatVersion, MapVariables, ScriptRecord, ScriptTagType},
};

/// Decode the fixed-width header at the reader's current position.
///
/// Fields are read in their on-disk order starting at offset 0 of the
/// decompressed buffer; the 176 reserved bytes that close the header are
/// skipped without being surfaced.
pub fn decode_header(reader: &mut ByteReader<'_>) -> Result<DatHeader> {
    let version = FormatVersion::try_from(reader.read_u32()?)?;

    let raw_name = reader.read_bytes(DatHeader::FILENAME_SIZE)?;
    let end = raw_name
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(raw_name.len());
    let filename = String::from_utf8(raw_name[..end].to_vec())?;

    let default_player_position = reader.read_i32()?;
    let default_player_elevation = reader.read_i32()?;
    let default_player_orientation = reader.read_i32()?;
    let local_variable_count = reader.read_u32()?;
    let script_id = reader.read_i32()?;
    let flags = reader.read_u32()?;
    let darkness = reader.read_i32()?;
    let global_variable_count = reader.read_u32()?;
    let map_id = reader.read_i32()?;
    let ticks = reader.read_u32()?;

    reader.skip(DatHeader::RESERVED_SIZE)?;

    Ok(DatHeader {
        version,
        filename,
        default_player_position,
        default_player_elevation,
        default_player_orientation,
        local_variable_count,
        script_id,
        flags,
        darkness,
        global_variable_count,
        map_id,
        ticks,
    })
}

/// Decode the variable tables that follow the header.
///
/// Reads exactly `header.local_variable_count` values and then exactly
/// `header.global_variable_count` values; no count is re-read from the
/// stream. Running out of bytes mid-table is always a corruption signal,
/// since the header already declared both counts.
pub fn decode_variables(
    reader: &mut ByteReader<'_>,
    header: &DatHeader,
) -> Result<MapVariables> {
    debug!(
        locals = header.local_variable_count,
        globals = header.global_variable_count,
        "decoding variable tables"
    );

    let local_variables = decode_variable_table(reader, header.local_variable_count)?;
    let global_variables = decode_variable_table(reader, header.global_variable_count)?;

    Ok(MapVariables {
        local_variables,
        global_variables,
    })
}

fn decode_variable_table(reader: &mut ByteReader<'_>, count: u32) -> Result<Vec<i32>> {
    ensure_fits(reader, count as u64 * mem::size_of::<i32>() as u64)?;

    let mut values = Vec::with_capacity(count as usize);
    for _ in 0..count {
        values.push(reader.read_i32()?);
    }

    Ok(values)
}

/// Decode the count-prefixed script table at the reader's current position.
///
/// Record order matches the byte stream exactly; the runtime addresses local
/// variable ranges by this order, so it is preserved rather than normalized.
/// A single unrecognized tag aborts the whole decode.
pub fn decode_scripts(reader: &mut ByteReader<'_>) -> Result<Vec<ScriptRecord>> {
    let script_count = reader.read_u32()?;
    ensure_fits(reader, script_count as u64 * ScriptRecord::BYTE_SIZE as u64)?;

    debug!(script_count, "decoding script table");

    let mut scripts = Vec::with_capacity(script_count as usize);
    for _ in 0..script_count {
        let id = reader.read_u32()?;
        let local_variable_offset = reader.read_u32()?;
        let local_variable_count = reader.read_u32()?;
        let script_type = ScriptTagType::try_from(reader.read_u32()?)?;

        scripts.push(ScriptRecord {
            id,
            local_variable_offset,
            local_variable_count,
            script_type,
        });
    }

    Ok(scripts)
}

// A declared count whose bytes cannot possibly fit the remaining buffer must
// fail before any allocation happens, and it fails with the same error kind a
// truncated read would produce.
fn ensure_fits(reader: &ByteReader<'_>, needed: u64) -> Result<()> {
    if needed > reader.remaining() as u64 {
        return Err(Error::UnexpectedEof {
            offset: reader.position(),
            needed: needed as usize,
            available: reader.remaining(),
        });
    }

    Ok(())
}

/// A fully decoded map archive
///
/// Construction runs the whole pipeline - decompress, header, variable
/// tables, script table - and either every stage succeeds or the caller
/// receives no archive at all. The result is an immutable snapshot.
///
/// ```no_run
/// fn summarize(bytes: &[u8]) -> fallout_dat::error::Result<()> {
///     let archive = fallout_dat::DatArchive::parse(bytes)?;
///
///     for script in archive.scripts() {
///         println!(
///             "script {} owns {} local variables",
///             script.id, script.local_variable_count
///         );
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DatArchive {
    header: DatHeader,
    variables: MapVariables,
    scripts: Vec<ScriptRecord>,
}

impl DatArchive {
    /// Parse an archive from raw map bytes, compressed or not.
    pub fn parse(bytes: &[u8]) -> Result<DatArchive> {
        let data = try_decompress(bytes)?;

        let mut reader = ByteReader::new(&data);
        let header = decode_header(&mut reader)?;
        let variables = decode_variables(&mut reader, &header)?;
        let scripts = decode_scripts(&mut reader)?;

        Self::from_parts(header, variables, scripts)
    }

    /// Assemble an archive from already-decoded parts.
    ///
    /// Used by editors that rebuild an archive before writing it out. The
    /// same invariant the parser enforces applies here: every script's local
    /// variable range must fit the local variable table.
    pub fn from_parts(
        header: DatHeader,
        variables: MapVariables,
        scripts: Vec<ScriptRecord>,
    ) -> Result<DatArchive> {
        for script in &scripts {
            let end = script.local_variable_offset as u64 + script.local_variable_count as u64;
            if end > variables.local_variables.len() as u64 {
                return Err(CorruptArchiveError::ScriptRange {
                    id: script.id,
                    offset: script.local_variable_offset,
                    count: script.local_variable_count,
                    len: variables.local_variables.len(),
                }
                .into());
            }
        }

        Ok(DatArchive {
            header,
            variables,
            scripts,
        })
    }

    /// The decoded header.
    pub fn header(&self) -> &DatHeader {
        &self.header
    }

    /// The decoded local and global variable tables.
    pub fn variables(&self) -> &MapVariables {
        &self.variables
    }

    /// The decoded script records, in byte-stream order.
    pub fn scripts(&self) -> &[ScriptRecord] {
        &self.scripts
    }

    /// The local variable slots owned by `script`.
    ///
    /// In bounds for every record of this archive - the range invariant is
    /// checked at construction.
    pub fn local_variables_for(&self, script: &ScriptRecord) -> &[i32] {
        let start = script.local_variable_offset as usize;
        &self.variables.local_variables[start..start + script.local_variable_count as usize]
    }

    /// Split the archive into its header, variable tables, and scripts.
    pub fn into_parts(self) -> (DatHeader, MapVariables, Vec<ScriptRecord>) {
        (self.header, self.variables, self.scripts)
    }
}

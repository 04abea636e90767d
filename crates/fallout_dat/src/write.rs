//! Types for writing map archives
//!

use bon::Builder;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use std::mem;

use crate::compression::{compress, CompressionMethod};
use crate::error::{Error, Result};
use crate::read::DatArchive;
use crate::types::{DatHeader, MapVariables, ScriptRecord};

/// Options for how the archive should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct DatWriterOptions {
    /// The compression method applied to the finished archive image
    #[builder(default)]
    pub compression: CompressionMethod,
}

/// Map archive generator
///
/// Serializes a [`DatArchive`] back into the on-disk layout, optionally
/// gzip compressed.
///
/// ```
/// # fn doit() -> fallout_dat::error::Result<()>
/// # {
/// use fallout_dat::write::{DatWriter, DatWriterOptions};
/// use fallout_dat::{CompressionMethod, DatArchive};
/// use fallout_dat::types::{DatHeader, FormatVersion, MapVariables};
///
/// let archive = DatArchive::from_parts(
///     DatHeader {
///         version: FormatVersion::Fallout2,
///         filename: "ARTEMPLE.SAV".into(),
///         default_player_position: 20101,
///         default_player_elevation: 0,
///         default_player_orientation: 2,
///         local_variable_count: 0,
///         script_id: -1,
///         flags: 0,
///         darkness: 1,
///         global_variable_count: 0,
///         map_id: 42,
///         ticks: 0,
///     },
///     MapVariables::default(),
///     Vec::new(),
/// )?;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let writer = DatWriter::new(
///     std::io::Cursor::new(Vec::new()),
///     DatWriterOptions::builder()
///         .compression(CompressionMethod::None)
///         .build(),
/// );
/// writer.write_archive(&archive)?;
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct DatWriter<W: Write> {
    inner: W,
    options: DatWriterOptions,
}

impl<W: Write> DatWriter<W> {
    /// Initializes the writer with the requested options.
    pub fn new(inner: W, options: DatWriterOptions) -> DatWriter<W> {
        DatWriter { inner, options }
    }

    /// Serialize `archive` and write it out.
    ///
    /// The whole image is assembled in memory, compressed as one buffer, and
    /// emitted in a single write. Returns the inner writer; one should
    /// normally not append data after it.
    pub fn write_archive(mut self, archive: &DatArchive) -> Result<W> {
        let variables = archive.variables();
        let scripts = archive.scripts();

        let mut image = Vec::with_capacity(
            DatHeader::BYTE_SIZE
                + (variables.local_variables.len() + variables.global_variables.len())
                    * mem::size_of::<i32>()
                + mem::size_of::<u32>()
                + scripts.len() * ScriptRecord::BYTE_SIZE,
        );

        encode_header(&mut image, archive.header())?;
        encode_variables(&mut image, variables)?;
        encode_scripts(&mut image, scripts)?;

        let image = compress(image, self.options.compression)?;
        self.inner.write_all(&image)?;

        Ok(self.inner)
    }
}

fn encode_header(out: &mut Vec<u8>, header: &DatHeader) -> Result<()> {
    out.write_u32::<LittleEndian>(header.version as u32)?;

    let name = header.filename.as_bytes();
    if name.len() >= DatHeader::FILENAME_SIZE {
        return Err(Error::CustomError(format!(
            "map filename '{}' does not fit the {}-byte field",
            header.filename,
            DatHeader::FILENAME_SIZE
        )));
    }
    let mut field = [0u8; DatHeader::FILENAME_SIZE];
    field[..name.len()].copy_from_slice(name);
    out.extend_from_slice(&field);

    out.write_i32::<LittleEndian>(header.default_player_position)?;
    out.write_i32::<LittleEndian>(header.default_player_elevation)?;
    out.write_i32::<LittleEndian>(header.default_player_orientation)?;
    out.write_u32::<LittleEndian>(header.local_variable_count)?;
    out.write_i32::<LittleEndian>(header.script_id)?;
    out.write_u32::<LittleEndian>(header.flags)?;
    out.write_i32::<LittleEndian>(header.darkness)?;
    out.write_u32::<LittleEndian>(header.global_variable_count)?;
    out.write_i32::<LittleEndian>(header.map_id)?;
    out.write_u32::<LittleEndian>(header.ticks)?;
    out.extend_from_slice(&[0u8; DatHeader::RESERVED_SIZE]);

    Ok(())
}

fn encode_variables(out: &mut Vec<u8>, variables: &MapVariables) -> Result<()> {
    for value in &variables.local_variables {
        out.write_i32::<LittleEndian>(*value)?;
    }
    for value in &variables.global_variables {
        out.write_i32::<LittleEndian>(*value)?;
    }

    Ok(())
}

fn encode_scripts(out: &mut Vec<u8>, scripts: &[ScriptRecord]) -> Result<()> {
    out.write_u32::<LittleEndian>(scripts.len() as u32)?;

    for script in scripts {
        out.write_u32::<LittleEndian>(script.id)?;
        out.write_u32::<LittleEndian>(script.local_variable_offset)?;
        out.write_u32::<LittleEndian>(script.local_variable_count)?;
        out.write_u32::<LittleEndian>(script.script_type as u32)?;
    }

    Ok(())
}

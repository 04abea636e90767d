//! Base types for the structure of a map archive.

use crate::error::Error;

/// Save format version declared in the first header field
///
/// Anything other than these two values fails decoding with
/// [`Error::UnsupportedVersion`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormatVersion {
    /// Maps written by Fallout 1
    Fallout1 = 19,

    /// Maps written by Fallout 2
    Fallout2 = 20,
}

impl TryFrom<u32> for FormatVersion {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            19 => Ok(FormatVersion::Fallout1),
            20 => Ok(FormatVersion::Fallout2),
            other => Err(Error::UnsupportedVersion(other)),
        }
    }
}

/// Map archive header
///
/// The fixed 236-byte prefix of the decompressed archive. All data is stored
/// in little endian format; the 176 reserved bytes at the end of the header
/// are skipped on read and written back as zeroes.
#[derive(Debug, Clone, PartialEq)]
pub struct DatHeader {
    /// The save format version
    pub version: FormatVersion,

    /// The map filename, NUL-terminated ASCII on disk
    pub filename: String,

    /// The tile the player spawns on when none is carried over
    pub default_player_position: i32,

    /// The elevation the player spawns at
    pub default_player_elevation: i32,

    /// The direction the player initially faces
    pub default_player_orientation: i32,

    /// The number of entries in the local variable table
    pub local_variable_count: u32,

    /// The id of the map's own script, if any
    pub script_id: i32,

    /// Raw map flags, kept as stored
    pub flags: u32,

    /// The ambient darkness level
    pub darkness: i32,

    /// The number of entries in the global variable table
    pub global_variable_count: u32,

    /// The numeric id of the map
    pub map_id: i32,

    /// Game ticks at the time the map was saved
    pub ticks: u32,
}

impl DatHeader {
    /// Width of the header on disk.
    pub const BYTE_SIZE: usize = 236;

    /// Width of the on-disk filename field, terminator included.
    pub const FILENAME_SIZE: usize = 16;

    /// Width of the reserved region that closes the header.
    pub const RESERVED_SIZE: usize = 176;
}

/// The local and global variable tables of one archive
///
/// Index order matches the scripting runtime's slot addressing, so both
/// tables preserve the exact order of the byte stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapVariables {
    /// Slots scoped to individual scripts via their offset ranges
    pub local_variables: Vec<i32>,

    /// Slots shared across the whole archive
    pub global_variables: Vec<i32>,
}

/// One entry in the script table
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    /// The script's definition identifier (the `sid`)
    pub id: u32,

    /// First slot in the local variable table owned by this script
    pub local_variable_offset: u32,

    /// Number of consecutive local variable slots owned by this script
    pub local_variable_count: u32,

    /// Classification of when the runtime invokes this script
    pub script_type: ScriptTagType,
}

impl ScriptRecord {
    /// Width of one record on disk.
    pub const BYTE_SIZE: usize = 16;
}

/// Classification of when the runtime invokes a script
///
/// The enumeration is closed: a raw value outside it fails conversion with
/// [`Error::UnrecognizedScriptTag`], and no variant is ever substituted for
/// an unknown code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScriptTagType {
    /// 0x00 - system scripts, run when a map is entered
    System = 0x00,

    /// 0x01 - spatial scripts, triggered from a tile
    Spatial = 0x01,

    /// 0x02 - timed scripts, invoked periodically
    Timed = 0x02,

    /// 0x03 - item scripts, run when an object is used
    Item = 0x03,

    /// 0x04 - critter scripts
    Critter = 0x04,
}

impl TryFrom<u32> for ScriptTagType {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0x00 => Ok(ScriptTagType::System),
            0x01 => Ok(ScriptTagType::Spatial),
            0x02 => Ok(ScriptTagType::Timed),
            0x03 => Ok(ScriptTagType::Item),
            0x04 => Ok(ScriptTagType::Critter),
            other => Err(Error::UnrecognizedScriptTag(other)),
        }
    }
}

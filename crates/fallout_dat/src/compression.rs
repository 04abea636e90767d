//! Archive buffer compression and decompression handling.

use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use tracing::instrument;

use crate::error::{CorruptArchiveError, Result};

/// Leading bytes of a gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Identifies the storage format of an archive buffer on disk
///
/// When creating archives, the method is chosen via
/// [`crate::write::DatWriterOptions`]. The game writes its save maps gzip
/// compressed, so that is the default.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Stores the archive bytes as they are
    None,

    /// Compress the archive using gzip
    #[default]
    Gzip,
}

/// Whether `bytes` holds a compressed archive.
///
/// The check is the two-byte gzip magic and nothing else. Every buffer
/// handed to [`try_decompress`] goes through this same predicate, so
/// detection behaves identically at every call site.
pub fn is_compressed(bytes: &[u8]) -> bool {
    bytes.len() >= GZIP_MAGIC.len() && bytes[..GZIP_MAGIC.len()] == GZIP_MAGIC
}

/// Normalize an archive buffer to its decompressed form.
///
/// Compressed input is fully expanded; anything else is passed through
/// unchanged. The returned bytes are always a fresh allocation and never
/// alias `bytes`, so downstream decoders own their buffer exclusively.
///
/// A buffer that carries the gzip magic but cannot be fully expanded fails
/// with [`crate::error::Error::CorruptArchive`]; partial output is never
/// returned.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn try_decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    if !is_compressed(bytes) {
        return Ok(bytes.to_vec());
    }

    let mut decompressed = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut decompressed)
        .map_err(|e| CorruptArchiveError::Stream(e.to_string()))?;

    Ok(decompressed)
}

/// Apply `method` to a finished archive image.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub(crate) fn compress(bytes: Vec<u8>, method: CompressionMethod) -> Result<Vec<u8>> {
    match method {
        CompressionMethod::None => Ok(bytes),
        CompressionMethod::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&bytes)?;
            Ok(encoder.finish()?)
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{compress, is_compressed, try_decompress, CompressionMethod, GZIP_MAGIC};
    use crate::error::Error;

    #[test]
    fn detects_the_gzip_magic() {
        assert!(is_compressed(&[0x1F, 0x8B, 0x08, 0x00]));
        assert!(!is_compressed(&[0x14, 0x00, 0x00, 0x00]));
        assert!(!is_compressed(&[0x1F]));
        assert!(!is_compressed(&[]));
    }

    #[test]
    fn passthrough_returns_an_independent_copy() {
        let input = vec![0x14, 0x00, 0x00, 0x00, 0x2A];

        let output = try_decompress(&input).unwrap();

        assert_eq!(output, input);
        assert_ne!(output.as_ptr(), input.as_ptr());
    }

    #[test]
    fn compress_then_decompress_round_trips() {
        let input = b"a save map archive body".to_vec();

        let packed = compress(input.clone(), CompressionMethod::Gzip).unwrap();
        assert!(is_compressed(&packed));

        let unpacked = try_decompress(&packed).unwrap();
        assert_eq!(unpacked, input);
    }

    #[test]
    fn decompress_is_idempotent_on_decompressed_input() {
        let input = vec![0x13, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03];

        let once = try_decompress(&input).unwrap();
        let twice = try_decompress(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn truncated_stream_is_a_corrupt_archive() {
        let packed = compress(vec![0u8; 512], CompressionMethod::Gzip).unwrap();
        let truncated = &packed[..packed.len() / 2];

        let err = try_decompress(truncated).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive(_)));
    }

    #[test]
    fn garbage_behind_the_magic_is_a_corrupt_archive() {
        let mut input = GZIP_MAGIC.to_vec();
        input.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0xEF]);

        let err = try_decompress(&input).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive(_)));
    }

    #[test]
    fn no_compression_leaves_the_image_untouched() {
        let input = vec![0x13, 0x00, 0x00, 0x00];

        let output = compress(input.clone(), CompressionMethod::None).unwrap();
        assert_eq!(output, input);
    }
}

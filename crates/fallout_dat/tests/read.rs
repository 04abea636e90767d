use fallout_dat::error::Error;
use fallout_dat::types::{DatHeader, FormatVersion, MapVariables, ScriptRecord};
use fallout_dat::write::{DatWriter, DatWriterOptions};
use fallout_dat::{try_decompress, CompressionMethod, DatArchive, ScriptTagType};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tracing_test::traced_test;

fn sample_archive() -> DatArchive {
    DatArchive::from_parts(
        DatHeader {
            version: FormatVersion::Fallout2,
            filename: "ARTEMPLE.SAV".into(),
            default_player_position: 20101,
            default_player_elevation: 0,
            default_player_orientation: 2,
            local_variable_count: 8,
            script_id: -1,
            flags: 0x1,
            darkness: 1,
            global_variable_count: 4,
            map_id: 44,
            ticks: 0x00BC614E,
        },
        MapVariables {
            local_variables: vec![1, 2, 3, 0, 0, -1, 7, 9],
            global_variables: vec![10, 11, 0, -3],
        },
        vec![
            ScriptRecord {
                id: 7,
                local_variable_offset: 0,
                local_variable_count: 3,
                script_type: ScriptTagType::Critter,
            },
            ScriptRecord {
                id: 266,
                local_variable_offset: 3,
                local_variable_count: 5,
                script_type: ScriptTagType::System,
            },
            ScriptRecord {
                id: 34,
                local_variable_offset: 8,
                local_variable_count: 0,
                script_type: ScriptTagType::Spatial,
            },
        ],
    )
    .expect("sample archive should satisfy the range invariant")
}

fn image(archive: &DatArchive, compression: CompressionMethod) -> Vec<u8> {
    DatWriter::new(
        Cursor::new(Vec::new()),
        DatWriterOptions::builder().compression(compression).build(),
    )
    .write_archive(archive)
    .expect("sample archive should serialize")
    .into_inner()
}

#[traced_test]
#[test]
fn table_lengths_match_the_header_counts() -> Result<(), Error> {
    let raw = image(&sample_archive(), CompressionMethod::None);

    let archive = DatArchive::parse(&raw)?;
    let header = archive.header();
    let variables = archive.variables();

    assert_eq!(
        variables.local_variables.len(),
        header.local_variable_count as usize
    );
    assert_eq!(
        variables.global_variables.len(),
        header.global_variable_count as usize
    );

    Ok(())
}

#[test]
fn every_script_range_fits_the_local_table() -> Result<(), Error> {
    let raw = image(&sample_archive(), CompressionMethod::None);

    let archive = DatArchive::parse(&raw)?;
    let locals = archive.variables().local_variables.len();

    for script in archive.scripts() {
        let end = script.local_variable_offset as usize + script.local_variable_count as usize;
        assert!(end <= locals, "script {} escapes the table", script.id);
    }

    Ok(())
}

#[test]
fn compressed_and_raw_input_decode_identically() -> Result<(), Error> {
    let archive = sample_archive();

    let from_raw = DatArchive::parse(&image(&archive, CompressionMethod::None))?;
    let from_gzip = DatArchive::parse(&image(&archive, CompressionMethod::Gzip))?;

    assert_eq!(from_raw, from_gzip);
    assert_eq!(from_raw, archive);

    Ok(())
}

#[test]
fn try_decompress_is_idempotent_on_raw_archives() -> Result<(), Error> {
    let raw = image(&sample_archive(), CompressionMethod::None);

    let once = try_decompress(&raw)?;
    let twice = try_decompress(&once)?;

    assert_eq!(once, twice);

    Ok(())
}

// The load-bearing truncation property: cutting a valid archive anywhere
// before the end of its script table must surface UnexpectedEof, never a
// silently shorter result.
#[test]
fn truncation_at_every_byte_boundary_is_an_unexpected_eof() {
    let raw = image(&sample_archive(), CompressionMethod::None);

    for len in 0..raw.len() {
        match DatArchive::parse(&raw[..len]) {
            Err(Error::UnexpectedEof { .. }) => {}
            other => panic!("truncation at {len} produced {other:?}"),
        }
    }
}

#[test]
fn truncated_compressed_stream_is_a_corrupt_archive() {
    let packed = image(&sample_archive(), CompressionMethod::Gzip);

    let err = DatArchive::parse(&packed[..packed.len() / 2]).unwrap_err();
    assert!(matches!(err, Error::CorruptArchive(_)));
}

#[test]
fn one_unrecognized_tag_yields_no_archive_at_all() {
    let mut raw = image(&sample_archive(), CompressionMethod::None);

    // Tag field of the second record: header, tables, count, one record,
    // then 12 bytes into the next record.
    let second_tag = DatHeader::BYTE_SIZE + 12 * 4 + 4 + ScriptRecord::BYTE_SIZE + 12;
    raw[second_tag..second_tag + 4].copy_from_slice(&0xABu32.to_le_bytes());

    let err = DatArchive::parse(&raw).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedScriptTag(0xAB)));
}

#[test]
fn script_order_follows_the_byte_stream() -> Result<(), Error> {
    let raw = image(&sample_archive(), CompressionMethod::None);

    let archive = DatArchive::parse(&raw)?;
    let ids: Vec<u32> = archive.scripts().iter().map(|s| s.id).collect();

    assert_eq!(ids, vec![7, 266, 34]);

    Ok(())
}

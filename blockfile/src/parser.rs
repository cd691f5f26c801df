use std::{ffi::OsStr, path::Path};

use common::{IResult, byte_field, fixed_bytes};
use nom::{Parser, combinator::map, multi::count, number::complete::le_u32};
use uuid::Uuid;

use crate::{
    AssetPath, Blockfile, BlockfileHeader, BlockfileSegment, GUID_LENGTH, error::BlockfileError,
};

impl Blockfile {
    pub fn open_from_bytes(bytes: &[u8]) -> Result<Blockfile, BlockfileError> {
        parse_blockfile(bytes)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Blockfile, BlockfileError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(&bytes)
    }
}

fn parse_header(i: &[u8]) -> IResult<'_, BlockfileHeader> {
    map(
        (le_u32, le_u32, le_u32, le_u32),
        |(version, segment_count, path_length, magic)| BlockfileHeader {
            version,
            segment_count,
            path_length,
            magic,
        },
    )
    .parse(i)
}

fn parse_segment(i: &[u8], path_length: usize) -> IResult<'_, BlockfileSegment> {
    map(
        (
            fixed_bytes::<GUID_LENGTH>,
            byte_field(path_length),
            le_u32,
            le_u32,
            le_u32,
        ),
        |(guid, path, offset, length, magic)| BlockfileSegment {
            asset_id: Uuid::from_bytes_le(guid),
            path: AssetPath::from_bytes(path),
            offset,
            length,
            magic,
        },
    )
    .parse(i)
}

fn parse_blockfile(i: &[u8]) -> Result<Blockfile, BlockfileError> {
    let (i, header) =
        parse_header(i).map_err(|_| BlockfileError::TruncatedInput { section: "header" })?;

    let segment_count = header.segment_count as usize;

    // fail before allocating anything for a table that cannot fit
    let table_length = header
        .segment_record_length()
        .and_then(|record_length| segment_count.checked_mul(record_length));

    if !matches!(table_length, Some(length) if length <= i.len()) {
        return Err(BlockfileError::TruncatedInput {
            section: "segment table",
        });
    }

    let path_length = header.path_length as usize;

    let (data, segments) = count(|i| parse_segment(i, path_length), segment_count)
        .parse(i)
        .map_err(|_| BlockfileError::TruncatedInput {
            section: "segment table",
        })?;

    log::debug!(
        "parsed blockfile v{} with {} segments and {} data bytes",
        header.version,
        segments.len(),
        data.len()
    );

    Ok(Blockfile {
        header,
        segments,
        data: data.to_vec(),
    })
}

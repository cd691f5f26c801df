use common::{IResult, fixed_bytes};
use nom::{
    Parser,
    combinator::map,
    multi::count,
    number::complete::{le_f32, le_i16, le_i32, le_u32},
};

use crate::{
    SegmentFlags, Spa, SpaFlags, SpaFrame, SpaFrameHeader, SpaHeader, SpaSegment,
    error::SpaError,
};

pub fn parse_header(i: &'_ [u8]) -> IResult<'_, SpaHeader> {
    map(
        (fixed_bytes::<2>, le_i16, le_i16, le_i16, le_u32, le_f32, le_i32),
        |(code, version, frame_count, reserved, flags, frames_per_second, data_start_offset)| {
            SpaHeader {
                code,
                version,
                frame_count,
                reserved,
                flags: SpaFlags::from_bits_retain(flags),
                frames_per_second,
                data_start_offset,
            }
        },
    )
    .parse(i)
}

pub fn parse_frame_header(i: &'_ [u8]) -> IResult<'_, SpaFrameHeader> {
    map(
        (le_i16, le_i16, le_i16, le_i16, le_i16, le_i16, le_i16, le_i16),
        |(mode, has_alpha, width, height, hot_spot_x, hot_spot_y, reserved2, segment_count)| {
            SpaFrameHeader {
                mode,
                has_alpha,
                width,
                height,
                hot_spot_x,
                hot_spot_y,
                reserved2,
                segment_count,
            }
        },
    )
    .parse(i)
}

pub fn parse_segment(i: &'_ [u8]) -> IResult<'_, SpaSegment> {
    map(
        (le_i16, le_i16, le_i16, le_i16, le_i16, le_i16, le_i32, le_i32),
        |(flags, mip_map_count, width, height, x_offset, y_offset, length, offset)| SpaSegment {
            flags: SegmentFlags::from_bits_retain(flags),
            mip_map_count,
            width,
            height,
            x_offset,
            y_offset,
            length,
            offset,
        },
    )
    .parse(i)
}

/// Segment headers sit right after the header of the frame that owns them.
pub fn parse_frame(i: &'_ [u8]) -> IResult<'_, SpaFrame> {
    let (i, header) = parse_frame_header.parse(i)?;
    let (i, segments) = count(parse_segment, header.segment_count.max(0) as usize).parse(i)?;

    Ok((i, SpaFrame { header, segments }))
}

pub fn parse_spa(bytes: &[u8]) -> Result<Spa, SpaError> {
    let (i, header) =
        parse_header(bytes).map_err(|_| SpaError::TruncatedInput { section: "header" })?;

    let (_, frames) = count(parse_frame, header.frame_count.max(0) as usize)
        .parse(i)
        .map_err(|_| SpaError::TruncatedInput {
            section: "frame headers",
        })?;

    // data_start_offset wins over wherever the frame table ended
    let data_start = usize::try_from(header.data_start_offset)
        .ok()
        .filter(|&start| start <= bytes.len())
        .ok_or(SpaError::TruncatedInput {
            section: "segment data",
        })?;

    let data = bytes[data_start..].to_vec();

    log::debug!(
        "parsed spa v{} with {} frames and {} bytes of segment data",
        header.version,
        frames.len(),
        data.len()
    );

    Ok(Spa {
        header,
        frames,
        data,
    })
}

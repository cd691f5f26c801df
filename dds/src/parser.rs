use std::array::from_fn;

use common::{IResult, fixed_bytes};
use nom::{Parser, combinator::map, multi::count, number::complete::le_u32};

use crate::{
    DDS_FILE_HEADER_LENGTH, DDS_MAGIC, DdsCaps, DdsCaps1, DdsHeader, DdsHeaderFlags, DdsImage,
    DdsPixelFormat, DdsPixelFormatFlags, error::DdsError,
};

impl DdsHeader {
    /// Reads magic and header from the start of `bytes`.
    ///
    /// Only the magic is checked. Size fields are taken as they are.
    pub fn parse(bytes: &[u8]) -> Result<DdsHeader, DdsError> {
        let (i, magic) = fixed_bytes::<4>(bytes)
            .map_err(|_| DdsError::TruncatedInput { section: "magic" })?;

        if &magic != DDS_MAGIC {
            return Err(DdsError::BadMagic { magic });
        }

        let (_, header) =
            parse_header(i).map_err(|_| DdsError::TruncatedInput { section: "header" })?;

        Ok(header)
    }
}

impl DdsImage {
    pub fn open_from_bytes(bytes: &[u8]) -> Result<DdsImage, DdsError> {
        let header = DdsHeader::parse(bytes)?;

        Ok(DdsImage {
            header,
            data: bytes[DDS_FILE_HEADER_LENGTH..].to_vec(),
        })
    }
}

fn parse_pixel_format(i: &[u8]) -> IResult<'_, DdsPixelFormat> {
    map(
        (
            le_u32, le_u32, le_u32, le_u32, le_u32, le_u32, le_u32, le_u32,
        ),
        |(_size, flags, four_cc, rgb_bit_count, r_bit_mask, g_bit_mask, b_bit_mask, a_bit_mask)| {
            DdsPixelFormat {
                flags: DdsPixelFormatFlags::from_bits_retain(flags),
                four_cc,
                rgb_bit_count,
                r_bit_mask,
                g_bit_mask,
                b_bit_mask,
                a_bit_mask,
            }
        },
    )
    .parse(i)
}

fn parse_caps(i: &[u8]) -> IResult<'_, DdsCaps> {
    map(
        (le_u32, le_u32, le_u32, le_u32),
        |(caps1, caps2, caps3, caps4)| DdsCaps {
            caps1: DdsCaps1::from_bits_retain(caps1),
            caps2,
            caps3,
            caps4,
        },
    )
    .parse(i)
}

fn parse_header(i: &[u8]) -> IResult<'_, DdsHeader> {
    map(
        (
            (le_u32, le_u32, le_u32, le_u32, le_u32, le_u32, le_u32),
            count(le_u32, 11),
            parse_pixel_format,
            parse_caps,
            le_u32,
        ),
        |(
            (_size, flags, height, width, pitch_or_linear_size, depth, mip_map_count),
            reserved1,
            pixel_format,
            caps,
            reserved2,
        )| DdsHeader {
            flags: DdsHeaderFlags::from_bits_retain(flags),
            height,
            width,
            pitch_or_linear_size,
            depth,
            mip_map_count,
            reserved1: from_fn(|idx| reserved1[idx]),
            pixel_format: Some(pixel_format),
            caps: Some(caps),
            reserved2,
        },
    )
    .parse(i)
}

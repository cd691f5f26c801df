use std::fmt;

use bitflags::bitflags;

pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
/// Value of the `size` field of the main header. Does not count the magic.
pub const DDS_HEADER_SIZE: u32 = 124;
pub const DDS_PIXEL_FORMAT_SIZE: u32 = 32;
/// Magic plus header, the offset where the payload starts.
pub const DDS_FILE_HEADER_LENGTH: usize = 128;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsHeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXELFORMAT = 0x1000;
        const MIPMAPCOUNT = 0x20000;
        const LINEARSIZE = 0x80000;
        const DEPTH = 0x800000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsPixelFormatFlags: u32 {
        const ALPHAPIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x20000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsCaps1: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x400000;
    }
}

/// Block compression tags this crate knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// BC1, opaque or 1-bit alpha
    Dxt1,
    /// BC2, explicit alpha
    Dxt3,
    /// BC3, interpolated alpha
    Dxt5,
    /// DXT5 variant with swizzled channels
    Rxgb,
    /// BC4, single channel
    Ati1,
    /// BC5, two channels
    Ati2,
}

impl FourCC {
    pub const fn as_bytes(self) -> [u8; 4] {
        match self {
            FourCC::Dxt1 => *b"DXT1",
            FourCC::Dxt3 => *b"DXT3",
            FourCC::Dxt5 => *b"DXT5",
            FourCC::Rxgb => *b"RXGB",
            FourCC::Ati1 => *b"ATI1",
            FourCC::Ati2 => *b"ATI2",
        }
    }

    /// The tag as it is stored in the `four_cc` field.
    pub const fn code(self) -> u32 {
        u32::from_le_bytes(self.as_bytes())
    }

    pub fn from_code(code: u32) -> Option<Self> {
        [
            FourCC::Dxt1,
            FourCC::Dxt3,
            FourCC::Dxt5,
            FourCC::Rxgb,
            FourCC::Ati1,
            FourCC::Ati2,
        ]
        .into_iter()
        .find(|four_cc| four_cc.code() == code)
    }

    /// Bytes per 4x4 block.
    pub const fn block_size(self) -> usize {
        match self {
            FourCC::Dxt1 | FourCC::Ati1 => 8,
            FourCC::Dxt3 | FourCC::Dxt5 | FourCC::Rxgb | FourCC::Ati2 => 16,
        }
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.as_bytes()))
    }
}

/// `DDS_PIXELFORMAT`. The `size` field is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsPixelFormat {
    pub flags: DdsPixelFormatFlags,
    pub four_cc: u32,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    pub fn compressed(four_cc: FourCC) -> Self {
        Self {
            flags: DdsPixelFormatFlags::FOURCC,
            four_cc: four_cc.code(),
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }

    pub fn known_four_cc(&self) -> Option<FourCC> {
        if !self.flags.contains(DdsPixelFormatFlags::FOURCC) {
            return None;
        }

        FourCC::from_code(self.four_cc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsCaps {
    pub caps1: DdsCaps1,
    pub caps2: u32,
    pub caps3: u32,
    pub caps4: u32,
}

impl Default for DdsCaps {
    fn default() -> Self {
        Self {
            caps1: DdsCaps1::TEXTURE,
            caps2: 0,
            caps3: 0,
            caps4: 0,
        }
    }
}

/// `DDS_HEADER`, without the magic in front of it.
///
/// `pixel_format` and `caps` are required by the format. They are optional here only so a
/// header read from somewhere else can be checked before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsHeader {
    pub flags: DdsHeaderFlags,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mip_map_count: u32,
    pub reserved1: [u32; 11],
    pub pixel_format: Option<DdsPixelFormat>,
    pub caps: Option<DdsCaps>,
    pub reserved2: u32,
}

impl DdsHeader {
    /// Header for a single block compressed surface with no mip chain.
    pub fn compressed(width: u32, height: u32, linear_size: u32, four_cc: FourCC) -> Self {
        Self {
            flags: DdsHeaderFlags::CAPS
                | DdsHeaderFlags::HEIGHT
                | DdsHeaderFlags::WIDTH
                | DdsHeaderFlags::PIXELFORMAT
                | DdsHeaderFlags::LINEARSIZE,
            height,
            width,
            pitch_or_linear_size: linear_size,
            depth: 0,
            mip_map_count: 1,
            reserved1: [0; 11],
            pixel_format: Some(DdsPixelFormat::compressed(four_cc)),
            caps: Some(DdsCaps::default()),
            reserved2: 0,
        }
    }
}

/// Header plus payload, in the layout a DDS reader expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsImage {
    pub header: DdsHeader,
    pub data: Vec<u8>,
}

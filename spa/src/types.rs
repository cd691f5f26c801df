use bitflags::bitflags;

pub const SPA_HEADER_LENGTH: usize = 20;
pub const FRAME_HEADER_LENGTH: usize = 16;
pub const SEGMENT_HEADER_LENGTH: usize = 20;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpaFlags: u32 {
        const AUTOREVERSE = 0x1;
        const AUTOLOOP = 0x2;
        const AUTODIE = 0x4;
        const BLEND = 0x10;
        const PTC = 0x20;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SegmentFlags: i16 {
        const ONE_BIT_ALPHA = 1 << 3;
        const HAS_MIP_DATA = 1 << 6;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaHeader {
    pub code: [u8; 2],
    pub version: i16,
    pub frame_count: i16,
    pub reserved: i16,
    pub flags: SpaFlags,
    pub frames_per_second: f32,
    /// Absolute file offset of the shared segment data.
    pub data_start_offset: i32,
}

impl SpaHeader {
    pub fn code_str(&self) -> String {
        common::fixed_str(&self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaFrameHeader {
    pub mode: i16,
    pub has_alpha: i16,
    pub width: i16,
    pub height: i16,
    pub hot_spot_x: i16,
    pub hot_spot_y: i16,
    pub reserved2: i16,
    pub segment_count: i16,
}

impl SpaFrameHeader {
    /// Canvas size. Negative dimensions count as zero.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaSegment {
    pub flags: SegmentFlags,
    pub mip_map_count: i16,
    pub width: i16,
    pub height: i16,
    pub x_offset: i16,
    pub y_offset: i16,
    /// Byte length inside the shared segment data.
    pub length: i32,
    /// Byte offset inside the shared segment data, not inside the file.
    pub offset: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaFrame {
    pub header: SpaFrameHeader,
    pub segments: Vec<SpaSegment>,
}

/// A parsed sprite.
///
/// Segment payloads all live in one shared blob and segments only point into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Spa {
    pub(crate) header: SpaHeader,
    pub(crate) frames: Vec<SpaFrame>,
    pub(crate) data: Vec<u8>,
}

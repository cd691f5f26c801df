use std::fmt;

use uuid::Uuid;

use crate::error::BlockfileError;

/// Width of the GUID column in a segment record.
pub const GUID_LENGTH: usize = 16;
/// `offset`, `length` and `magic` after the path column.
pub const SEGMENT_TRAILER_LENGTH: usize = 12;
pub const HEADER_LENGTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockfileHeader {
    pub version: u32,
    pub segment_count: u32,
    /// Width in bytes of every path column in the segment table.
    pub path_length: u32,
    pub magic: u32,
}

impl BlockfileHeader {
    /// `None` when the record does not fit in `usize`.
    pub fn segment_record_length(&self) -> Option<usize> {
        (self.path_length as usize).checked_add(GUID_LENGTH + SEGMENT_TRAILER_LENGTH)
    }
}

/// Raw bytes of a fixed-width path column.
///
/// The bytes are kept exactly as stored, padding included, so a parsed file writes back
/// unchanged. Use [`AssetPath::to_string_lossy`] for display.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(Vec<u8>);

impl AssetPath {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_string(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Cut or zero-padded to exactly `length` bytes, the way the path column is written.
    pub fn fitted(&self, length: usize) -> Self {
        let mut bytes = self.0.clone();
        bytes.resize(length, 0);

        Self(bytes)
    }

    /// ASCII text up to the first null.
    pub fn to_string_lossy(&self) -> String {
        common::fixed_str(&self.0)
    }

    /// Dash separated upper case hex of the whole column, e.g. `61-2E-74-00`.
    pub fn to_hex(&self) -> String {
        self.0
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<String>>()
            .join("-")
    }
}

impl fmt::Debug for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&self.to_string_lossy())
            .field(&self.0)
            .finish()
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockfileSegment {
    /// Stored on disk in the mixed-endian GUID layout.
    pub asset_id: Uuid,
    pub path: AssetPath,
    pub offset: u32,
    pub length: u32,
    pub magic: u32,
}

/// A parsed asset index.
///
/// Read-only once parsed. Go through [`Blockfile::to_builder`] to change anything, that way
/// the header count can never disagree with the segment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blockfile {
    pub(crate) header: BlockfileHeader,
    pub(crate) segments: Vec<BlockfileSegment>,
    pub(crate) data: Vec<u8>,
}

impl Blockfile {
    pub fn builder() -> BlockfileBuilder {
        BlockfileBuilder::new()
    }

    pub fn header(&self) -> &BlockfileHeader {
        &self.header
    }

    pub fn segments(&self) -> &[BlockfileSegment] {
        &self.segments
    }

    /// Everything after the segment table.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn find_segment(&self, asset_id: &Uuid) -> Option<&BlockfileSegment> {
        self.segments
            .iter()
            .find(|segment| &segment.asset_id == asset_id)
    }

    /// Bytes of segment `index`, with `offset` taken relative to the start of the data blob.
    pub fn segment_data(&self, index: usize) -> Result<&[u8], BlockfileError> {
        let segment = self
            .segments
            .get(index)
            .ok_or(BlockfileError::InvalidSegmentIndex {
                index,
                segment_count: self.segments.len(),
            })?;

        let offset = segment.offset as u64;
        let end = offset + segment.length as u64;

        if end > self.data.len() as u64 {
            return Err(BlockfileError::SegmentOutOfBounds {
                index,
                offset,
                end,
                data_length: self.data.len(),
            });
        }

        Ok(&self.data[offset as usize..end as usize])
    }

    pub fn to_builder(&self) -> BlockfileBuilder {
        let path_length = self.header.path_length as usize;
        BlockfileBuilder {
            version: self.header.version,
            path_length: self.header.path_length,
            magic: self.header.magic,
            segments: self
                .segments
                .iter()
                .map(|segment| BlockfileSegment {
                    path: segment.path.fitted(path_length),
                    ..segment.clone()
                })
                .collect(),
            data: self.data.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockfileBuilder {
    version: u32,
    path_length: u32,
    magic: u32,
    segments: Vec<BlockfileSegment>,
    data: Vec<u8>,
}

impl BlockfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    pub fn path_length(&mut self, path_length: u32) -> &mut Self {
        self.path_length = path_length;
        self
    }

    pub fn magic(&mut self, magic: u32) -> &mut Self {
        self.magic = magic;
        self
    }

    pub fn segment(&mut self, segment: BlockfileSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn data(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.data = data.into();
        self
    }

    /// Every path is fitted to `path_length`, so the result equals what reading its own
    /// bytes back gives.
    pub fn build(&self) -> Blockfile {
        let path_length = self.path_length as usize;

        Blockfile {
            header: BlockfileHeader {
                version: self.version,
                segment_count: self.segments.len() as u32,
                path_length: self.path_length,
                magic: self.magic,
            },
            segments: self
                .segments
                .iter()
                .map(|segment| BlockfileSegment {
                    path: segment.path.fitted(path_length),
                    ..segment.clone()
                })
                .collect(),
            data: self.data.clone(),
        }
    }
}

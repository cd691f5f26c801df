use std::{ffi::OsStr, path::Path};

use crate::{Spa, SpaFrame, SpaHeader, SpaSegment, error::SpaError, parser::parse_spa};

impl Spa {
    pub fn open_from_bytes(i: &[u8]) -> Result<Spa, SpaError> {
        parse_spa(i)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Spa, SpaError> {
        let file = std::fs::read(path)?;

        Self::open_from_bytes(&file)
    }

    pub fn header(&self) -> &SpaHeader {
        &self.header
    }

    pub fn frames(&self) -> &[SpaFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&SpaFrame, SpaError> {
        self.frames.get(index).ok_or(SpaError::InvalidFrameIndex {
            index,
            frame_count: self.frames.len(),
        })
    }

    /// The shared blob every segment points into.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload of `segment`, checked against the end of the shared blob.
    pub fn segment_data(&self, segment: &SpaSegment) -> Result<&[u8], SpaError> {
        let offset = segment.offset as i64;
        let end = offset + segment.length as i64;

        if offset < 0 || end < offset || end > self.data.len() as i64 {
            return Err(SpaError::SegmentOutOfBounds {
                offset,
                end,
                data_length: self.data.len(),
            });
        }

        Ok(&self.data[offset as usize..end as usize])
    }
}

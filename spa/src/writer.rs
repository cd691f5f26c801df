use byte_writer::ByteWriter;

use crate::{
    FRAME_HEADER_LENGTH, SEGMENT_HEADER_LENGTH, SPA_HEADER_LENGTH, Spa, SpaFrame, SpaFrameHeader,
    SpaHeader, SpaSegment, error::SpaError,
};

trait WriteToWriter {
    fn write_to_bytes(&self, writer: &mut ByteWriter);
}

impl Spa {
    /// Assembles a sprite from parts.
    ///
    /// Frame and segment counts are taken from the vectors, and the segment data is placed
    /// right after the last segment header.
    pub fn new(
        mut header: SpaHeader,
        mut frames: Vec<SpaFrame>,
        data: Vec<u8>,
    ) -> Result<Spa, SpaError> {
        header.frame_count = i16::try_from(frames.len()).map_err(|_| SpaError::TooManyEntries {
            what: "frames",
            count: frames.len(),
        })?;

        let mut table_length = SPA_HEADER_LENGTH;

        for frame in frames.iter_mut() {
            frame.header.segment_count =
                i16::try_from(frame.segments.len()).map_err(|_| SpaError::TooManyEntries {
                    what: "segments",
                    count: frame.segments.len(),
                })?;

            table_length += FRAME_HEADER_LENGTH + frame.segments.len() * SEGMENT_HEADER_LENGTH;
        }

        header.data_start_offset =
            i32::try_from(table_length).map_err(|_| SpaError::TooManyEntries {
                what: "header bytes",
                count: table_length,
            })?;

        Ok(Spa {
            header,
            frames,
            data,
        })
    }

    /// Header, frame table, padding up to `data_start_offset`, then segment data.
    ///
    /// Fails when `data_start_offset` points inside the header or frame table, since the blob
    /// could not be written where the header says it is.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>, SpaError> {
        let mut writer = ByteWriter::new();

        let Self {
            header,
            frames,
            data,
        } = self;

        header.write_to_bytes(&mut writer);
        frames
            .iter()
            .for_each(|frame| frame.write_to_bytes(&mut writer));

        let table_end = writer.get_offset();
        let data_start = usize::try_from(header.data_start_offset)
            .ok()
            .filter(|&start| start >= table_end)
            .ok_or(SpaError::DataStartInsideTable {
                data_start_offset: header.data_start_offset,
                table_end,
            })?;

        writer.append_padded_u8_slice(&[], data_start - table_end);
        writer.append_u8_slice(data);

        Ok(writer.data)
    }
}

impl WriteToWriter for SpaHeader {
    fn write_to_bytes(&self, writer: &mut ByteWriter) {
        let Self {
            code,
            version,
            frame_count,
            reserved,
            flags,
            frames_per_second,
            data_start_offset,
        } = self;

        writer.append_u8_slice(code);
        writer.append_i16(*version);
        writer.append_i16(*frame_count);
        writer.append_i16(*reserved);
        writer.append_u32(flags.bits());
        writer.append_f32(*frames_per_second);
        writer.append_i32(*data_start_offset);
    }
}

impl WriteToWriter for SpaFrameHeader {
    fn write_to_bytes(&self, writer: &mut ByteWriter) {
        let Self {
            mode,
            has_alpha,
            width,
            height,
            hot_spot_x,
            hot_spot_y,
            reserved2,
            segment_count,
        } = self;

        writer.append_i16(*mode);
        writer.append_i16(*has_alpha);
        writer.append_i16(*width);
        writer.append_i16(*height);
        writer.append_i16(*hot_spot_x);
        writer.append_i16(*hot_spot_y);
        writer.append_i16(*reserved2);
        writer.append_i16(*segment_count);
    }
}

impl WriteToWriter for SpaSegment {
    fn write_to_bytes(&self, writer: &mut ByteWriter) {
        let Self {
            flags,
            mip_map_count,
            width,
            height,
            x_offset,
            y_offset,
            length,
            offset,
        } = self;

        writer.append_i16(flags.bits());
        writer.append_i16(*mip_map_count);
        writer.append_i16(*width);
        writer.append_i16(*height);
        writer.append_i16(*x_offset);
        writer.append_i16(*y_offset);
        writer.append_i32(*length);
        writer.append_i32(*offset);
    }
}

impl WriteToWriter for SpaFrame {
    fn write_to_bytes(&self, writer: &mut ByteWriter) {
        let Self { header, segments } = self;

        header.write_to_bytes(writer);
        segments
            .iter()
            .for_each(|segment| segment.write_to_bytes(writer));
    }
}

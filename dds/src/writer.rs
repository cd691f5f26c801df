use std::{fs::OpenOptions, io::Write, path::Path};

use byte_writer::ByteWriter;

use crate::{
    DDS_FILE_HEADER_LENGTH, DDS_HEADER_SIZE, DDS_MAGIC, DDS_PIXEL_FORMAT_SIZE, DdsCaps,
    DdsHeader, DdsImage, DdsPixelFormat, FourCC, error::DdsError,
};

/// Header bytes to put in front of a block compressed payload of `payload_length` bytes.
///
/// The payload itself is not copied, the caller appends it.
pub fn build_wrapper(
    width: u32,
    height: u32,
    payload_length: u32,
    four_cc: FourCC,
) -> Result<Vec<u8>, DdsError> {
    DdsHeader::compressed(width, height, payload_length, four_cc).write_to_bytes()
}

impl DdsHeader {
    /// Magic and header, always [`DDS_FILE_HEADER_LENGTH`] bytes.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>, DdsError> {
        let mut writer = ByteWriter::with_capacity(DDS_FILE_HEADER_LENGTH);

        self.write_to_writer(&mut writer)?;

        Ok(writer.data)
    }

    fn write_to_writer(&self, writer: &mut ByteWriter) -> Result<(), DdsError> {
        let Some(pixel_format) = &self.pixel_format else {
            return Err(DdsError::MissingSubstructure {
                substructure: "pixel format",
            });
        };

        let Some(caps) = &self.caps else {
            return Err(DdsError::MissingSubstructure {
                substructure: "caps",
            });
        };

        writer.append_u8_slice(DDS_MAGIC);
        writer.append_u32(DDS_HEADER_SIZE);
        writer.append_u32(self.flags.bits());
        writer.append_u32(self.height);
        writer.append_u32(self.width);
        writer.append_u32(self.pitch_or_linear_size);
        writer.append_u32(self.depth);
        writer.append_u32(self.mip_map_count);
        writer.append_u32_slice(&self.reserved1);

        let DdsPixelFormat {
            flags,
            four_cc,
            rgb_bit_count,
            r_bit_mask,
            g_bit_mask,
            b_bit_mask,
            a_bit_mask,
        } = pixel_format;

        writer.append_u32(DDS_PIXEL_FORMAT_SIZE);
        writer.append_u32(flags.bits());
        writer.append_u32(*four_cc);
        writer.append_u32(*rgb_bit_count);
        writer.append_u32(*r_bit_mask);
        writer.append_u32(*g_bit_mask);
        writer.append_u32(*b_bit_mask);
        writer.append_u32(*a_bit_mask);

        let DdsCaps {
            caps1,
            caps2,
            caps3,
            caps4,
        } = caps;

        writer.append_u32(caps1.bits());
        writer.append_u32(*caps2);
        writer.append_u32(*caps3);
        writer.append_u32(*caps4);

        writer.append_u32(self.reserved2);

        Ok(())
    }
}

impl DdsImage {
    pub fn new(header: DdsHeader, data: impl Into<Vec<u8>>) -> Self {
        Self {
            header,
            data: data.into(),
        }
    }

    pub fn write_to_bytes(&self) -> Result<Vec<u8>, DdsError> {
        let mut writer = ByteWriter::with_capacity(DDS_FILE_HEADER_LENGTH + self.data.len());

        self.header.write_to_writer(&mut writer)?;
        writer.append_u8_slice(&self.data);

        Ok(writer.data)
    }

    /// Dumps the wrapped tile so it can be opened in an image viewer.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), DdsError> {
        let bytes = self.write_to_bytes()?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        file.write_all(&bytes)?;
        file.flush()?;

        Ok(())
    }
}

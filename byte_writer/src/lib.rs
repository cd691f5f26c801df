//! Little-endian appender for fixed-layout records.
//!
//! From https://github.com/khanghugo/dem/blob/master/src/byte_writer.rs

pub struct ByteWriter {
    pub data: Vec<u8>,
    offset: usize,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            offset: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            offset: 0,
        }
    }

    fn offset(&mut self, offset: usize) {
        self.offset += offset;
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    pub fn append_u32(&mut self, i: u32) {
        self.data.extend(i.to_le_bytes());
        self.offset(4);
    }

    pub fn append_i32(&mut self, i: i32) {
        self.data.extend(i.to_le_bytes());
        self.offset(4);
    }

    pub fn append_i16(&mut self, i: i16) {
        self.data.extend(i.to_le_bytes());
        self.offset(2);
    }

    pub fn append_f32(&mut self, i: f32) {
        self.data.extend(i.to_le_bytes());
        self.offset(4);
    }

    pub fn append_u8_slice(&mut self, i: &[u8]) {
        self.data.extend_from_slice(i);
        self.offset(i.len());
    }

    pub fn append_u32_slice(&mut self, i: &[u32]) {
        i.iter().for_each(|&x| self.append_u32(x));
    }

    /// Writes exactly `length` bytes.
    ///
    /// Longer input is cut at `length`, shorter input is followed by zero bytes.
    pub fn append_padded_u8_slice(&mut self, i: &[u8], length: usize) {
        let written = i.len().min(length);

        self.append_u8_slice(&i[..written]);
        self.data.resize(self.data.len() + (length - written), 0);
        self.offset(length - written);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn little_endian_layout() {
        let mut writer = ByteWriter::new();

        writer.append_u32(0x11223344);
        writer.append_i16(-2);
        writer.append_f32(1.0);

        assert_eq!(
            writer.data,
            [0x44, 0x33, 0x22, 0x11, 0xfe, 0xff, 0x00, 0x00, 0x80, 0x3f]
        );
        assert_eq!(writer.get_offset(), 10);
    }

    #[test]
    fn padded_slice_pads_short_input() {
        let mut writer = ByteWriter::new();
        writer.append_padded_u8_slice(b"a.txt", 8);

        assert_eq!(writer.data, b"a.txt\0\0\0");
        assert_eq!(writer.get_offset(), 8);
    }

    #[test]
    fn padded_slice_truncates_long_input() {
        let mut writer = ByteWriter::new();
        writer.append_padded_u8_slice(b"verylongname.ext", 8);

        assert_eq!(writer.data, b"verylong");
        assert_eq!(writer.get_offset(), 8);
    }
}

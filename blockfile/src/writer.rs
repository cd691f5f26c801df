use std::{
    ffi::OsString,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use byte_writer::ByteWriter;

use crate::{Blockfile, BlockfileSegment, HEADER_LENGTH, error::BlockfileError};

impl Blockfile {
    pub fn write_to_bytes(&self) -> Vec<u8> {
        let capacity = self
            .header
            .segment_record_length()
            .and_then(|record_length| record_length.checked_mul(self.segments.len()))
            .and_then(|table_length| table_length.checked_add(HEADER_LENGTH + self.data.len()))
            .unwrap_or_default();
        let mut writer = ByteWriter::with_capacity(capacity);

        let header = &self.header;

        writer.append_u32(header.version);
        writer.append_u32(self.segments.len() as u32);
        writer.append_u32(header.path_length);
        writer.append_u32(header.magic);

        self.segments.iter().for_each(|segment| {
            let BlockfileSegment {
                asset_id,
                path,
                offset,
                length,
                magic,
            } = segment;

            writer.append_u8_slice(&asset_id.to_bytes_le());
            writer.append_padded_u8_slice(path.as_bytes(), header.path_length as usize);
            writer.append_u32(*offset);
            writer.append_u32(*length);
            writer.append_u32(*magic);
        });

        writer.append_u8_slice(&self.data);

        writer.data
    }

    /// Replaces the file at `path` without ever leaving it half written.
    ///
    /// The bytes go to `<path>.tmp` first. Only after that file is fully written and synced
    /// is it renamed over `path`. If writing the temporary file fails, it is removed and
    /// `path` is left untouched.
    ///
    /// The rename is atomic where the platform can replace on rename (every unix and modern
    /// Windows). Where it cannot, the old file is removed before the rename, which leaves a
    /// short window where `path` does not exist.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), BlockfileError> {
        let path = path.as_ref();
        let bytes = self.write_to_bytes();
        let temp_path = temp_path_for(path);

        if let Err(err) = write_synced(&temp_path, &bytes) {
            discard_temp(&temp_path);
            return Err(err.into());
        }

        if let Err(err) = replace_file(&temp_path, path) {
            discard_temp(&temp_path);
            return Err(err.into());
        }

        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");

    PathBuf::from(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

fn replace_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        // rename refused to clobber the target
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && to.is_file() => {
            log::debug!("rename over {} failed ({err}), removing target first", to.display());

            fs::remove_file(to)?;
            fs::rename(from, to)
        }
        Err(err) => Err(err),
    }
}

fn discard_temp(temp_path: &Path) {
    if temp_path.is_file() {
        if let Err(err) = fs::remove_file(temp_path) {
            log::warn!("cannot remove {}: {err}", temp_path.display());
        }
    }
}

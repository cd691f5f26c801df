//! Asset index container ("blockfile").
//!
//! ```text
//! header          version:u32 segment_count:u32 path_length:u32 magic:u32
//! segment table   segment_count * (guid:[u8; 16] path:[u8; path_length] offset:u32 length:u32 magic:u32)
//! data            everything else, kept verbatim
//! ```
pub mod error;
mod parser;
mod types;
mod writer;

pub use types::*;

#[cfg(test)]
mod test {
    use byte_writer::ByteWriter;
    use uuid::Uuid;

    use crate::{AssetPath, Blockfile, BlockfileSegment, error::BlockfileError};

    const FIRST_ID: u128 = 0x0011_2233_4455_6677_8899_aabb_ccdd_eeff;
    const SECOND_ID: u128 = 0xfedc_ba98_7654_3210_0f1e_2d3c_4b5a_6978;

    fn segment(id: u128, path: &str, offset: u32, length: u32) -> BlockfileSegment {
        BlockfileSegment {
            asset_id: Uuid::from_u128(id),
            path: AssetPath::from_string(path),
            offset,
            length,
            magic: 0xB10C,
        }
    }

    fn two_segment_file() -> Blockfile {
        Blockfile::builder()
            .version(3)
            .path_length(8)
            .magic(0xDEADBEEF)
            .segment(segment(FIRST_ID, "a.txt", 0, 4))
            .segment(segment(SECOND_ID, "verylongname.ext", 4, 2))
            .data(vec![1, 2, 3, 4, 5, 6])
            .build()
    }

    /// Hand written copy of what `two_segment_file` must serialize to.
    fn two_segment_bytes() -> Vec<u8> {
        let mut writer = ByteWriter::new();

        writer.append_u32(3);
        writer.append_u32(2);
        writer.append_u32(8);
        writer.append_u32(0xDEADBEEF);

        writer.append_u8_slice(&Uuid::from_u128(FIRST_ID).to_bytes_le());
        writer.append_u8_slice(b"a.txt\0\0\0");
        writer.append_u32(0);
        writer.append_u32(4);
        writer.append_u32(0xB10C);

        writer.append_u8_slice(&Uuid::from_u128(SECOND_ID).to_bytes_le());
        writer.append_u8_slice(b"verylong");
        writer.append_u32(4);
        writer.append_u32(2);
        writer.append_u32(0xB10C);

        writer.append_u8_slice(&[1, 2, 3, 4, 5, 6]);

        writer.data
    }

    #[test]
    fn write_truncates_and_pads_paths() {
        assert_eq!(two_segment_file().write_to_bytes(), two_segment_bytes());
    }

    #[test]
    fn parse_write_parse() {
        let bytes = two_segment_bytes();
        let blockfile = Blockfile::open_from_bytes(&bytes).unwrap();

        assert_eq!(blockfile.header().segment_count, 2);
        assert_eq!(blockfile.header().path_length, 8);
        assert_eq!(blockfile.segments().len(), 2);

        let first = &blockfile.segments()[0];
        assert_eq!(first.asset_id, Uuid::from_u128(FIRST_ID));
        assert_eq!(first.path.as_bytes(), b"a.txt\0\0\0");
        assert_eq!(first.path.to_string_lossy(), "a.txt");
        assert_eq!(first.path.to_hex(), "61-2E-74-78-74-00-00-00");

        let second = &blockfile.segments()[1];
        assert_eq!(second.asset_id, Uuid::from_u128(SECOND_ID));
        assert_eq!(second.path.to_string_lossy(), "verylong");

        assert_eq!(blockfile.data(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(blockfile.write_to_bytes(), bytes);
    }

    #[test]
    fn guid_bytes_are_mixed_endian() {
        let bytes = two_segment_bytes();
        let blockfile = Blockfile::open_from_bytes(&bytes).unwrap();

        // first three groups of the display string are stored little endian
        assert_eq!(&bytes[16..20], [0x33, 0x22, 0x11, 0x00]);
        assert_eq!(
            blockfile.segments()[0].asset_id.to_string(),
            "00112233-4455-6677-8899-aabbccddeeff"
        );
    }

    #[test]
    fn empty_table_keeps_all_data() {
        let mut writer = ByteWriter::new();
        writer.append_u32(1);
        writer.append_u32(0);
        writer.append_u32(64);
        writer.append_u32(7);
        writer.append_u8_slice(b"opaque");

        let blockfile = Blockfile::open_from_bytes(&writer.data).unwrap();

        assert!(blockfile.segments().is_empty());
        assert_eq!(blockfile.data(), b"opaque");
        assert_eq!(blockfile.write_to_bytes(), writer.data);
    }

    #[test]
    fn short_header() {
        let err = Blockfile::open_from_bytes(&[0u8; 15]).unwrap_err();

        assert!(matches!(
            err,
            BlockfileError::TruncatedInput { section: "header" }
        ));
    }

    #[test]
    fn segment_count_larger_than_table() {
        let mut bytes = two_segment_bytes();
        // claim five segments, only two are there
        bytes[4..8].copy_from_slice(&5u32.to_le_bytes());

        let err = Blockfile::open_from_bytes(&bytes).unwrap_err();

        assert!(matches!(
            err,
            BlockfileError::TruncatedInput {
                section: "segment table"
            }
        ));
    }

    #[test]
    fn huge_segment_count() {
        let mut bytes = two_segment_bytes();
        bytes[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());

        assert!(Blockfile::open_from_bytes(&bytes).is_err());
    }

    #[test]
    fn huge_path_column() {
        let mut bytes = two_segment_bytes();
        bytes[8..12].copy_from_slice(&u32::MAX.to_le_bytes());

        assert!(matches!(
            Blockfile::open_from_bytes(&bytes),
            Err(BlockfileError::TruncatedInput {
                section: "segment table"
            })
        ));
    }

    #[test]
    fn builder_fits_paths_to_column() {
        let blockfile = two_segment_file();

        assert_eq!(blockfile.segments()[0].path.as_bytes(), b"a.txt\0\0\0");
        assert_eq!(blockfile.segments()[1].path.as_bytes(), b"verylong");

        let reparsed = Blockfile::open_from_bytes(&blockfile.write_to_bytes()).unwrap();
        assert_eq!(reparsed, blockfile);
    }

    #[test]
    fn builder_derives_segment_count() {
        let blockfile = Blockfile::open_from_bytes(&two_segment_bytes()).unwrap();

        let edited = blockfile
            .to_builder()
            .segment(segment(3, "new", 0, 1))
            .build();

        assert_eq!(edited.header().segment_count, 3);
        assert_eq!(edited.segments().len(), 3);

        let reparsed = Blockfile::open_from_bytes(&edited.write_to_bytes()).unwrap();
        assert_eq!(reparsed.segments()[2].path.to_string_lossy(), "new");
        assert_eq!(reparsed.data(), blockfile.data());

        // the parsed value is untouched
        assert_eq!(blockfile.segments().len(), 2);
    }

    #[test]
    fn segment_data_is_fenced() {
        let blockfile = two_segment_file();

        assert_eq!(blockfile.segment_data(0).unwrap(), [1, 2, 3, 4]);
        assert_eq!(blockfile.segment_data(1).unwrap(), [5, 6]);
        assert!(matches!(
            blockfile.segment_data(2),
            Err(BlockfileError::InvalidSegmentIndex { index: 2, .. })
        ));

        let broken = blockfile
            .to_builder()
            .segment(segment(3, "past_end", 5, 2))
            .build();

        assert!(matches!(
            broken.segment_data(2),
            Err(BlockfileError::SegmentOutOfBounds { end: 7, .. })
        ));
    }

    #[test]
    fn find_segment_by_id() {
        let blockfile = two_segment_file();

        let found = blockfile
            .find_segment(&Uuid::from_u128(SECOND_ID))
            .unwrap();
        assert_eq!(found.offset, 4);

        assert!(blockfile.find_segment(&Uuid::nil()).is_none());
    }

    #[test]
    fn write_to_file_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.blockfile");

        std::fs::write(&path, b"old contents").unwrap();

        let blockfile = two_segment_file();
        blockfile.write_to_file(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), two_segment_bytes());
        assert!(!dir.path().join("assets.blockfile.tmp").exists());

        let reopened = Blockfile::open_from_file(&path).unwrap();
        assert_eq!(reopened, blockfile);
    }

    #[test]
    fn write_to_file_creates_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.blockfile");

        two_segment_file().write_to_file(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), two_segment_bytes());
    }

    #[test]
    fn failed_temp_write_leaves_target_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.blockfile");

        std::fs::write(&path, b"old contents").unwrap();
        // a directory squatting on the temp name makes the temp write fail
        std::fs::create_dir(dir.path().join("assets.blockfile.tmp")).unwrap();

        let err = two_segment_file().write_to_file(&path).unwrap_err();

        assert!(matches!(err, BlockfileError::IOError { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"old contents");
    }
}

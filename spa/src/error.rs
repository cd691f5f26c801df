use dds::error::DdsError;

#[derive(Debug, thiserror::Error)]
pub enum SpaError {
    #[error("Unexpected end of input while reading {section}")]
    TruncatedInput { section: &'static str },
    #[error("Frame {index} does not exist. Sprite has {frame_count} frames")]
    InvalidFrameIndex { index: usize, frame_count: usize },
    #[error("Segment spans {offset}..{end} but segment data is {data_length} bytes")]
    SegmentOutOfBounds {
        offset: i64,
        end: i64,
        data_length: usize,
    },
    #[error("Segment {segment_index} has an unsupported format: {message}")]
    UnsupportedFormat {
        segment_index: usize,
        message: String,
    },
    #[error("Failed to decode segment {segment_index}: {message}")]
    DecodeFailure {
        segment_index: usize,
        message: String,
    },
    #[error("Segment data starts at {data_start_offset} but the frame table ends at {table_end}")]
    DataStartInsideTable {
        data_start_offset: i32,
        table_end: usize,
    },
    #[error("Too many {what} to fit the format: {count}")]
    TooManyEntries { what: &'static str, count: usize },
    #[error("Cannot wrap segment: {source}")]
    Wrapper {
        #[from]
        source: DdsError,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}

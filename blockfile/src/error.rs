#[derive(Debug, thiserror::Error)]
pub enum BlockfileError {
    #[error("Unexpected end of input while reading {section}")]
    TruncatedInput { section: &'static str },
    #[error("Segment {index} does not exist. Blockfile has {segment_count} segments")]
    InvalidSegmentIndex { index: usize, segment_count: usize },
    #[error("Segment {index} spans {offset}..{end} but data blob is {data_length} bytes")]
    SegmentOutOfBounds {
        index: usize,
        offset: u64,
        end: u64,
        data_length: usize,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}

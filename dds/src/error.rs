#[derive(Debug, thiserror::Error)]
pub enum DdsError {
    #[error("DDS header has no {substructure} block")]
    MissingSubstructure { substructure: &'static str },
    #[error("Unexpected end of input while reading {section}")]
    TruncatedInput { section: &'static str },
    #[error("Not a DDS file. Magic: {magic:02x?}")]
    BadMagic { magic: [u8; 4] },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}

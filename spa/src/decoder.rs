use image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum TileDecodeError {
    /// The decoder does not recognize the wrapped payload.
    #[error("{message}")]
    Unsupported { message: String },
    /// The payload was recognized but could not be decoded.
    #[error("{message}")]
    Failed { message: String },
}

/// Turns a DDS wrapped segment into pixels.
///
/// The compositor hands over the 128 byte DDS header followed by the segment payload.
/// Returned rows are expected bottom to top, the way most DDS loaders hand them out, and are
/// flipped before they land on the canvas.
///
/// Frames may be composited from several threads at once, so a decoder must not share
/// mutable state between calls.
pub trait TileDecoder {
    fn decode(&self, dds: &[u8]) -> Result<RgbaImage, TileDecodeError>;
}

impl<F> TileDecoder for F
where
    F: Fn(&[u8]) -> Result<RgbaImage, TileDecodeError>,
{
    fn decode(&self, dds: &[u8]) -> Result<RgbaImage, TileDecodeError> {
        self(dds)
    }
}

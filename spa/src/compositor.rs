use dds::{FourCC, build_wrapper};
use image::{
    RgbaImage,
    imageops::{flip_vertical, replace},
};

use crate::{
    Spa, SpaFrame, SpaFrameHeader,
    decoder::{TileDecodeError, TileDecoder},
    error::SpaError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOptions {
    /// Segments hold block compressed tiles. When off, the frame's segments are
    /// concatenated and read as one raw 32-bit image.
    pub compressed: bool,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self { compressed: true }
    }
}

/// Compression tag used for every segment of a frame.
///
/// A zero `has_alpha` picks DXT1 and anything else picks DXT5. Yes, inverted from what the
/// field name says. Existing sprites are encoded this way.
pub fn tile_four_cc(header: &SpaFrameHeader) -> FourCC {
    if header.has_alpha == 0 {
        FourCC::Dxt1
    } else {
        FourCC::Dxt5
    }
}

/// Free function form of [`Spa::composite_frame`].
pub fn composite_frame<D>(
    spa: &Spa,
    frame_index: usize,
    decoder: &D,
    compressed: bool,
) -> Result<RgbaImage, SpaError>
where
    D: TileDecoder + ?Sized,
{
    spa.composite_frame(frame_index, decoder, CompositeOptions { compressed })
}

impl Spa {
    /// Builds the full image for one frame.
    ///
    /// Either every segment lands on the canvas or an error comes back, a partly drawn frame
    /// is never returned.
    pub fn composite_frame<D>(
        &self,
        frame_index: usize,
        decoder: &D,
        options: CompositeOptions,
    ) -> Result<RgbaImage, SpaError>
    where
        D: TileDecoder + ?Sized,
    {
        let frame = self.frame(frame_index)?;

        if options.compressed {
            self.composite_compressed(frame, decoder)
        } else {
            self.composite_raw(frame)
        }
    }

    fn composite_compressed<D>(&self, frame: &SpaFrame, decoder: &D) -> Result<RgbaImage, SpaError>
    where
        D: TileDecoder + ?Sized,
    {
        let (width, height) = frame.header.dimensions();
        // zeroed pixels are fully transparent
        let mut canvas = RgbaImage::new(width, height);
        let four_cc = tile_four_cc(&frame.header);

        for (segment_index, segment) in frame.segments.iter().enumerate() {
            if segment.length == 0 {
                log::trace!("segment {segment_index} is empty");
                continue;
            }

            let payload = self.segment_data(segment)?;

            let mut dds = build_wrapper(
                segment.width.max(0) as u32,
                segment.height.max(0) as u32,
                payload.len() as u32,
                four_cc,
            )?;
            dds.extend_from_slice(payload);

            let tile = decoder.decode(&dds).map_err(|err| match err {
                TileDecodeError::Unsupported { message } => SpaError::UnsupportedFormat {
                    segment_index,
                    message,
                },
                TileDecodeError::Failed { message } => SpaError::DecodeFailure {
                    segment_index,
                    message,
                },
            })?;

            log::debug!(
                "segment {segment_index}: {}x{} {four_cc} tile at ({}, {})",
                tile.width(),
                tile.height(),
                segment.x_offset,
                segment.y_offset
            );

            // decoder rows are bottom to top
            let tile = flip_vertical(&tile);

            replace(
                &mut canvas,
                &tile,
                segment.x_offset as i64,
                segment.y_offset as i64,
            );
        }

        Ok(canvas)
    }

    /// Raw frames ignore segment placement. The segments are only pieces of one
    /// bottom-up RGBA image.
    fn composite_raw(&self, frame: &SpaFrame) -> Result<RgbaImage, SpaError> {
        let (width, height) = frame.header.dimensions();
        let expected = width as usize * height as usize * 4;

        let mut pixels = Vec::with_capacity(expected);

        for segment in frame.segments.iter().filter(|segment| segment.length != 0) {
            pixels.extend_from_slice(self.segment_data(segment)?);
        }

        if pixels.len() < expected {
            return Err(SpaError::TruncatedInput {
                section: "raw frame pixels",
            });
        }

        pixels.truncate(expected);

        let bottom_up = RgbaImage::from_raw(width, height, pixels).ok_or(
            SpaError::TruncatedInput {
                section: "raw frame pixels",
            },
        )?;

        Ok(flip_vertical(&bottom_up))
    }
}

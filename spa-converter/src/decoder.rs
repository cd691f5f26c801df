use dds::{DDS_FILE_HEADER_LENGTH, DdsHeader, FourCC};
use image::{
    RgbaImage,
    imageops::{crop_imm, flip_vertical},
};
use spa::{TileDecodeError, TileDecoder};

type BlockDecoder = fn(&[u8], &mut [u8], usize);

/// DXT1 and DXT5 tiles through `bcdec_rs`.
///
/// Holds no state, one instance can serve every thread.
pub struct BcTileDecoder;

impl TileDecoder for BcTileDecoder {
    fn decode(&self, dds: &[u8]) -> Result<RgbaImage, TileDecodeError> {
        let header = DdsHeader::parse(dds).map_err(|err| TileDecodeError::Unsupported {
            message: err.to_string(),
        })?;

        let four_cc = header
            .pixel_format
            .as_ref()
            .and_then(|pixel_format| pixel_format.known_four_cc());

        let (four_cc, decode_block): (FourCC, BlockDecoder) = match four_cc {
            Some(FourCC::Dxt1) => (FourCC::Dxt1, bcdec_rs::bc1),
            Some(FourCC::Dxt5) => (FourCC::Dxt5, bcdec_rs::bc3),
            other => {
                return Err(TileDecodeError::Unsupported {
                    message: format!("no block decoder for {other:?}"),
                });
            }
        };

        let width = header.width as usize;
        let height = header.height as usize;
        let blocks_x = width.div_ceil(4);
        let blocks_y = height.div_ceil(4);
        let block_size = four_cc.block_size();

        let payload = &dds[DDS_FILE_HEADER_LENGTH..];
        let needed = blocks_x * blocks_y * block_size;

        if payload.len() < needed {
            return Err(TileDecodeError::Failed {
                message: format!(
                    "{width}x{height} {four_cc} needs {needed} bytes, payload has {}",
                    payload.len()
                ),
            });
        }

        // decode whole blocks, crop the padding afterwards
        let pitch = blocks_x * 4 * 4;
        let mut pixels = vec![0u8; pitch * blocks_y * 4];

        for block_y in 0..blocks_y {
            for block_x in 0..blocks_x {
                let block_start = (block_y * blocks_x + block_x) * block_size;
                let block = &payload[block_start..block_start + block_size];
                let pixel_start = block_y * 4 * pitch + block_x * 4 * 4;

                decode_block(block, &mut pixels[pixel_start..], pitch);
            }
        }

        let padded = RgbaImage::from_raw((blocks_x * 4) as u32, (blocks_y * 4) as u32, pixels)
            .ok_or(TileDecodeError::Failed {
                message: "decoded buffer has the wrong size".to_string(),
            })?;

        let tile = crop_imm(&padded, 0, 0, width as u32, height as u32).to_image();

        // bottom row first, same as every other DDS loader
        Ok(flip_vertical(&tile))
    }
}

#[cfg(test)]
mod test {
    use dds::{DdsHeader, DdsImage, FourCC};
    use image::Rgba;
    use spa::{TileDecodeError, TileDecoder};

    use super::BcTileDecoder;

    /// DXT1 block with both endpoints pure red and every index 0.
    const RED_DXT1_BLOCK: [u8; 8] = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0];

    fn wrap(width: u32, height: u32, four_cc: FourCC, payload: Vec<u8>) -> Vec<u8> {
        let header = DdsHeader::compressed(width, height, payload.len() as u32, four_cc);

        DdsImage::new(header, payload).write_to_bytes().unwrap()
    }

    #[test]
    fn solid_dxt1() {
        let dds = wrap(8, 4, FourCC::Dxt1, RED_DXT1_BLOCK.repeat(2));

        let tile = BcTileDecoder.decode(&dds).unwrap();

        assert_eq!(tile.dimensions(), (8, 4));
        assert!(tile.pixels().all(|pixel| *pixel == Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn crops_partial_blocks() {
        let dds = wrap(3, 2, FourCC::Dxt1, RED_DXT1_BLOCK.to_vec());

        let tile = BcTileDecoder.decode(&dds).unwrap();

        assert_eq!(tile.dimensions(), (3, 2));
    }

    #[test]
    fn short_payload() {
        let dds = wrap(8, 8, FourCC::Dxt5, vec![0u8; 16]);

        assert!(matches!(
            BcTileDecoder.decode(&dds),
            Err(TileDecodeError::Failed { .. })
        ));
    }

    #[test]
    fn unknown_format() {
        let dds = wrap(4, 4, FourCC::Ati2, vec![0u8; 16]);

        assert!(matches!(
            BcTileDecoder.decode(&dds),
            Err(TileDecodeError::Unsupported { .. })
        ));

        assert!(matches!(
            BcTileDecoder.decode(b"not a dds"),
            Err(TileDecodeError::Unsupported { .. })
        ));
    }
}

use std::path::{Path, PathBuf};

use dds::{DdsHeader, DdsImage};
use eyre::{WrapErr, eyre};
use rayon::prelude::*;
use spa::{CompositeOptions, Spa, tile_four_cc};

use crate::decoder::BcTileDecoder;

pub struct FramesArgs {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub raw: bool,
    pub frame: Option<usize>,
    pub dump_tiles: bool,
}

pub fn run(args: FramesArgs) -> eyre::Result<()> {
    let spa = Spa::open_from_file(&args.path)
        .wrap_err_with(|| format!("cannot open {}", args.path.display()))?;

    let header = spa.header();
    let size = std::fs::metadata(&args.path)?.len();

    log::info!("size: {size} bytes");
    log::info!("version: {}", header.version);
    log::info!("frames: {}", spa.frame_count());
    log::info!("frames per second: {}", header.frames_per_second);

    let stem = args
        .path
        .file_stem()
        .ok_or_else(|| eyre!("{} has no file name", args.path.display()))?
        .to_string_lossy()
        .to_string();

    let output = match args.output {
        Some(output) => output,
        None => args
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    std::fs::create_dir_all(&output)
        .wrap_err_with(|| format!("cannot create {}", output.display()))?;

    let frames: Vec<usize> = match args.frame {
        Some(index) => vec![index],
        None => (0..spa.frame_count()).collect(),
    };

    let options = CompositeOptions {
        compressed: !args.raw,
    };

    frames.into_par_iter().try_for_each(|index| {
        if args.dump_tiles && options.compressed {
            dump_tiles(&spa, index, &output, &stem)?;
        }

        let image = spa
            .composite_frame(index, &BcTileDecoder, options)
            .wrap_err_with(|| format!("cannot composite frame {index}"))?;

        let out_path = output.join(format!("{stem}_{index}.png"));

        image
            .save(&out_path)
            .wrap_err_with(|| format!("cannot save {}", out_path.display()))?;

        log::info!("saved {}", out_path.display());

        Ok(())
    })
}

fn dump_tiles(spa: &Spa, index: usize, output: &Path, stem: &str) -> eyre::Result<()> {
    let frame = spa.frame(index)?;
    let four_cc = tile_four_cc(&frame.header);

    for (segment_index, segment) in frame.segments.iter().enumerate() {
        if segment.length == 0 {
            continue;
        }

        let payload = spa.segment_data(segment)?;
        let header = DdsHeader::compressed(
            segment.width.max(0) as u32,
            segment.height.max(0) as u32,
            payload.len() as u32,
            four_cc,
        );

        let out_path = output.join(format!("{stem}_{index}_{segment_index}.dds"));

        DdsImage::new(header, payload)
            .write_to_file(&out_path)
            .wrap_err_with(|| format!("cannot write {}", out_path.display()))?;

        log::debug!("dumped {}", out_path.display());
    }

    Ok(())
}

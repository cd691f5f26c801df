use std::path::Path;

use eyre::WrapErr;
use spa::{Spa, tile_four_cc};

pub fn run(path: &Path) -> eyre::Result<()> {
    let spa =
        Spa::open_from_file(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;

    let header = spa.header();

    println!(
        "{} v{} flags {:?} {} fps, data at {}",
        header.code_str(),
        header.version,
        header.flags,
        header.frames_per_second,
        header.data_start_offset
    );

    for (index, frame) in spa.frames().iter().enumerate() {
        let (width, height) = frame.header.dimensions();

        println!(
            "frame {index}: {width}x{height} hot spot ({}, {}) {} segments, {}",
            frame.header.hot_spot_x,
            frame.header.hot_spot_y,
            frame.segments.len(),
            tile_four_cc(&frame.header)
        );

        for (segment_index, segment) in frame.segments.iter().enumerate() {
            println!(
                "  segment {segment_index}: {}x{} at ({}, {}) data {}+{} flags {:?}",
                segment.width,
                segment.height,
                segment.x_offset,
                segment.y_offset,
                segment.offset,
                segment.length,
                segment.flags
            );
        }
    }

    Ok(())
}

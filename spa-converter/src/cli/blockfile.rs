use std::path::Path;

use blockfile::Blockfile;
use eyre::WrapErr;

pub fn run(path: &Path, rewrite: bool) -> eyre::Result<()> {
    let blockfile = Blockfile::open_from_file(path)
        .wrap_err_with(|| format!("cannot open {}", path.display()))?;

    let header = blockfile.header();

    println!(
        "version {} magic {:#010x} path length {} segments {}",
        header.version, header.magic, header.path_length, header.segment_count
    );

    for segment in blockfile.segments() {
        println!(
            "{} {} ({}) data {}+{} magic {:#010x}",
            segment.asset_id,
            segment.path,
            segment.path.to_hex(),
            segment.offset,
            segment.length,
            segment.magic
        );
    }

    if rewrite {
        blockfile
            .write_to_file(path)
            .wrap_err_with(|| format!("cannot rewrite {}", path.display()))?;

        log::info!("rewrote {}", path.display());
    }

    Ok(())
}

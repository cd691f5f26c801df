mod blockfile;
mod frames;
mod info;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about = "Inspect and convert SPA sprites", long_about = None)]
struct SpaConverterCli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Composites frames and saves them as PNG
    Frames {
        /// Path to .spa file
        path: PathBuf,
        /// Output folder, defaults to the folder of the .spa file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Segments hold raw 32-bit pixels instead of compressed tiles
        #[arg(long)]
        raw: bool,
        /// Only this frame
        #[arg(short, long)]
        frame: Option<usize>,
        /// Also writes every compressed tile as its own .dds file
        #[arg(long)]
        dump_tiles: bool,
    },
    /// Prints the frame and segment tables
    Info {
        /// Path to .spa file
        path: PathBuf,
    },
    /// Lists the segments of a block file
    Blockfile {
        /// Path to block file
        path: PathBuf,
        /// Writes the file back in place
        #[arg(long)]
        rewrite: bool,
    },
}

pub fn cli() -> eyre::Result<()> {
    let cli = SpaConverterCli::parse();

    match cli.command {
        Commands::Frames {
            path,
            output,
            raw,
            frame,
            dump_tiles,
        } => frames::run(frames::FramesArgs {
            path,
            output,
            raw,
            frame,
            dump_tiles,
        }),
        Commands::Info { path } => info::run(&path),
        Commands::Blockfile { path, rewrite } => blockfile::run(&path, rewrite),
    }
}

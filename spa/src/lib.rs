//! SPA sprite container.
//!
//! ```text
//! header      code:[u8; 2] version:i16 frame_count:i16 reserved:i16 flags:u32 fps:f32 data_start:i32
//! frames      frame_count * (frame header, then segment_count segment headers)
//! data        from data_start to the end of the file, shared by every segment
//! ```
//!
//! Segments are block compressed tiles placed on the frame canvas. See [`Spa::composite_frame`].
mod compositor;
mod decoder;
pub mod error;
mod parser;
mod types;
mod utils;
mod writer;

pub use compositor::{CompositeOptions, composite_frame, tile_four_cc};
pub use decoder::{TileDecodeError, TileDecoder};
pub use types::*;

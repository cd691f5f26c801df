//! Minimal DDS container support.
//!
//! Enough to put a `DDS ` header in front of a raw block compressed surface so a generic
//! decoder will take it, and to read that header back.
//!
//! Layout from https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-header
pub mod error;
mod parser;
mod types;
mod writer;

pub use types::*;
pub use writer::build_wrapper;

//! Growable-buffer gzip/zlib compression for gzflow
//!
//! This crate drives a zlib-compatible DEFLATE engine over whole in-memory
//! buffers. It includes:
//!
//! - **Streaming driver**: [`Codec`] feeds all input through the engine,
//!   growing the output buffer as needed and truncating it to the exact
//!   number of bytes produced
//! - **Engine contract**: the [`Engine`]/[`EngineStream`] traits, with
//!   [`Flate2Engine`] as the default `flate2` binding
//! - **Format sniffing**: [`looks_compressed`] checks for the gzip magic
//! - **Error translation**: engine status codes become
//!   [`gzflow_types::Error`] values with a fixed set of kinds
//!
//! Compression always emits RFC 1952 gzip. Decompression accepts gzip or
//! RFC 1950 zlib, detected from the header.
//!
//! # Examples
//!
//! ```rust
//! use gzflow_compression::{compress, decompress, looks_compressed};
//! use gzflow_types::CompressionLevel;
//!
//! let data = b"Hello, world! This is test data for compression.".repeat(10);
//!
//! let compressed = compress(&data, CompressionLevel::default())?;
//! assert!(looks_compressed(&compressed));
//!
//! let decompressed = decompress(&compressed)?;
//! assert_eq!(data, decompressed);
//! # Ok::<(), gzflow_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod ext;
pub mod flate;
pub mod format;
pub mod streaming;


// Re-export main types
pub use engine::{Engine, EngineStream, Flush, Framing, StreamMode, StreamParams};
pub use ext::GzipExt;
pub use flate::{Flate2Engine, Flate2Stream};
pub use format::{looks_compressed, GZIP_MAGIC};
pub use streaming::Codec;

use gzflow_types::{CompressionLevel, Result};

/// Compress `input` into a gzip member using the default engine.
///
/// Empty input yields empty output without touching the engine.
pub fn compress(input: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    Codec::new().compress(input, level)
}

/// Decompress a gzip member or zlib stream using the default engine.
///
/// Empty input yields empty output without touching the engine.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    Codec::new().decompress(input)
}

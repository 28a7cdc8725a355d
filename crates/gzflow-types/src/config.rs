//! Configuration types for gzflow
//!
//! This module provides the compression level wrapper handed to the engine and
//! the validated driver configuration.

/// Compression level passed through to the engine.
///
/// The wrapped value is never clamped or validated here; an out-of-range
/// level is rejected by the engine with a stream error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Store only, no compression
    pub const NO_COMPRESSION: Self = Self(0);
    /// Fastest compression
    pub const BEST_SPEED: Self = Self(1);
    /// Smallest output
    pub const BEST_COMPRESSION: Self = Self(9);
    /// Engine default (level 6 for zlib)
    pub const DEFAULT_COMPRESSION: Self = Self(-1);

    /// Wrap a raw engine level
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// Get the raw level value
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Check if compression is enabled
    pub fn is_enabled(self) -> bool {
        self != Self::NO_COMPRESSION
    }

    /// All named presets
    pub fn presets() -> [Self; 4] {
        [
            Self::NO_COMPRESSION,
            Self::BEST_SPEED,
            Self::BEST_COMPRESSION,
            Self::DEFAULT_COMPRESSION,
        ]
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT_COMPRESSION
    }
}

impl From<i32> for CompressionLevel {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

/// Driver configuration with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecConfig {
    chunk_size: usize,
    window_bits: u8,
}

impl CodecConfig {
    /// Minimum compression growth increment
    pub const MIN_CHUNK_SIZE: usize = 1;
    /// Default compression growth increment (16KB)
    pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;
    /// Smallest LZ77 window the engine accepts (512 bytes)
    pub const MIN_WINDOW_BITS: u8 = 9;
    /// Largest LZ77 window the engine accepts (32KB)
    pub const MAX_WINDOW_BITS: u8 = 15;

    /// Create a new configuration with validation
    pub fn new(chunk_size: usize, window_bits: u8) -> Result<Self, String> {
        Self::default()
            .with_chunk_size(chunk_size)?
            .with_window_bits(window_bits)
    }

    /// Replace the compression growth increment
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, String> {
        if chunk_size < Self::MIN_CHUNK_SIZE {
            return Err(format!(
                "Chunk size {} is below minimum {}",
                chunk_size,
                Self::MIN_CHUNK_SIZE
            ));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Replace the base LZ77 window size
    pub fn with_window_bits(mut self, window_bits: u8) -> Result<Self, String> {
        if !(Self::MIN_WINDOW_BITS..=Self::MAX_WINDOW_BITS).contains(&window_bits) {
            return Err(format!(
                "Window bits {} outside {}..={}",
                window_bits,
                Self::MIN_WINDOW_BITS,
                Self::MAX_WINDOW_BITS
            ));
        }
        self.window_bits = window_bits;
        Ok(self)
    }

    /// Bytes added to the output buffer each time compression fills it
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Base LZ77 window size, before any framing offset is applied
    pub fn window_bits(&self) -> u8 {
        self.window_bits
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            window_bits: Self::MAX_WINDOW_BITS,
        }
    }
}

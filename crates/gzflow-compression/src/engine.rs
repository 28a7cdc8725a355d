//! Codec engine contract
//!
//! The driver never touches DEFLATE internals. It talks to an engine through
//! the two traits in this module: [`Engine`] creates a stream for a given set
//! of parameters, and [`EngineStream`] is stepped until it reports the end of
//! the stream, then finalized exactly once.
//!
//! Parameters follow the zlib conventions: the compression level is passed
//! through untouched and the framing is encoded into `window_bits` by adding a
//! fixed offset to the base window size (see [`Framing::window_bits`]).

use gzflow_types::{CompressionLevel, Result, Status};

/// Per-step flush directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// More input will follow
    None,
    /// Flush all pending output, more input may follow
    Sync,
    /// This is the last input; emit the stream terminator
    Finish,
}

/// Container format around the DEFLATE payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framing {
    /// Bare DEFLATE, no header or trailer
    Raw,
    /// RFC 1950: 2-byte header, Adler-32 trailer
    Zlib,
    /// RFC 1952: magic header, CRC-32 and size trailer
    Gzip,
    /// Inflate only: detect zlib or gzip from the header
    Auto,
}

impl Framing {
    /// Offset added to the base window size to select gzip framing
    pub const GZIP_OFFSET: i32 = 16;
    /// Offset added to the base window size to request header auto-detection
    pub const AUTO_OFFSET: i32 = 32;

    /// Encode `base` (the LZ77 window size in bits) and this framing into a
    /// single zlib-style `window_bits` value.
    pub fn window_bits(self, base: u8) -> i32 {
        let base = i32::from(base);
        match self {
            Self::Raw => -base,
            Self::Zlib => base,
            Self::Gzip => base + Self::GZIP_OFFSET,
            Self::Auto => base + Self::AUTO_OFFSET,
        }
    }

    /// Split a zlib-style `window_bits` value back into framing and base
    /// window size. Returns `None` for values outside the accepted ranges.
    pub fn decode(window_bits: i32) -> Option<(Self, u8)> {
        let (framing, base) = match window_bits {
            -15..=-8 => (Self::Raw, -window_bits),
            8..=15 => (Self::Zlib, window_bits),
            24..=31 => (Self::Gzip, window_bits - Self::GZIP_OFFSET),
            40..=47 => (Self::Auto, window_bits - Self::AUTO_OFFSET),
            _ => return None,
        };
        Some((framing, base as u8))
    }
}

/// Direction of an engine stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Compress at the given level
    Deflate {
        /// Level handed to the engine unmodified
        level: CompressionLevel,
    },
    /// Decompress
    Inflate,
}

/// Parameters for [`Engine::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamParams {
    mode: StreamMode,
    window_bits: i32,
}

impl StreamParams {
    /// Compression stream parameters
    pub fn deflate(level: CompressionLevel, framing: Framing, base_bits: u8) -> Self {
        Self {
            mode: StreamMode::Deflate { level },
            window_bits: framing.window_bits(base_bits),
        }
    }

    /// Decompression stream parameters
    pub fn inflate(framing: Framing, base_bits: u8) -> Self {
        Self {
            mode: StreamMode::Inflate,
            window_bits: framing.window_bits(base_bits),
        }
    }

    /// Parameters with an already encoded `window_bits` value
    pub fn from_raw(mode: StreamMode, window_bits: i32) -> Self {
        Self { mode, window_bits }
    }

    /// Stream direction
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Encoded window bits
    pub fn window_bits(&self) -> i32 {
        self.window_bits
    }
}

/// Factory for engine streams
pub trait Engine {
    /// Stream type produced by [`Engine::init`]
    type Stream: EngineStream;

    /// Allocate a stream. A failure means no stream exists and nothing needs
    /// to be finalized.
    fn init(&self, params: StreamParams) -> Result<Self::Stream>;
}

impl<E: Engine + ?Sized> Engine for &E {
    type Stream = E::Stream;

    fn init(&self, params: StreamParams) -> Result<Self::Stream> {
        (**self).init(params)
    }
}

/// One initialized engine stream
pub trait EngineStream {
    /// Consume as much of `input` and fill as much of `output` as possible.
    ///
    /// `input` and `output` are the still-available windows; progress is
    /// reported through the cumulative [`total_in`](Self::total_in) and
    /// [`total_out`](Self::total_out) counters.
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Status;

    /// Total bytes consumed over the life of the stream
    fn total_in(&self) -> u64;

    /// Total bytes produced over the life of the stream
    fn total_out(&self) -> u64;

    /// Raw diagnostic left by the last failing call, if any
    fn message(&self) -> Option<&[u8]>;

    /// Release engine memory
    fn finalize(&mut self) -> Status;
}

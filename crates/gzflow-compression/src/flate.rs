//! `flate2` engine binding
//!
//! [`Flate2Engine`] adapts `flate2`'s low-level [`Compress`]/[`Decompress`]
//! streams (built on a zlib-compatible backend) to the [`Engine`] contract.
//! It reports zlib status codes, rejects parameters zlib would reject instead
//! of letting `flate2` assert on them, and performs gzip/zlib header
//! detection for [`Framing::Auto`] the same way zlib does: by looking at the
//! first input byte.

use crate::engine::{Engine, EngineStream, Flush, Framing, StreamMode, StreamParams};
use crate::format::GZIP_MAGIC;
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress};
use gzflow_types::{CodecConfig, CompressionLevel, Error, Result, Status};
use tracing::trace;

const FINALIZED: &str = "stream already finalized";

/// Default engine: zlib-compatible DEFLATE provided by `flate2`
#[derive(Debug, Clone, Copy, Default)]
pub struct Flate2Engine;

impl Flate2Engine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl Engine for Flate2Engine {
    type Stream = Flate2Stream;

    fn init(&self, params: StreamParams) -> Result<Flate2Stream> {
        let Some((framing, base)) = Framing::decode(params.window_bits()) else {
            return Err(invalid_parameter("invalid window bits"));
        };
        // zlib silently widens an 8-bit window to 9 bits
        let bits = base.max(CodecConfig::MIN_WINDOW_BITS);

        let state = match params.mode() {
            StreamMode::Deflate { level } => {
                let level = engine_level(level)?;
                let compress = match framing {
                    Framing::Raw => Compress::new_with_window_bits(level, false, bits),
                    Framing::Zlib => Compress::new_with_window_bits(level, true, bits),
                    Framing::Gzip => Compress::new_gzip(level, bits),
                    Framing::Auto => {
                        return Err(invalid_parameter(
                            "header auto-detection is only valid for inflate",
                        ))
                    }
                };
                State::Deflate(compress)
            }
            StreamMode::Inflate => match framing {
                Framing::Raw => State::Inflate(Decompress::new_with_window_bits(false, bits)),
                Framing::Zlib => State::Inflate(Decompress::new_with_window_bits(true, bits)),
                Framing::Gzip => State::Inflate(Decompress::new_gzip(bits)),
                Framing::Auto => State::Detecting { window_bits: bits },
            },
        };

        trace!(
            "Initialized flate2 stream: {:?}, {:?} framing, window bits {}",
            params.mode(),
            framing,
            params.window_bits()
        );

        Ok(Flate2Stream {
            state: Some(state),
            total_in: 0,
            total_out: 0,
            diagnostic: None,
        })
    }
}

/// Stream handed out by [`Flate2Engine`]
pub struct Flate2Stream {
    /// `None` once finalized
    state: Option<State>,
    total_in: u64,
    total_out: u64,
    diagnostic: Option<String>,
}

enum State {
    Deflate(Compress),
    Inflate(Decompress),
    /// Auto-detecting inflate that has not seen its first input byte yet
    Detecting { window_bits: u8 },
}

impl Flate2Stream {
    /// Resolve a pending auto-detection against the first input byte
    fn detect(&mut self, input: &[u8]) {
        if let Some(State::Detecting { window_bits }) = self.state {
            if let Some(&first) = input.first() {
                let decompress = if first == GZIP_MAGIC[0] {
                    Decompress::new_gzip(window_bits)
                } else {
                    Decompress::new_with_window_bits(true, window_bits)
                };
                trace!(
                    "Detected {} header",
                    if first == GZIP_MAGIC[0] { "gzip" } else { "zlib" }
                );
                self.state = Some(State::Inflate(decompress));
            }
        }
    }

    fn fail(&mut self, status: Status, message: Option<&str>) -> Status {
        self.diagnostic = message.map(str::to_string);
        status
    }
}

impl EngineStream for Flate2Stream {
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Status {
        self.detect(input);

        let outcome = match self.state.as_mut() {
            Some(State::Deflate(compress)) => {
                let result = compress.compress(input, output, flush.into());
                self.total_in = compress.total_in();
                self.total_out = compress.total_out();
                result.map_err(|e| (Status::STREAM_ERROR, e.message().map(str::to_string)))
            }
            Some(State::Inflate(decompress)) => {
                let result = decompress.decompress(input, output, flush.into());
                self.total_in = decompress.total_in();
                self.total_out = decompress.total_out();
                result.map_err(|e| {
                    let status = if e.needs_dictionary().is_some() {
                        Status::NEED_DICT
                    } else {
                        Status::DATA_ERROR
                    };
                    (status, e.message().map(str::to_string))
                })
            }
            // Nothing to detect from; same as zlib being called with no input
            Some(State::Detecting { .. }) => Ok(flate2::Status::BufError),
            None => Err((Status::STREAM_ERROR, Some(FINALIZED.to_string()))),
        };

        match outcome {
            Ok(flate2::Status::Ok) => Status::OK,
            Ok(flate2::Status::StreamEnd) => Status::STREAM_END,
            Ok(flate2::Status::BufError) => Status::BUF_ERROR,
            Err((status, message)) => {
                self.diagnostic = message;
                status
            }
        }
    }

    fn total_in(&self) -> u64 {
        self.total_in
    }

    fn total_out(&self) -> u64 {
        self.total_out
    }

    fn message(&self) -> Option<&[u8]> {
        self.diagnostic.as_deref().map(str::as_bytes)
    }

    fn finalize(&mut self) -> Status {
        match self.state.take() {
            Some(_) => Status::OK,
            None => self.fail(Status::STREAM_ERROR, Some(FINALIZED)),
        }
    }
}

impl From<Flush> for FlushCompress {
    fn from(flush: Flush) -> Self {
        match flush {
            Flush::None => Self::None,
            Flush::Sync => Self::Sync,
            Flush::Finish => Self::Finish,
        }
    }
}

impl From<Flush> for FlushDecompress {
    fn from(flush: Flush) -> Self {
        match flush {
            Flush::None => Self::None,
            Flush::Sync => Self::Sync,
            Flush::Finish => Self::Finish,
        }
    }
}

fn engine_level(level: CompressionLevel) -> Result<Compression> {
    match level.get() {
        -1 => Ok(Compression::default()),
        raw @ 0..=9 => Ok(Compression::new(raw as u32)),
        _ => Err(invalid_parameter("invalid compression level")),
    }
}

fn invalid_parameter(message: &str) -> Error {
    Error::from_status(Status::STREAM_ERROR, Some(message.as_bytes()))
}

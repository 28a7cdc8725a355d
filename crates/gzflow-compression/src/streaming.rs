//! Growable-buffer compression driver
//!
//! [`Codec`] feeds a whole input buffer through an engine stream, growing the
//! output buffer whenever the engine fills it, and returns exactly the bytes
//! the engine reported producing.
//!
//! The two directions differ in how the loop decides to keep going:
//!
//! - compression steps with [`Flush::Finish`] and continues only while the
//!   output window was completely filled; any room left means the engine had
//!   nothing more to emit;
//! - decompression steps with [`Flush::Sync`] and continues while the engine
//!   answers [`Status::OK`]; only the engine knows where the trailer ends.
//!
//! In both cases the stream is finalized before returning, and the result is
//! accepted only if the last step reported [`Status::STREAM_END`] and the
//! finalize call succeeded.

use crate::engine::{Engine, EngineStream, Flush, Framing, StreamParams};
use crate::flate::Flate2Engine;
use gzflow_types::{CodecConfig, CompressionLevel, Error, Result, Status};
use tracing::{debug, trace, warn};

/// Whole-buffer gzip/zlib codec
#[derive(Debug, Clone, Default)]
pub struct Codec<E = Flate2Engine> {
    engine: E,
    config: CodecConfig,
}

impl Codec<Flate2Engine> {
    /// Create a codec backed by `flate2` with default configuration
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec backed by `flate2` with custom configuration
    pub fn with_config(config: CodecConfig) -> Self {
        Self::with_engine(Flate2Engine::new(), config)
    }
}

impl<E: Engine> Codec<E> {
    /// Create a codec driving a custom engine
    pub fn with_engine(engine: E, config: CodecConfig) -> Self {
        Self { engine, config }
    }

    /// Get codec configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Compress `input` into a gzip member
    pub fn compress(&self, input: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
        self.compress_with_framing(input, level, Framing::Gzip)
    }

    /// Decompress a gzip member or zlib stream, detected from its header
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompress_with_framing(input, Framing::Auto)
    }

    /// Compress `input` with an explicit container format
    pub fn compress_with_framing(
        &self,
        input: &[u8],
        level: CompressionLevel,
        framing: Framing,
    ) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let params = StreamParams::deflate(level, framing, self.config.window_bits());
        let mut stream = ActiveStream::new(self.engine.init(params)?);

        let chunk = self.config.chunk_size();
        let mut output = Vec::with_capacity(chunk);

        let status = loop {
            if stream.produced() >= output.len() {
                output.resize(output.len() + chunk, 0);
                trace!("Compression buffer grown to {} bytes", output.len());
            }

            let status = stream.step(input, &mut output, Flush::Finish);
            if status.is_error() || stream.produced() < output.len() {
                break status;
            }
        };

        let produced = stream.finish(status)?;
        output.truncate(produced);

        debug!(
            "Compressed {} bytes to {} bytes (ratio {:.3}, {:?} framing, level {})",
            input.len(),
            output.len(),
            output.len() as f64 / input.len() as f64,
            framing,
            level.get()
        );
        Ok(output)
    }

    /// Decompress `input` with an explicit container format
    pub fn decompress_with_framing(&self, input: &[u8], framing: Framing) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let params = StreamParams::inflate(framing, self.config.window_bits());
        let mut stream = ActiveStream::new(self.engine.init(params)?);

        // Decoded size is unknown up front: reserve twice the input and grow
        // by half the input each time the engine fills the buffer.
        let growth = (input.len() / 2).max(1);
        let mut output = Vec::with_capacity(input.len().saturating_mul(2));

        let status = loop {
            if stream.produced() >= output.len() {
                output.resize(output.len() + growth, 0);
                trace!("Decompression buffer grown to {} bytes", output.len());
            }

            let status = stream.step(input, &mut output, Flush::Sync);
            if !status.is_ok() {
                break status;
            }
        };

        let produced = stream.finish(status)?;
        output.truncate(produced);

        debug!(
            "Decompressed {} bytes to {} bytes (ratio {:.3}, {:?} framing)",
            input.len(),
            output.len(),
            input.len() as f64 / output.len().max(1) as f64,
            framing
        );
        Ok(output)
    }
}

/// Owns an initialized engine stream and guarantees it is finalized exactly
/// once, either through [`ActiveStream::finish`] or on drop.
struct ActiveStream<S: EngineStream> {
    stream: S,
    finalized: bool,
}

impl<S: EngineStream> ActiveStream<S> {
    fn new(stream: S) -> Self {
        Self {
            stream,
            finalized: false,
        }
    }

    /// Bytes of input the engine has consumed so far
    fn consumed(&self) -> usize {
        self.stream.total_in() as usize
    }

    /// Bytes of output the engine has produced so far
    fn produced(&self) -> usize {
        self.stream.total_out() as usize
    }

    /// Hand the engine whatever input and output space remain after its own
    /// cumulative cursors.
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Status {
        let (consumed, produced) = (self.consumed(), self.produced());
        if consumed > input.len() || produced > output.len() {
            return Status::STREAM_ERROR;
        }
        self.stream
            .step(&input[consumed..], &mut output[produced..], flush)
    }

    /// Finalize the stream and check the terminal status of the last step.
    ///
    /// Returns the total number of bytes produced.
    fn finish(mut self, last: Status) -> Result<usize> {
        let produced = self.produced();
        let diagnostic = self.stream.message().map(<[u8]>::to_vec);

        let end = self.release();
        if !last.is_stream_end() {
            return Err(Error::from_status(last, diagnostic.as_deref()));
        }
        if !end.is_ok() {
            return Err(Error::from_status(end, self.stream.message()));
        }
        Ok(produced)
    }

    fn release(&mut self) -> Status {
        self.finalized = true;
        self.stream.finalize()
    }
}

impl<S: EngineStream> Drop for ActiveStream<S> {
    fn drop(&mut self) {
        if !self.finalized {
            let status = self.release();
            if !status.is_ok() {
                warn!("Engine finalize failed while abandoning stream: {}", status);
            }
        }
    }
}

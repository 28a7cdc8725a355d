//! Unified test utilities for gzflow benchmarks and tests
//!
//! This module provides common utilities used across all test files
//! to ensure consistency and reduce code duplication.

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use gzflow_compression::{Engine, EngineStream, Flate2Engine, Flate2Stream, Flush, StreamParams};
use gzflow_types::{Result, Status};
use std::io::Write;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Once};

/// Test data generation patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestDataPattern {
    /// All zeros - highly compressible
    Zeros,
    /// Random data - incompressible
    Random,
    /// Mixed compressible/incompressible data
    Mixed,
    /// Repeated English text
    Text,
}

impl TestDataPattern {
    /// Every pattern, for table-driven tests
    pub fn all() -> [Self; 4] {
        [Self::Zeros, Self::Random, Self::Mixed, Self::Text]
    }
}

/// Generate test data with specified pattern
///
/// Output is deterministic so that failures and benchmarks are reproducible.
pub fn generate_test_data(size: usize, pattern: TestDataPattern) -> Vec<u8> {
    match pattern {
        TestDataPattern::Zeros => vec![0u8; size],
        TestDataPattern::Random => {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};

            let mut data = Vec::with_capacity(size);
            let mut hasher = DefaultHasher::new();
            while data.len() < size {
                data.len().hash(&mut hasher);
                let word = hasher.finish().to_le_bytes();
                let take = word.len().min(size - data.len());
                data.extend_from_slice(&word[..take]);
            }
            data
        }
        TestDataPattern::Mixed => (0..size)
            .map(|i| match i % 1000 {
                0..=99 => 0,
                100..=199 => 0xff,
                _ => (i * 7 + 13) as u8,
            })
            .collect(),
        TestDataPattern::Text => {
            const TEXT: &[u8] = b"The quick brown fox jumps over the lazy dog. ";
            TEXT.iter().copied().cycle().take(size).collect()
        }
    }
}

/// Common input sizes for tests and benchmarks
pub struct CommonSizes;

impl CommonSizes {
    /// 1 KiB
    pub const TINY: usize = 1024;
    /// 64 KiB
    pub const MEDIUM: usize = 64 * 1024;
    /// 1 MiB
    pub const LARGE: usize = 1024 * 1024;
    /// 10 MiB
    pub const XLARGE: usize = 10 * 1024 * 1024;

    /// Sizes suitable for micro-benchmarks
    pub fn micro() -> Vec<(&'static str, usize)> {
        vec![
            ("1KB", Self::TINY),
            ("64KB", Self::MEDIUM),
            ("1MB", Self::LARGE),
        ]
    }
}

/// Encode `data` as a gzip member with `flate2`'s writer
pub fn reference_gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("in-memory write");
    encoder.finish().expect("in-memory finish")
}

/// Encode `data` as a zlib stream with `flate2`'s writer
pub fn reference_zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("in-memory write");
    encoder.finish().expect("in-memory finish")
}

/// Install a test-friendly tracing subscriber once per process
///
/// Honors `RUST_LOG`; defaults to `gzflow_compression=trace` so the driver's
/// growth and detection messages show up in `--nocapture` runs.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gzflow_compression=trace"));

        // Another test binary may already own the global subscriber
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Call counts observed by a [`CountingEngine`]
#[derive(Debug, Default)]
pub struct EngineCounters {
    inits: AtomicUsize,
    steps: AtomicUsize,
    finalizes: AtomicUsize,
    last_total_out: AtomicU64,
}

impl EngineCounters {
    /// Streams initialized
    pub fn inits(&self) -> usize {
        self.inits.load(Ordering::SeqCst)
    }

    /// Engine steps taken across all streams
    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }

    /// Streams finalized
    pub fn finalizes(&self) -> usize {
        self.finalizes.load(Ordering::SeqCst)
    }

    /// `total_out` of the most recently finalized stream
    pub fn last_total_out(&self) -> u64 {
        self.last_total_out.load(Ordering::SeqCst)
    }
}

/// [`Flate2Engine`] instrumented with call counters
#[derive(Debug, Clone, Default)]
pub struct CountingEngine {
    inner: Flate2Engine,
    counters: Arc<EngineCounters>,
}

impl CountingEngine {
    /// Create an engine with fresh counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the counters
    pub fn counters(&self) -> Arc<EngineCounters> {
        Arc::clone(&self.counters)
    }
}

impl Engine for CountingEngine {
    type Stream = CountingStream;

    fn init(&self, params: StreamParams) -> Result<CountingStream> {
        self.counters.inits.fetch_add(1, Ordering::SeqCst);
        Ok(CountingStream {
            inner: self.inner.init(params)?,
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Stream handed out by [`CountingEngine`]
pub struct CountingStream {
    inner: Flate2Stream,
    counters: Arc<EngineCounters>,
}

impl EngineStream for CountingStream {
    fn step(&mut self, input: &[u8], output: &mut [u8], flush: Flush) -> Status {
        self.counters.steps.fetch_add(1, Ordering::SeqCst);
        self.inner.step(input, output, flush)
    }

    fn total_in(&self) -> u64 {
        self.inner.total_in()
    }

    fn total_out(&self) -> u64 {
        self.inner.total_out()
    }

    fn message(&self) -> Option<&[u8]> {
        self.inner.message()
    }

    fn finalize(&mut self) -> Status {
        self.counters.finalizes.fetch_add(1, Ordering::SeqCst);
        self.counters
            .last_total_out
            .store(self.inner.total_out(), Ordering::SeqCst);
        self.inner.finalize()
    }
}

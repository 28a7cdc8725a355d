//! gzflow Testing Suite
//!
//! This crate provides integration tests and benchmarks for gzflow, along
//! with the shared fixtures they use.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Deterministic data generators, reference encoders and an instrumented
/// engine shared by the integration tests and benchmarks.
pub mod test_utils;

/// Benchmark configuration shared by the criterion suites
pub mod bench_config {
    use criterion::Criterion;
    use serde::{Deserialize, Serialize};
    use std::path::Path;
    use std::time::Duration;

    /// Configuration for the benchmark suite
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct BenchmarkConfig {
        /// Sample size for benchmarks
        pub sample_size: usize,
        /// Measurement time per benchmark
        pub measurement_time: Duration,
        /// Warm-up time before measurements
        pub warm_up_time: Duration,
        /// Input sizes to benchmark, in bytes
        pub input_sizes: Vec<usize>,
    }

    impl Default for BenchmarkConfig {
        fn default() -> Self {
            Self {
                sample_size: 50,
                measurement_time: Duration::from_secs(5),
                warm_up_time: Duration::from_secs(1),
                input_sizes: vec![1024, 64 * 1024, 1024 * 1024],
            }
        }
    }

    impl BenchmarkConfig {
        /// Load configuration from a JSON file, falling back to defaults for
        /// missing fields
        pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }

        /// Load from `GZFLOW_BENCH_CONFIG` if set, otherwise use defaults
        pub fn from_env() -> Self {
            match std::env::var_os("GZFLOW_BENCH_CONFIG") {
                Some(path) => Self::load(Path::new(&path)).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring benchmark config {:?}: {}", path, e);
                    Self::default()
                }),
                None => Self::default(),
            }
        }

        /// Build a criterion instance with these settings
        pub fn criterion(&self) -> Criterion {
            Criterion::default()
                .sample_size(self.sample_size)
                .measurement_time(self.measurement_time)
                .warm_up_time(self.warm_up_time)
        }
    }
}

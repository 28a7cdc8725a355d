//! Integration tests for gzflow
//!
//! These tests exercise the public surface end to end against the real
//! engine, with `flate2`'s own writers as independent reference encoders.

use flate2::read::GzDecoder;
use gzflow_compression::{compress, decompress, looks_compressed, Codec, Framing, GzipExt};
use gzflow_tests::test_utils::{
    generate_test_data, init_test_logging, reference_gzip, reference_zlib, CommonSizes,
    CountingEngine, TestDataPattern,
};
use gzflow_types::{CodecConfig, CompressionLevel, ErrorKind};
use rstest::rstest;
use std::io::Read;

/// Test basic roundtrip through the free functions
#[test]
fn test_basic_roundtrip() {
    init_test_logging();

    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Text);
    let compressed = compress(&data, CompressionLevel::default()).unwrap();

    assert!(looks_compressed(&compressed));
    assert!(compressed.len() < data.len());
    assert_eq!(decompress(&compressed).unwrap(), data);
}

/// Every level and data pattern roundtrips
#[rstest]
fn test_roundtrip_matrix(
    #[values(
        CompressionLevel::NO_COMPRESSION,
        CompressionLevel::BEST_SPEED,
        CompressionLevel::BEST_COMPRESSION,
        CompressionLevel::DEFAULT_COMPRESSION
    )]
    level: CompressionLevel,
    #[values(
        TestDataPattern::Zeros,
        TestDataPattern::Random,
        TestDataPattern::Mixed,
        TestDataPattern::Text
    )]
    pattern: TestDataPattern,
) {
    let data = generate_test_data(100 * 1024, pattern);

    let compressed = compress(&data, level).unwrap();
    assert!(looks_compressed(&compressed));
    assert_eq!(decompress(&compressed).unwrap(), data);
}

/// Incompressible input larger than one growth chunk needs several steps,
/// and the returned length is exactly what the engine produced
#[test]
fn test_random_megabyte_matches_engine_total() {
    init_test_logging();

    let engine = CountingEngine::new();
    let counters = engine.counters();
    let codec = Codec::with_engine(engine, CodecConfig::default());

    let data = generate_test_data(CommonSizes::LARGE, TestDataPattern::Random);
    let compressed = codec.compress(&data, CompressionLevel::default()).unwrap();

    assert!(compressed.len() > CodecConfig::DEFAULT_CHUNK_SIZE);
    assert_eq!(compressed.len() as u64, counters.last_total_out());
    assert!(counters.steps() > 1);
    assert_eq!(counters.inits(), 1);
    assert_eq!(counters.finalizes(), 1);

    assert_eq!(codec.decompress(&compressed).unwrap(), data);
    assert_eq!(counters.finalizes(), 2);
}

/// A tiny member that inflates to many megabytes grows the output buffer
/// far past its initial reservation
#[test]
fn test_highly_compressible_expansion() {
    init_test_logging();

    let data = generate_test_data(CommonSizes::XLARGE, TestDataPattern::Zeros);
    let compressed = compress(&data, CompressionLevel::BEST_COMPRESSION).unwrap();
    assert!(compressed.len() < 64 * 1024);

    let decompressed = decompress(&compressed).unwrap();
    assert_eq!(decompressed.len(), CommonSizes::XLARGE);
    assert!(decompressed.iter().all(|&b| b == 0));
}

/// Output decodes with an independent gzip reader
#[test]
fn test_output_readable_by_flate2() {
    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Mixed);
    let compressed = compress(&data, CompressionLevel::BEST_SPEED).unwrap();

    let mut decoded = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut decoded)
        .unwrap();
    assert_eq!(decoded, data);
}

/// Both container formats written by `flate2` decode without being told
/// which one they are
#[test]
fn test_decompress_detects_container() {
    init_test_logging();

    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Text);

    let gzip = reference_gzip(&data);
    assert!(looks_compressed(&gzip));
    assert_eq!(decompress(&gzip).unwrap(), data);

    let zlib = reference_zlib(&data);
    assert!(!looks_compressed(&zlib));
    assert_eq!(decompress(&zlib).unwrap(), data);
}

/// Raw deflate is never accepted by auto-detection
#[test]
fn test_raw_deflate_needs_explicit_framing() {
    let codec = Codec::new();
    let data = generate_test_data(4096, TestDataPattern::Text);
    let raw = codec
        .compress_with_framing(&data, CompressionLevel::default(), Framing::Raw)
        .unwrap();

    assert!(codec.decompress(&raw).is_err());
    assert_eq!(codec.decompress_with_framing(&raw, Framing::Raw).unwrap(), data);
}

/// Empty input never reaches the engine
#[test]
fn test_empty_input_without_engine_interaction() {
    let engine = CountingEngine::new();
    let counters = engine.counters();
    let codec = Codec::with_engine(engine, CodecConfig::default());

    assert!(codec.compress(&[], CompressionLevel::BEST_COMPRESSION).unwrap().is_empty());
    assert!(codec.decompress(&[]).unwrap().is_empty());
    assert_eq!(counters.inits(), 0);
    assert_eq!(counters.steps(), 0);
}

/// Failures still release the engine stream
#[test]
fn test_failures_finalize_stream() {
    let engine = CountingEngine::new();
    let counters = engine.counters();
    let codec = Codec::with_engine(engine, CodecConfig::default());

    let error = codec.decompress(b"definitely not compressed").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Data);

    let compressed = codec
        .compress(b"some bytes worth keeping", CompressionLevel::default())
        .unwrap();
    let error = codec.decompress(&compressed[..compressed.len() - 4]).unwrap_err();
    assert!(error.is_input_error());

    assert_eq!(counters.inits(), 3);
    assert_eq!(counters.finalizes(), 3);
}

/// Invalid parameters surface as stream errors without a stream to release
#[test]
fn test_invalid_level_rejected() {
    let engine = CountingEngine::new();
    let counters = engine.counters();
    let codec = Codec::with_engine(engine, CodecConfig::default());

    let error = codec
        .compress(b"payload", CompressionLevel::new(42))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Stream);
    assert_eq!(counters.finalizes(), 0);
}

/// A single codec can be shared across threads
#[test]
fn test_concurrent_use() {
    let codec = Codec::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = TestDataPattern::all()
            .into_iter()
            .enumerate()
            .map(|(i, pattern)| {
                let codec = &codec;
                scope.spawn(move || {
                    let data = generate_test_data(32 * 1024 + i, pattern);
                    let compressed = codec.compress(&data, CompressionLevel::default()).unwrap();
                    (data, codec.decompress(&compressed).unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (data, decompressed) = handle.join().unwrap();
            assert_eq!(data, decompressed);
        }
    });
}

/// Extension methods agree with the free functions
#[test]
fn test_extension_methods() {
    let data = generate_test_data(CommonSizes::TINY, TestDataPattern::Text);

    let packed = data.gzipped(CompressionLevel::BEST_COMPRESSION).unwrap();
    assert!(packed.is_gzipped());
    assert_eq!(packed, compress(&data, CompressionLevel::BEST_COMPRESSION).unwrap());
    assert_eq!(packed.gunzipped().unwrap(), data);
}

/// Smaller windows still produce readable gzip
#[rstest]
#[case(9)]
#[case(12)]
#[case(15)]
fn test_window_bits_config(#[case] window_bits: u8) {
    let config = CodecConfig::default().with_window_bits(window_bits).unwrap();
    let codec = Codec::with_config(config);
    let data = generate_test_data(CommonSizes::MEDIUM, TestDataPattern::Mixed);

    let compressed = codec.compress(&data, CompressionLevel::default()).unwrap();
    assert!(looks_compressed(&compressed));

    // A full-size window can always read a smaller one
    assert_eq!(decompress(&compressed).unwrap(), data);
}

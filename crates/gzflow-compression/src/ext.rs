//! Extension methods on byte buffers

use crate::format::looks_compressed;
use crate::streaming::Codec;
use gzflow_types::{CompressionLevel, Result};

/// gzip helpers for anything that can be viewed as bytes
///
/// ```rust
/// use gzflow_compression::GzipExt;
/// use gzflow_types::CompressionLevel;
///
/// let packed = b"payload".gzipped(CompressionLevel::BEST_SPEED)?;
/// assert!(packed.is_gzipped());
/// assert_eq!(packed.gunzipped()?, b"payload");
/// # Ok::<(), gzflow_types::Error>(())
/// ```
pub trait GzipExt {
    /// Compress into a gzip member
    fn gzipped(&self, level: CompressionLevel) -> Result<Vec<u8>>;

    /// Decompress a gzip member or zlib stream
    fn gunzipped(&self) -> Result<Vec<u8>>;

    /// Whether the bytes start with the gzip magic
    fn is_gzipped(&self) -> bool;
}

impl<T: AsRef<[u8]> + ?Sized> GzipExt for T {
    fn gzipped(&self, level: CompressionLevel) -> Result<Vec<u8>> {
        Codec::new().compress(self.as_ref(), level)
    }

    fn gunzipped(&self) -> Result<Vec<u8>> {
        Codec::new().decompress(self.as_ref())
    }

    fn is_gzipped(&self) -> bool {
        looks_compressed(self.as_ref())
    }
}

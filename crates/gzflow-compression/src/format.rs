//! Container format sniffing

/// First two bytes of every gzip member (RFC 1952)
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// `true` iff `input` starts with the gzip magic bytes.
///
/// Only the magic is checked; a `true` answer does not mean the rest of the
/// member is valid.
pub fn looks_compressed(input: &[u8]) -> bool {
    input.starts_with(&GZIP_MAGIC)
}

//! Core types and error handling for gzflow
//!
//! This crate provides the vocabulary shared by the gzflow compression driver
//! and any engine binding plugged into it:
//!
//! - **Error handling**: one structured [`Error`] whose [`ErrorKind`] is derived
//!   from the engine's status code
//! - **Status codes**: [`Status`], the zlib-compatible engine return codes
//! - **Configuration**: [`CompressionLevel`] and the validated [`CodecConfig`]
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use gzflow_types::{Error, ErrorKind, Status};
//!
//! let error = Error::from_status(Status::DATA_ERROR, Some(b"invalid stored block lengths"));
//! assert_eq!(error.kind(), ErrorKind::Data);
//! assert_eq!(error.message(), "invalid stored block lengths");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
pub mod status;

// Re-export commonly used types
pub use config::{CodecConfig, CompressionLevel};
pub use error::{Error, ErrorKind, FALLBACK_MESSAGE};
pub use result::Result;
pub use status::Status;

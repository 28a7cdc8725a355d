//! Error types and handling for gzflow
//!
//! Every failure of the compression driver is reported as a single [`Error`]
//! value whose [`ErrorKind`] is derived from the engine's status code and whose
//! message is the engine's diagnostic text when it supplied one.

use crate::Status;

/// Message used when the engine supplies no diagnostic, or one that is not UTF-8
pub const FALLBACK_MESSAGE: &str = "unknown error";

/// Main error type for gzflow operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// Invalid parameters or inconsistent engine stream state
    #[error("Stream error: {message}")]
    Stream {
        /// Engine diagnostic
        message: String,
    },

    /// Input is not valid compressed data for the detected format
    #[error("Data error: {message}")]
    Data {
        /// Engine diagnostic
        message: String,
    },

    /// Engine failed to allocate working memory
    #[error("Memory error: {message}")]
    Memory {
        /// Engine diagnostic
        message: String,
    },

    /// No forward progress was possible
    #[error("Buffer error: {message}")]
    Buffer {
        /// Engine diagnostic
        message: String,
    },

    /// Engine runtime version does not match the expected one
    #[error("Version error: {message}")]
    Version {
        /// Engine diagnostic
        message: String,
    },

    /// Any other engine status code, preserved numerically
    #[error("Engine error {code}: {message}")]
    Unknown {
        /// Raw engine status code
        code: i32,
        /// Engine diagnostic
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// `Z_STREAM_ERROR`
    Stream,
    /// `Z_DATA_ERROR`
    Data,
    /// `Z_MEM_ERROR`
    Memory,
    /// `Z_BUF_ERROR`
    Buffer,
    /// `Z_VERSION_ERROR`
    Version,
    /// Any other code
    Unknown(i32),
}

impl ErrorKind {
    /// Classify an engine status code
    pub fn from_status(status: Status) -> Self {
        match status {
            Status::STREAM_ERROR => Self::Stream,
            Status::DATA_ERROR => Self::Data,
            Status::MEM_ERROR => Self::Memory,
            Status::BUF_ERROR => Self::Buffer,
            Status::VERSION_ERROR => Self::Version,
            other => Self::Unknown(other.code()),
        }
    }

    /// Engine status code this kind stands for
    pub fn status(self) -> Status {
        match self {
            Self::Stream => Status::STREAM_ERROR,
            Self::Data => Status::DATA_ERROR,
            Self::Memory => Status::MEM_ERROR,
            Self::Buffer => Status::BUF_ERROR,
            Self::Version => Status::VERSION_ERROR,
            Self::Unknown(code) => Status::from_code(code),
        }
    }
}

impl Error {
    /// Build the error for an abnormal engine status.
    ///
    /// `diagnostic` is the raw text the engine left behind for its last
    /// failure. It is used verbatim when present and valid UTF-8, otherwise
    /// the message falls back to [`FALLBACK_MESSAGE`].
    pub fn from_status(status: Status, diagnostic: Option<&[u8]>) -> Self {
        let message = diagnostic
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .map_or_else(|| FALLBACK_MESSAGE.to_string(), str::to_string);
        Self::new(ErrorKind::from_status(status), message)
    }

    /// Create an error of the given kind
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Stream => Self::Stream { message },
            ErrorKind::Data => Self::Data { message },
            ErrorKind::Memory => Self::Memory { message },
            ErrorKind::Buffer => Self::Buffer { message },
            ErrorKind::Version => Self::Version { message },
            ErrorKind::Unknown(code) => Self::Unknown { code, message },
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Stream { .. } => ErrorKind::Stream,
            Self::Data { .. } => ErrorKind::Data,
            Self::Memory { .. } => ErrorKind::Memory,
            Self::Buffer { .. } => ErrorKind::Buffer,
            Self::Version { .. } => ErrorKind::Version,
            Self::Unknown { code, .. } => ErrorKind::Unknown(*code),
        }
    }

    /// Diagnostic text
    pub fn message(&self) -> &str {
        match self {
            Self::Stream { message }
            | Self::Data { message }
            | Self::Memory { message }
            | Self::Buffer { message }
            | Self::Version { message }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// Raw engine status code behind this error
    pub fn code(&self) -> i32 {
        self.kind().status().code()
    }

    /// Whether the error points at the input bytes (corrupt or truncated)
    /// rather than at parameters or the engine itself
    pub fn is_input_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Data | ErrorKind::Buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    proptest! {
        #[test]
        fn test_kind_status_roundtrip(code in any::<i32>()) {
            let status = Status::from_code(code);
            let kind = ErrorKind::from_status(status);

            prop_assert_eq!(kind.status(), status);

            let error = Error::from_status(status, None);
            prop_assert_eq!(error.kind(), kind);
            prop_assert_eq!(error.code(), code);
        }

        #[test]
        fn test_utf8_diagnostic_is_kept(message in ".*") {
            let error = Error::from_status(Status::DATA_ERROR, Some(message.as_bytes()));
            prop_assert_eq!(error.message(), message.as_str());
        }
    }

    #[rstest]
    #[case(Status::STREAM_ERROR, ErrorKind::Stream)]
    #[case(Status::DATA_ERROR, ErrorKind::Data)]
    #[case(Status::MEM_ERROR, ErrorKind::Memory)]
    #[case(Status::BUF_ERROR, ErrorKind::Buffer)]
    #[case(Status::VERSION_ERROR, ErrorKind::Version)]
    #[case(Status::NEED_DICT, ErrorKind::Unknown(2))]
    #[case(Status::STREAM_END, ErrorKind::Unknown(1))]
    #[case(Status::ERRNO, ErrorKind::Unknown(-1))]
    fn test_status_mapping(#[case] status: Status, #[case] kind: ErrorKind) {
        assert_eq!(ErrorKind::from_status(status), kind);
    }

    #[test]
    fn test_missing_diagnostic_falls_back() {
        let error = Error::from_status(Status::MEM_ERROR, None);
        assert_eq!(error.kind(), ErrorKind::Memory);
        assert_eq!(error.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_invalid_utf8_diagnostic_falls_back() {
        let error = Error::from_status(Status::DATA_ERROR, Some(&[0xff, 0xfe, 0x00]));
        assert_eq!(error.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_display_includes_message() {
        let error = Error::from_status(Status::DATA_ERROR, Some(b"incorrect header check"));
        assert_eq!(error.to_string(), "Data error: incorrect header check");

        let error = Error::new(ErrorKind::Unknown(7), "odd");
        assert_eq!(error.to_string(), "Engine error 7: odd");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(Error::new(ErrorKind::Data, "x").is_input_error());
        assert!(Error::new(ErrorKind::Buffer, "x").is_input_error());
        assert!(!Error::new(ErrorKind::Stream, "x").is_input_error());
        assert!(!Error::new(ErrorKind::Version, "x").is_input_error());
    }
}

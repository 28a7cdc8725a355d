//! Engine status codes
//!
//! Numeric return codes reported by a zlib-compatible DEFLATE engine. The
//! driver keeps them as opaque values and only interprets them through
//! [`Status`]'s helpers and [`crate::Error::from_status`].

use std::fmt;

/// Status code returned by an engine call (`init`, `step` or `finalize`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status(i32);

impl Status {
    /// Call succeeded, more work may remain
    pub const OK: Self = Self(0);
    /// All input consumed and the stream terminator emitted or verified
    pub const STREAM_END: Self = Self(1);
    /// Inflate needs a preset dictionary
    pub const NEED_DICT: Self = Self(2);
    /// System error reported through errno
    pub const ERRNO: Self = Self(-1);
    /// Invalid parameter or inconsistent stream state
    pub const STREAM_ERROR: Self = Self(-2);
    /// Input is not valid compressed data
    pub const DATA_ERROR: Self = Self(-3);
    /// Engine could not allocate working memory
    pub const MEM_ERROR: Self = Self(-4);
    /// No progress was possible
    pub const BUF_ERROR: Self = Self(-5);
    /// Engine library version mismatch
    pub const VERSION_ERROR: Self = Self(-6);

    /// Wrap a raw engine code
    pub const fn from_code(code: i32) -> Self {
        Self(code)
    }

    /// Raw engine code
    pub const fn code(self) -> i32 {
        self.0
    }

    /// `true` for [`Status::OK`]
    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// `true` for [`Status::STREAM_END`]
    pub fn is_stream_end(self) -> bool {
        self == Self::STREAM_END
    }

    /// `true` for every negative (fatal) code
    pub fn is_error(self) -> bool {
        self.0 < 0
    }

    /// Symbolic name of the code, `"UNKNOWN"` for codes outside the zlib set
    pub fn name(self) -> &'static str {
        match self {
            Self::OK => "Z_OK",
            Self::STREAM_END => "Z_STREAM_END",
            Self::NEED_DICT => "Z_NEED_DICT",
            Self::ERRNO => "Z_ERRNO",
            Self::STREAM_ERROR => "Z_STREAM_ERROR",
            Self::DATA_ERROR => "Z_DATA_ERROR",
            Self::MEM_ERROR => "Z_MEM_ERROR",
            Self::BUF_ERROR => "Z_BUF_ERROR",
            Self::VERSION_ERROR => "Z_VERSION_ERROR",
            _ => "UNKNOWN",
        }
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Status::OK, false, "Z_OK")]
    #[case(Status::STREAM_END, false, "Z_STREAM_END")]
    #[case(Status::NEED_DICT, false, "Z_NEED_DICT")]
    #[case(Status::STREAM_ERROR, true, "Z_STREAM_ERROR")]
    #[case(Status::DATA_ERROR, true, "Z_DATA_ERROR")]
    #[case(Status::MEM_ERROR, true, "Z_MEM_ERROR")]
    #[case(Status::BUF_ERROR, true, "Z_BUF_ERROR")]
    #[case(Status::VERSION_ERROR, true, "Z_VERSION_ERROR")]
    fn test_status_classification(
        #[case] status: Status,
        #[case] is_error: bool,
        #[case] name: &str,
    ) {
        assert_eq!(status.is_error(), is_error);
        assert_eq!(status.name(), name);
        assert_eq!(Status::from_code(status.code()), status);
    }

    #[test]
    fn test_unknown_code_display() {
        let status = Status::from(-42);
        assert_eq!(status.name(), "UNKNOWN");
        assert_eq!(status.to_string(), "UNKNOWN (-42)");
        assert!(status.is_error());
    }

    #[test]
    fn test_terminal_predicates() {
        assert!(Status::OK.is_ok());
        assert!(!Status::OK.is_stream_end());
        assert!(Status::STREAM_END.is_stream_end());
        assert!(!Status::STREAM_END.is_error());
    }
}

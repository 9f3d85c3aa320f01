//! Unified error type.

use std::fmt;
use std::io;

/// The error type returned by respond's fallible operations.
///
/// Most helpers never fail: header and status setters only touch the local
/// response state. Errors come from the edges: a stream that fails while it
/// is being piped, a value that cannot be serialised, a header value that is
/// not valid on the wire, or a write that arrives after the response is over.
#[derive(Debug)]
pub enum Error {
    /// I/O failure, typically raised by a stream being piped.
    Io(io::Error),
    /// A value could not be serialised to JSON.
    Json(serde_json::Error),
    /// A header name or value could not be converted.
    InvalidHeader(http::Error),
    /// The stream handed to [`pipe`](crate::Response::pipe) was already
    /// consumed or destroyed.
    NotPipeable,
    /// The response was already ended.
    Finished,
    /// The client went away before the body was delivered.
    Closed,
}

impl Error {
    /// `true` for the "not found" class of errors, which the sender turns into
    /// a `404` instead of a `500`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }

    /// Short, errno-style code describing the error (`ENOENT`, `EACCES`, ...).
    ///
    /// This is what the sender writes as the body when a piped stream fails
    /// before any byte reached the client.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(e) => match e.kind() {
                io::ErrorKind::NotFound          => "ENOENT",
                io::ErrorKind::PermissionDenied  => "EACCES",
                io::ErrorKind::AlreadyExists     => "EEXIST",
                io::ErrorKind::IsADirectory      => "EISDIR",
                io::ErrorKind::NotADirectory     => "ENOTDIR",
                io::ErrorKind::BrokenPipe        => "EPIPE",
                io::ErrorKind::ConnectionReset   => "ECONNRESET",
                io::ErrorKind::ConnectionAborted => "ECONNABORTED",
                io::ErrorKind::TimedOut          => "ETIMEDOUT",
                io::ErrorKind::Interrupted       => "EINTR",
                io::ErrorKind::InvalidInput      => "EINVAL",
                io::ErrorKind::UnexpectedEof     => "EOF",
                _                                => "EIO",
            },
            Self::Json(_)          => "EJSON",
            Self::InvalidHeader(_) => "ERR_INVALID_HEADER",
            Self::NotPipeable      => "ERR_STREAM_NOT_READABLE",
            Self::Finished         => "ERR_STREAM_WRITE_AFTER_END",
            Self::Closed           => "EPIPE",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)            => write!(f, "io: {e}"),
            Self::Json(e)          => write!(f, "json: {e}"),
            Self::InvalidHeader(e) => write!(f, "invalid header: {e}"),
            Self::NotPipeable      => f.write_str("stream is not readable"),
            Self::Finished         => f.write_str("write after end"),
            Self::Closed           => f.write_str("response closed by peer"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e)            => Some(e),
            Self::Json(e)          => Some(e),
            Self::InvalidHeader(e) => Some(e),
            _                      => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self::InvalidHeader(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.code(), "ENOENT");
    }

    #[test]
    fn other_errors_are_not_not_found() {
        let err = Error::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!err.is_not_found());
        assert_eq!(err.code(), "EACCES");
        assert!(!Error::NotPipeable.is_not_found());
        assert!(!Error::Closed.is_not_found());
    }

    #[test]
    fn display_prefixes_the_source() {
        let err = Error::from(io::Error::other("disk on fire"));
        assert_eq!(err.to_string(), "io: disk on fire");
        assert_eq!(Error::Finished.to_string(), "write after end");
    }
}

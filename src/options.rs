//! Per-response behaviour switches.

/// Settings applied to every [`Response`](crate::Response) created with them.
///
/// ```rust
/// use respond::Options;
///
/// let options = Options::new().etag(false).json_pretty(true);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Options {
    pub(crate) etag: bool,
    pub(crate) json_pretty: bool,
}

impl Options {
    /// `ETag` generation on, compact JSON.
    pub fn new() -> Self {
        Self { etag: true, json_pretty: false }
    }

    /// Compute and set an `ETag` for in-memory bodies sent through
    /// [`Response::send`](crate::Response::send).
    pub fn etag(mut self, enabled: bool) -> Self {
        self.etag = enabled;
        self
    }

    /// Indent JSON written by [`Response::json`](crate::Response::json) and
    /// [`Response::jsonp`](crate::Response::jsonp).
    pub fn json_pretty(mut self, enabled: bool) -> Self {
        self.json_pretty = enabled;
        self
    }
}

impl Default for Options {
    fn default() -> Self { Self::new() }
}

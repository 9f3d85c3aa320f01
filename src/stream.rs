//! Readable byte streams that can be piped into a response.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::trace;

type BoxStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'static>>;

/// A readable source of body chunks.
///
/// Owns its underlying resource (file handle, socket, generator). The
/// resource is released when the stream is exhausted and dropped, or
/// immediately through [`destroy`](ReadStream::destroy). A destroyed stream
/// yields nothing more.
pub struct ReadStream {
    inner: Option<BoxStream>,
}

impl ReadStream {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self { inner: Some(Box::pin(stream)) }
    }

    /// Streams everything an [`AsyncRead`] produces.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self::new(ReaderStream::new(reader))
    }

    /// Streams a file from disk.
    ///
    /// The file is opened on first poll, so a missing or unreadable file shows
    /// up as the stream's first item (`ErrorKind::NotFound`, ...) rather than
    /// here.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let opened = stream::once(tokio::fs::File::open(path));
        Self::new(opened.map_ok(ReaderStream::new).try_flatten())
    }

    /// `false` once the stream was destroyed.
    pub fn is_readable(&self) -> bool {
        self.inner.is_some()
    }

    /// Releases the underlying resource now, without draining it.
    ///
    /// Returns `false` if there was nothing left to release.
    pub fn destroy(&mut self) -> bool {
        let released = self.inner.take().is_some();
        if released {
            trace!("read stream destroyed");
        }
        released
    }

    pub(crate) async fn next_chunk(&mut self) -> Option<io::Result<Bytes>> {
        self.inner.as_mut()?.next().await
    }
}

impl Stream for ReadStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.inner.as_mut() {
            Some(inner) => inner.as_mut().poll_next(cx),
            None => Poll::Ready(None),
        }
    }
}

impl fmt::Debug for ReadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadStream")
            .field("readable", &self.is_readable())
            .finish()
    }
}

//! Piping a [`ReadStream`] into a [`Response`].
//!
//! Three things can happen first while a stream is being piped, and the
//! stream must be released no matter which one does:
//!
//! | Event | Outcome | Stream |
//! |---|---|---|
//! | stream ends | response ended, `Ok(Piped::Complete)` | already exhausted |
//! | stream fails | `Err(..)`, body aborted if the head was sent | destroyed |
//! | client goes away | `Ok(Piped::Aborted)` | destroyed |
//!
//! The two destroying paths share one latch so the stream is released at most
//! once, whichever of them fires.

use std::io;

use tracing::{debug, trace};

use crate::error::Error;
use crate::response::Response;
use crate::stream::ReadStream;

/// How a successful [`Response::pipe`] ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Piped {
    /// The stream was fully delivered and the response ended.
    Complete,
    /// The response completed first (client disconnect); the stream was
    /// destroyed before it was exhausted.
    Aborted,
}

#[derive(Debug, Eq, PartialEq)]
enum PipeState {
    Piping,
    Finished,
}

impl PipeState {
    /// Moves to `Finished`. Returns `true` only for the first call.
    fn finish(&mut self) -> bool {
        std::mem::replace(self, Self::Finished) == Self::Piping
    }
}

enum Step {
    Ended,
    Failed(io::Error),
    ResponseDone,
}

impl Response {
    /// Streams `stream` into the body, then ends the response.
    ///
    /// Status and headers are sent as they are when the first non-empty chunk
    /// arrives; nothing is inferred. A stream that fails before that leaves
    /// the response untouched, so the caller can still answer with an error.
    /// A later failure aborts the body, so the client sees a broken response
    /// instead of a short one.
    ///
    /// Fails with [`Error::NotPipeable`] if the stream was already destroyed,
    /// and with [`Error::Io`] if the stream fails.
    pub async fn pipe(&mut self, mut stream: ReadStream) -> Result<Piped, Error> {
        if !stream.is_readable() {
            return Err(Error::NotPipeable);
        }

        let mut state = PipeState::Piping;

        if self.is_finished() {
            if state.finish() {
                stream.destroy();
            }
            debug!("response already finished, stream not piped");
            return Ok(Piped::Aborted);
        }

        let step = {
            let completion = self.completion();
            tokio::pin!(completion);

            loop {
                tokio::select! {
                    biased;

                    () = &mut completion => break Step::ResponseDone,

                    next = stream.next_chunk() => match next {
                        Some(Ok(chunk)) => {
                            if self.write(chunk).await.is_err() {
                                break Step::ResponseDone;
                            }
                        }
                        Some(Err(e)) => break Step::Failed(e),
                        None => break Step::Ended,
                    },
                }
            }
        };

        match step {
            Step::Ended => {
                self.end();
                trace!("stream piped");
                Ok(Piped::Complete)
            }
            Step::Failed(e) => {
                if state.finish() {
                    stream.destroy();
                }
                debug!(error = %e, "stream failed while piping");
                if self.headers_sent() {
                    self.abort(io::Error::new(e.kind(), e.to_string())).await;
                }
                Err(Error::Io(e))
            }
            Step::ResponseDone => {
                if state.finish() {
                    stream.destroy();
                }
                debug!("response closed before the stream ended");
                Ok(Piped::Aborted)
            }
        }
    }
}

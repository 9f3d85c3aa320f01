//! The response target and its body-writing helpers.
//!
//! A [`Response`] is created together with its [`Outgoing`] half. The handler
//! mutates status and headers on the `Response`, then writes; the first write
//! (or [`end`](Response::end)) flushes the head to `Outgoing`, which turns it
//! into an `http::Response` whose body is fed chunk by chunk from the handler.
//!
//! ```text
//! handler ── set_status / set_header ──► Response ── head (once) ──► Outgoing
//!                  write / end ──────────────┴──── body frames ───► ResponseBody ──► hyper
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, LOCATION, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use hyper::body::Frame;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, trace, warn};

use crate::body::{Body, Classified};
use crate::error::Error;
use crate::etag;
use crate::mime::ContentType;
use crate::options::Options;
use crate::status::Status;
use crate::stream::ReadStream;

/// Body chunks buffered between the handler and the connection before
/// [`Response::write`] starts waiting.
const BODY_BUFFER: usize = 16;

/// Status line and headers, delivered once.
struct Head {
    status: StatusCode,
    headers: HeaderMap,
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response, owned by one handler for one request.
///
/// # Sending a body
///
/// ```rust,no_run
/// use respond::{Request, Response, Status};
///
/// async fn hello(_req: Request, mut res: Response) -> Result<(), respond::Error> {
///     res.set_header("x-powered-by", "respond")?;
///     res.send("hello world").await            // 200, text/plain; charset=utf-8
/// }
///
/// async fn created(_req: Request, mut res: Response) -> Result<(), respond::Error> {
///     res.set_status(Status::Created);
///     res.json(&serde_json::json!({ "id": 42 })).await
/// }
/// ```
///
/// Status and headers can be changed freely until the first byte is written.
/// After that they are only kept locally: the client already has the head.
pub struct Response {
    pub(crate) status: StatusCode,
    status_set: bool,
    pub(crate) headers: HeaderMap,
    method: Method,
    options: Options,
    head: Option<oneshot::Sender<Head>>,
    body: Option<mpsc::Sender<io::Result<Bytes>>>,
    finished: bool,
}

impl Response {
    /// Creates a response for a request made with `method`, together with the
    /// platform half that delivers it.
    pub fn new(method: Method, options: Options) -> (Self, Outgoing) {
        let (head_tx, head_rx) = oneshot::channel();
        let (body_tx, body_rx) = mpsc::channel(BODY_BUFFER);
        let res = Self {
            status: StatusCode::OK,
            status_set: false,
            headers: HeaderMap::new(),
            method,
            options,
            head: Some(head_tx),
            body: Some(body_tx),
            finished: false,
        };
        (res, Outgoing { head: head_rx, body: body_rx })
    }

    // ── Status ───────────────────────────────────────────────────────────────

    pub fn status(&self) -> StatusCode { self.status }

    pub fn set_status(&mut self, status: impl Into<StatusCode>) {
        self.note_if_sent("status");
        self.status = status.into();
        self.status_set = true;
    }

    /// Method of the request this response answers.
    pub fn request_method(&self) -> &Method { &self.method }

    pub fn options(&self) -> Options { self.options }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// `true` once status and headers were handed to the connection.
    pub fn headers_sent(&self) -> bool { self.head.is_none() }

    /// `true` once the response was ended or the client went away.
    pub fn is_finished(&self) -> bool {
        self.finished || self.body.as_ref().is_none_or(mpsc::Sender::is_closed)
    }

    /// Writes one body chunk, flushing the head first if needed.
    ///
    /// Waits while the connection is not draining chunks fast enough.
    pub async fn write(&mut self, chunk: impl Into<Bytes>) -> Result<(), Error> {
        if self.finished {
            return Err(Error::Finished);
        }
        let chunk = chunk.into();
        if chunk.is_empty() {
            return Ok(());
        }
        self.flush_head();

        let Some(tx) = &self.body else {
            return Err(Error::Finished);
        };
        if tx.send(Ok(chunk)).await.is_err() {
            debug!("client closed the response");
            self.finished = true;
            self.body = None;
            return Err(Error::Closed);
        }
        Ok(())
    }

    /// Flushes the head if needed and completes the body. Idempotent.
    pub fn end(&mut self) {
        if self.finished {
            return;
        }
        self.flush_head();
        self.body = None;
        self.finished = true;
        trace!(status = self.status.as_u16(), "response ended");
    }

    /// Ends the body with an error frame, so the connection is reset instead
    /// of the client seeing a complete response.
    pub(crate) async fn abort(&mut self, err: io::Error) {
        if self.finished {
            return;
        }
        self.flush_head();
        if let Some(tx) = self.body.take() {
            if tx.send(Err(err)).await.is_err() {
                debug!("client closed the response before the abort");
            }
        }
        self.finished = true;
        debug!(status = self.status.as_u16(), "response body aborted");
    }

    fn flush_head(&mut self) {
        if let Some(tx) = self.head.take() {
            trace!(status = self.status.as_u16(), "flushing response head");
            let head = Head { status: self.status, headers: self.headers.clone() };
            if tx.send(head).is_err() {
                debug!("connection gone before the response head was sent");
            }
        }
    }

    pub(crate) fn note_if_sent(&self, what: &str) {
        if self.headers_sent() {
            debug!(what, "response head already sent, change is not visible to the client");
        }
    }

    /// Resolves when the connection stops accepting body frames.
    ///
    /// Owns its own handle on the body channel, so it must be dropped before
    /// [`end`](Response::end) for the body to complete.
    pub(crate) fn completion(&self) -> impl Future<Output = ()> + Send + use<> {
        let tx = self.body.clone();
        async move {
            if let Some(tx) = tx {
                tx.closed().await;
            }
        }
    }

    // ── Body preparation ─────────────────────────────────────────────────────

    /// Derives `Content-Type` and `Content-Length` from `body` and returns the
    /// bytes to write.
    ///
    /// - Headers the caller already set are left alone.
    /// - An empty body switches the status to `204` (unless one was set
    ///   explicitly), strips the entity headers and returns `None`.
    /// - Under `204` / `304` the entity headers are stripped instead of set;
    ///   the content is still returned.
    /// - Streams are not prepared: they are destroyed and `None` is returned.
    ///   Use [`send`](Response::send) or [`pipe`](Response::pipe) for those.
    pub fn prepare(&mut self, body: impl Into<Body>) -> Option<Bytes> {
        let (bytes, content_type) = match body.into().classify() {
            Classified::Empty => {
                if !self.status_set {
                    self.status = StatusCode::NO_CONTENT;
                }
                self.strip_entity_headers();
                return None;
            }
            Classified::Stream(mut stream) => {
                warn!("streams cannot be prepared, use send or pipe");
                stream.destroy();
                return None;
            }
            Classified::Content { bytes, content_type } => (bytes, content_type),
        };

        if is_bodiless(self.status) {
            self.strip_entity_headers();
            return Some(bytes);
        }

        self.default_header(CONTENT_TYPE, content_type.header_value());
        self.default_header(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
        Some(bytes)
    }

    fn strip_entity_headers(&mut self) {
        self.headers.remove(CONTENT_TYPE);
        self.headers.remove(CONTENT_LENGTH);
        self.headers.remove(TRANSFER_ENCODING);
    }

    pub(crate) fn default_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.entry(name).or_insert(value);
    }

    // ── Senders ──────────────────────────────────────────────────────────────

    /// Sends `body` and ends the response.
    ///
    /// In-memory bodies get their headers from [`prepare`](Response::prepare)
    /// and, when enabled in [`Options`], an `ETag`. `HEAD` requests get the
    /// headers but no body bytes.
    ///
    /// Streams are [piped](Response::pipe). If the stream fails before any
    /// byte was written, the failure becomes the response: `404` for a
    /// not-found error, `500` otherwise, with the error code as body. A
    /// failure after that aborts the body. For `HEAD` the stream is released
    /// unread.
    pub async fn send(&mut self, body: impl Into<Body>) -> Result<(), Error> {
        match body.into() {
            Body::Stream(stream) => self.send_stream(stream).await,
            body => self.send_content(body).await,
        }
    }

    async fn send_stream(&mut self, mut stream: ReadStream) -> Result<(), Error> {
        if self.method == Method::HEAD {
            stream.destroy();
            self.end();
            return Ok(());
        }

        let err = match self.pipe(stream).await {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        if self.headers_sent() {
            error!(error = %err, "stream failed after the response head was sent");
            self.end();
            return Err(err);
        }

        let status = if err.is_not_found() { Status::NotFound } else { Status::InternalServerError };
        debug!(error = %err, status = status.code(), "stream failed, sending error response");
        self.set_status(status);
        // A length set for the stream does not describe the error body.
        self.headers.remove(CONTENT_LENGTH);
        self.send_content(Body::Text(err.code().to_owned())).await
    }

    async fn send_content(&mut self, body: Body) -> Result<(), Error> {
        let Some(bytes) = self.prepare(body) else {
            self.end();
            return Ok(());
        };

        if self.options.etag && !bytes.is_empty() && !self.headers.contains_key(ETAG) {
            let tag = etag::generate(&bytes);
            if let Ok(value) = HeaderValue::from_str(&tag) {
                self.headers.insert(ETAG, value);
            }
        }

        if self.method == Method::HEAD || bytes.is_empty() || is_bodiless(self.status) {
            self.end();
            return Ok(());
        }

        self.write(bytes).await?;
        self.end();
        Ok(())
    }

    /// Sends `value` as JSON.
    ///
    /// `Content-Type` defaults to `application/json; charset=utf-8`.
    pub async fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        let body = self.to_json(value)?;
        self.default_header(CONTENT_TYPE, ContentType::Json.header_value());
        self.send(body).await
    }

    /// Sends `value` as a JSONP script calling `callback`.
    ///
    /// The callback name is reduced to `[A-Za-z0-9_$.[\]]`; if nothing is left
    /// this is the same as [`json`](Response::json). U+2028 and U+2029 are
    /// escaped so the script stays valid when inlined.
    ///
    /// `Content-Type` defaults to `text/javascript; charset=utf-8`. As with
    /// `json`, a type set by the caller is kept.
    pub async fn jsonp<T: Serialize + ?Sized>(
        &mut self,
        callback: &str,
        value: &T,
    ) -> Result<(), Error> {
        let callback: String = callback
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '[' | ']'))
            .collect();
        if callback.is_empty() {
            return self.json(value).await;
        }

        let json = self
            .to_json(value)?
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029");

        self.headers.insert(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        );
        self.default_header(CONTENT_TYPE, ContentType::JavaScript.header_value());

        let script = format!("/**/ typeof {callback} === 'function' && {callback}({json});");
        self.send(script).await
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, Error> {
        let json = if self.options.json_pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Redirects to `location` and ends the response.
    ///
    /// `status` defaults to `302 Found`; anything outside 3xx is replaced by
    /// `302` as well.
    pub fn redirect(&mut self, location: &str, status: Option<Status>) -> Result<(), Error> {
        let status = match status {
            None => Status::Found,
            Some(s) if s.is_redirection() => s,
            Some(s) => {
                warn!(status = s.code(), "redirect with a non-3xx status, using 302");
                Status::Found
            }
        };
        self.set_header(LOCATION, location)?;
        self.set_status(status);
        self.headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        self.end();
        Ok(())
    }
}

impl Drop for Response {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if !self.headers_sent() {
            if std::thread::panicking() {
                self.status = StatusCode::INTERNAL_SERVER_ERROR;
                self.headers.clear();
            }
            warn!(status = self.status.as_u16(), "response dropped before it was ended");
        }
        self.end();
    }
}

fn is_bodiless(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
}

// ── Outgoing ─────────────────────────────────────────────────────────────────

/// The platform half of a [`Response`].
pub struct Outgoing {
    head: oneshot::Receiver<Head>,
    body: mpsc::Receiver<io::Result<Bytes>>,
}

impl Outgoing {
    /// Waits for the head and returns a response whose body streams whatever
    /// the [`Response`] writes next.
    ///
    /// Dropping the returned body (or this value, before the head arrives) is
    /// seen by the `Response` as the client going away.
    pub async fn into_http(self) -> http::Response<ResponseBody> {
        let Self { head, body } = self;
        // `Response` always delivers a head, even when dropped.
        let head = head.await.unwrap_or(Head {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: HeaderMap::new(),
        });

        let mut res = http::Response::new(ResponseBody { rx: body });
        *res.status_mut() = head.status;
        *res.headers_mut() = head.headers;
        res
    }
}

/// Streaming body of a response produced by [`Outgoing::into_http`].
///
/// Yields an error when the body was aborted, e.g. a piped stream failed
/// after the head went out. hyper then resets the connection rather than
/// terminating the body cleanly.
pub struct ResponseBody {
    rx: mpsc::Receiver<io::Result<Bytes>>,
}

impl hyper::body::Body for ResponseBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        self.rx.poll_recv(cx).map(|chunk| chunk.map(|res| res.map(Frame::data)))
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde::Serialize;

    use super::*;

    async fn collect(out: Outgoing) -> (StatusCode, HeaderMap, Bytes) {
        let (parts, body) = out.into_http().await.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        (parts.status, parts.headers, bytes)
    }

    fn get() -> (Response, Outgoing) {
        Response::new(Method::GET, Options::new().etag(false))
    }

    #[tokio::test]
    async fn plain_text() {
        let (mut res, out) = get();
        res.send("hello world").await.unwrap();
        drop(res);

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(headers[CONTENT_LENGTH], "11");
        assert_eq!(body, "hello world");
    }

    #[tokio::test]
    async fn html_is_inferred() {
        let (mut res, out) = get();
        res.send("  <h1>hi</h1>").await.unwrap();
        drop(res);

        let (_, headers, _) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn object_bodies_are_json() {
        let (mut res, out) = get();
        res.send(serde_json::json!({ "name": "foo" })).await.unwrap();
        drop(res);

        let (_, headers, body) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "application/json; charset=utf-8");
        assert_eq!(body, r#"{"name":"foo"}"#);
    }

    #[tokio::test]
    async fn caller_content_type_wins() {
        let (mut res, out) = get();
        res.set_header(CONTENT_TYPE, "text/csv").unwrap();
        res.send("a,b\n1,2\n").await.unwrap();
        drop(res);

        let (_, headers, _) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "text/csv");
    }

    #[tokio::test]
    async fn empty_body_is_no_content() {
        let (mut res, out) = get();
        res.set_header(CONTENT_TYPE, "text/plain").unwrap();
        res.set_header(TRANSFER_ENCODING, "chunked").unwrap();
        res.send(()).await.unwrap();
        drop(res);

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(!headers.contains_key(CONTENT_TYPE));
        assert!(!headers.contains_key(CONTENT_LENGTH));
        assert!(!headers.contains_key(TRANSFER_ENCODING));
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn empty_body_keeps_explicit_status() {
        let (mut res, out) = get();
        res.set_status(Status::Accepted);
        res.send(None::<String>).await.unwrap();
        drop(res);

        let (status, _, _) = collect(out).await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    #[test]
    fn stripping_twice_matches_stripping_once() {
        let (mut res, _out) = get();
        res.set_status(Status::NoContent);
        res.set_header(CONTENT_LENGTH, "3").unwrap();
        res.set_header("x-keep", "1").unwrap();

        assert_eq!(res.prepare("abc"), Some(Bytes::from("abc")));
        let once = res.headers.clone();
        assert_eq!(res.prepare("abc"), Some(Bytes::from("abc")));
        assert_eq!(res.headers, once);
        assert!(!once.contains_key(CONTENT_LENGTH));
        assert_eq!(once["x-keep"], "1");
    }

    #[tokio::test]
    async fn not_modified_sends_no_body() {
        let (mut res, out) = get();
        res.set_status(Status::NotModified);
        res.send("stale").await.unwrap();
        drop(res);

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
        assert!(!headers.contains_key(CONTENT_TYPE));
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn head_requests_get_headers_only() {
        let (mut res, out) = Response::new(Method::HEAD, Options::default());
        res.send("hello world").await.unwrap();
        drop(res);

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[CONTENT_LENGTH], "11");
        assert!(headers.contains_key(ETAG));
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn etag_is_set_when_enabled() {
        let (mut res, out) = Response::new(Method::GET, Options::default());
        res.send("hello world").await.unwrap();
        drop(res);

        let (_, headers, _) = collect(out).await;
        assert_eq!(headers[ETAG], "\"b-Kq5sNclPz7QV2+lfQIuc6R7oRu0\"");
    }

    #[tokio::test]
    async fn etag_from_caller_is_kept() {
        let (mut res, out) = Response::new(Method::GET, Options::default());
        res.set_header(ETAG, "\"v1\"").unwrap();
        res.send("hello world").await.unwrap();
        drop(res);

        let (_, headers, _) = collect(out).await;
        assert_eq!(headers[ETAG], "\"v1\"");
    }

    #[tokio::test]
    async fn json_helper() {
        #[derive(Serialize)]
        struct User { name: &'static str }

        let (mut res, out) = get();
        res.json(&User { name: "foo" }).await.unwrap();
        drop(res);

        let (_, headers, body) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "application/json; charset=utf-8");
        assert_eq!(body, r#"{"name":"foo"}"#);
    }

    #[tokio::test]
    async fn json_pretty_option() {
        let (mut res, out) = Response::new(Method::GET, Options::new().json_pretty(true));
        res.json(&serde_json::json!({ "a": 1 })).await.unwrap();
        drop(res);

        let (_, _, body) = collect(out).await;
        assert_eq!(body, "{\n  \"a\": 1\n}");
    }

    #[tokio::test]
    async fn jsonp_wraps_and_escapes() {
        let (mut res, out) = get();
        res.jsonp("cb<script>", &serde_json::json!({ "s": "a\u{2028}b" })).await.unwrap();
        drop(res);

        let (_, headers, body) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "text/javascript; charset=utf-8");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(
            body,
            "/**/ typeof cbscript === 'function' && cbscript({\"s\":\"a\\u2028b\"});"
        );
    }

    #[tokio::test]
    async fn jsonp_keeps_caller_content_type() {
        let (mut res, out) = get();
        res.set_header(CONTENT_TYPE, "application/javascript").unwrap();
        res.jsonp("cb", &1).await.unwrap();
        drop(res);

        let (_, headers, body) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "application/javascript");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(body, "/**/ typeof cb === 'function' && cb(1);");
    }

    #[tokio::test]
    async fn jsonp_without_callback_is_json() {
        let (mut res, out) = get();
        res.jsonp("<>", &[1, 2]).await.unwrap();
        drop(res);

        let (_, headers, body) = collect(out).await;
        assert_eq!(headers[CONTENT_TYPE], "application/json; charset=utf-8");
        assert_eq!(body, "[1,2]");
    }

    #[tokio::test]
    async fn redirect_defaults_to_found() {
        let (mut res, out) = get();
        res.redirect("/login", None).unwrap();
        drop(res);

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[LOCATION], "/login");
        assert_eq!(headers[CONTENT_LENGTH], "0");
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn redirect_with_explicit_status() {
        let (mut res, out) = get();
        res.redirect("/new", Some(Status::MovedPermanently)).unwrap();
        drop(res);

        let (status, _, _) = collect(out).await;
        assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn redirect_rejects_non_redirect_status() {
        let (mut res, out) = get();
        res.redirect("/x", Some(Status::Ok)).unwrap();
        drop(res);

        let (status, _, _) = collect(out).await;
        assert_eq!(status, StatusCode::FOUND);
    }

    #[tokio::test]
    async fn changes_after_flush_are_not_sent() {
        let (mut res, out) = get();
        res.write("partial").await.unwrap();
        res.set_header("x-late", "1").unwrap();
        res.set_status(Status::Gone);
        res.end();

        let (status, headers, body) = collect(out).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!headers.contains_key("x-late"));
        assert_eq!(body, "partial");
    }

    #[tokio::test]
    async fn write_after_end_fails() {
        let (mut res, _out) = get();
        res.end();
        res.end();
        assert!(res.is_finished());
        assert!(matches!(res.write("x").await, Err(Error::Finished)));
    }

    #[tokio::test]
    async fn empty_write_keeps_the_head_open() {
        let (mut res, out) = get();
        res.write(Bytes::new()).await.unwrap();
        assert!(!res.headers_sent());
        res.set_status(Status::NotFound);
        res.end();

        let (status, _, _) = collect(out).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn aborted_body_ends_in_an_error() {
        let (mut res, out) = get();
        res.write("first-half").await.unwrap();
        res.abort(io::Error::other("disk gone")).await;
        assert!(res.is_finished());
        assert!(matches!(res.write("more").await, Err(Error::Finished)));
        drop(res);

        let mut body = out.into_http().await.into_body();
        let first = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert_eq!(first, "first-half");
        assert!(body.frame().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn write_after_disconnect_fails() {
        let (mut res, out) = get();
        drop(out);
        assert!(matches!(res.write("x").await, Err(Error::Closed)));
        assert!(res.is_finished());
    }

    #[tokio::test]
    async fn dropped_response_still_answers() {
        let (mut res, out) = get();
        res.set_status(Status::Accepted);
        drop(res);

        let (status, _, body) = collect(out).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.is_empty());
    }
}

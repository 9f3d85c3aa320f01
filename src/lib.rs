//! # respond
//!
//! Response helpers over hyper. Set headers and status, hand over a body,
//! and get the `Content-Type`, `Content-Length`, `ETag` and no-content rules
//! right without rewriting them in every handler.
//!
//! ## What it does
//!
//! - **Body inference**: strings become `text/plain` or `text/html`, bytes
//!   `application/octet-stream`, JSON values `application/json`, and an empty
//!   body a `204`. Headers you set yourself always win.
//! - **No-content rules**: `204` / `304` responses and `HEAD` requests never
//!   carry body bytes.
//! - **Stream piping**: a [`ReadStream`] is piped into the response and is
//!   released exactly once, whether it ends, fails, or the client hangs up.
//! - **Shorthands**: JSON, JSONP, redirects, `Vary`, short content-type
//!   tokens, and one method per status code (`res.not_found(body)`, ...).
//!
//! What it does not do: routing, request parsing, content negotiation. The
//! bundled [`Server`] is a thin host that gives one handler a
//! `(Request, Response)` pair per request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use respond::{ReadStream, Request, Response, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn app(req: Request, mut res: Response) -> Result<(), respond::Error> {
//!     match req.path() {
//!         "/"         => res.send("hello world").await,
//!         "/user"     => res.json(&serde_json::json!({ "name": "foo" })).await,
//!         "/old"      => res.redirect("/", None),
//!         // a missing file becomes a 404 with body `ENOENT`
//!         "/manifest" => res.send(ReadStream::file("Cargo.toml")).await,
//!         _           => res.not_found("no such page").await,
//!     }
//! }
//! ```

mod body;
mod error;
mod handler;
mod header;
mod mime;
mod options;
mod pipe;
mod request;
mod response;
mod server;
mod status;
mod stream;

pub mod etag;

pub use body::{Body, Classified};
pub use error::Error;
pub use handler::{Handler, Outcome};
pub use mime::ContentType;
pub use options::Options;
pub use pipe::Piped;
pub use request::Request;
pub use response::{Outgoing, Response, ResponseBody};
pub use server::Server;
pub use status::Status;
pub use stream::ReadStream;

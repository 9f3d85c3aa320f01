//! Minimal respond example: text, JSON, JSONP, redirects and file streaming.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i http://localhost:3000/users/42
//!   curl -i 'http://localhost:3000/users/42?callback=show'
//!   curl -i http://localhost:3000/old
//!   curl -i http://localhost:3000/files/Cargo.toml
//!   curl -i http://localhost:3000/files/nope.txt      → 404 ENOENT
//!   curl -I http://localhost:3000/                     → headers only

use respond::{Error, ReadStream, Request, Response, Server, Status};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

async fn app(req: Request, mut res: Response) -> Result<(), Error> {
    res.set_header("x-powered-by", "respond")?;

    let path = req.path().to_owned();
    match path.split('/').collect::<Vec<_>>().as_slice() {
        ["", ""] => res.send("<h1>hello</h1>").await,
        ["", "users", id] => {
            let user = serde_json::json!({ "id": id, "name": "alice" });
            match req.query_param("callback") {
                Some(cb) => res.jsonp(cb, &user).await,
                None => res.json(&user).await,
            }
        }
        ["", "old"] => res.redirect("/", Some(Status::MovedPermanently)),
        // Files are streamed from the working directory; a missing file
        // becomes `404 ENOENT`.
        ["", "files", name] if !name.contains("..") => {
            res.vary("accept-encoding")?;
            res.send(ReadStream::file(*name)).await
        }
        _ => res.not_found("no such page").await,
    }
}

//! Incoming HTTP request, as far as responding needs it.
//!
//! The body is not read: parsing requests is the host application's job.

use http::request::Parts;
use http::{HeaderMap, Method, Uri};

/// Method, target and headers of the request being answered.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl Request {
    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn query(&self) -> Option<&str> { self.uri.query() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Header value as a string, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Value of the first `key=value` pair in the query string, undecoded.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query()?
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

impl From<Parts> for Request {
    fn from(parts: Parts) -> Self {
        Self { method: parts.method, uri: parts.uri, headers: parts.headers }
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(req: http::Request<B>) -> Self {
        req.into_parts().0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request {
        http::Request::get(uri).header("x-a", "1").body(()).unwrap().into()
    }

    #[test]
    fn exposes_target_and_headers() {
        let req = request("/users/42?callback=cb&flag");
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "/users/42");
        assert_eq!(req.query_param("callback"), Some("cb"));
        assert_eq!(req.query_param("flag"), Some(""));
        assert_eq!(req.query_param("missing"), None);
        assert_eq!(req.header("X-A"), Some("1"));
    }
}

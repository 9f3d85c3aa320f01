//! Header helpers on [`Response`].
//!
//! Names and values accept anything `http`'s own builder accepts: typed
//! [`HeaderName`] / [`HeaderValue`] constants, or strings that are validated
//! on the way in.

use http::header::{AsHeaderName, CONTENT_TYPE, VARY};
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::error::Error;
use crate::mime::ContentType;
use crate::response::Response;

impl Response {
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.note_if_sent("headers");
        &mut self.headers
    }

    /// First value of `name`, if present.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    pub fn has_header<K: AsHeaderName>(&self, name: K) -> bool {
        self.headers.contains_key(name)
    }

    /// Sets `name`, replacing every existing value.
    pub fn set_header<K, V>(&mut self, name: K, value: V) -> Result<(), Error>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let (name, value) = convert(name, value)?;
        self.note_if_sent("header");
        self.headers.insert(name, value);
        Ok(())
    }

    /// Sets `name` only if it has no value yet. Never overwrites.
    ///
    /// Returns whether the value was set.
    pub fn set_header_if_absent<K, V>(&mut self, name: K, value: V) -> Result<bool, Error>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let (name, value) = convert(name, value)?;
        if self.headers.contains_key(&name) {
            return Ok(false);
        }
        self.note_if_sent("header");
        self.headers.insert(name, value);
        Ok(true)
    }

    /// Adds a value to `name`, keeping the existing ones.
    pub fn append_header<K, V>(&mut self, name: K, value: V) -> Result<(), Error>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<http::Error>,
        V: TryInto<HeaderValue>,
        V::Error: Into<http::Error>,
    {
        let (name, value) = convert(name, value)?;
        self.note_if_sent("header");
        self.headers.append(name, value);
        Ok(())
    }

    /// Removes every value of `name`, returning the first one.
    pub fn remove_header<K: AsHeaderName>(&mut self, name: K) -> Option<HeaderValue> {
        self.note_if_sent("header");
        self.headers.remove(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Sets `Content-Type` from a short token (`"json"`, `"html"`, `"png"`,
    /// ...) or a full `type/subtype`, with an optional charset parameter.
    ///
    /// Unknown tokens fall back to `application/octet-stream`.
    pub fn set_type(&mut self, token: &str, charset: Option<&str>) -> Result<(), Error> {
        let media = match ContentType::from_token(token) {
            Some(ty) => ty.as_str(),
            None if token.contains('/') => token.trim(),
            None => {
                debug!(token, "unknown content type token");
                ContentType::OctetStream.as_str()
            }
        };
        let value = match charset {
            Some(charset) => format!("{media}; charset={charset}"),
            None => media.to_owned(),
        };
        self.set_header(CONTENT_TYPE, value)
    }

    /// Adds `field` to the `Vary` header.
    ///
    /// Accepts a comma-separated list. Fields already listed (compared
    /// case-insensitively, across every `Vary` value) are skipped and `*`
    /// replaces everything. A `Vary` value that is not visible ASCII is left
    /// alone.
    pub fn vary(&mut self, field: &str) -> Result<(), Error> {
        let values: Result<Vec<&str>, _> =
            self.headers.get_all(VARY).iter().map(HeaderValue::to_str).collect();
        let current = match values {
            Ok(values) => values.join(", "),
            Err(_) => {
                debug!(field, "existing Vary value is not ASCII, not merging");
                return Ok(());
            }
        };

        let merged = append_vary(&current, field);
        if merged.is_empty() || merged == current {
            return Ok(());
        }
        self.set_header(VARY, merged)
    }
}

fn convert<K, V>(name: K, value: V) -> Result<(HeaderName, HeaderValue), Error>
where
    K: TryInto<HeaderName>,
    K::Error: Into<http::Error>,
    V: TryInto<HeaderValue>,
    V::Error: Into<http::Error>,
{
    let name = name.try_into().map_err(|e| Error::InvalidHeader(e.into()))?;
    let value = value.try_into().map_err(|e| Error::InvalidHeader(e.into()))?;
    Ok((name, value))
}

/// Merges the field list `field` into the `Vary` value `header`.
fn append_vary(header: &str, field: &str) -> String {
    let fields = parse_list(field);
    if fields.contains(&"*") {
        return "*".to_owned();
    }

    let mut listed: Vec<String> = parse_list(header).iter().map(|f| f.to_ascii_lowercase()).collect();
    if listed.iter().any(|f| f == "*") {
        return header.to_owned();
    }

    let mut value = header.trim().to_owned();
    for field in fields {
        let lower = field.to_ascii_lowercase();
        if listed.contains(&lower) {
            continue;
        }
        listed.push(lower);
        if !value.is_empty() {
            value.push_str(", ");
        }
        value.push_str(field);
    }
    value
}

fn parse_list(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).filter(|f| !f.is_empty()).collect()
}

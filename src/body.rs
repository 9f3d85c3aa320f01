//! Body values and content-type inference.
//!
//! Every value [`Response::send`](crate::Response::send) accepts is one of
//! the [`Body`] variants. Classification decides how the value is serialised
//! and which media type it implies when the caller has not set one.

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::Error;
use crate::mime::ContentType;
use crate::stream::ReadStream;

/// A response body.
#[derive(Debug, Default)]
pub enum Body {
    /// No body. Sending it produces `204 No Content`.
    #[default]
    Empty,
    Text(String),
    Bytes(Bytes),
    Number(Number),
    Bool(bool),
    Json(Value),
    Stream(ReadStream),
}

/// The outcome of [`Body::classify`].
#[derive(Debug)]
pub enum Classified {
    Empty,
    Content { bytes: Bytes, content_type: ContentType },
    Stream(ReadStream),
}

impl Body {
    /// Serialises `value` into a [`Body::Json`].
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Serialises the body and infers its media type.
    pub fn classify(self) -> Classified {
        match self {
            Self::Empty => Classified::Empty,
            Self::Text(s) => {
                let content_type = if looks_like_html(&s) {
                    ContentType::Html
                } else {
                    ContentType::Text
                };
                Classified::Content { bytes: Bytes::from(s), content_type }
            }
            Self::Bytes(bytes) => Classified::Content { bytes, content_type: ContentType::OctetStream },
            Self::Number(n) => Classified::Content {
                bytes: Bytes::from(n.to_string()),
                content_type: ContentType::Text,
            },
            Self::Bool(b) => Classified::Content {
                bytes: Bytes::from_static(if b { "true" } else { "false" }.as_bytes()),
                content_type: ContentType::Text,
            },
            Self::Json(value) => Classified::Content {
                bytes: Bytes::from(value.to_string()),
                content_type: ContentType::Json,
            },
            Self::Stream(stream) => Classified::Stream(stream),
        }
    }
}

fn looks_like_html(s: &str) -> bool {
    s.trim_start().starts_with('<')
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl From<()> for Body {
    fn from(_: ()) -> Self { Self::Empty }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(v: Option<T>) -> Self { v.map_or(Self::Empty, Into::into) }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Body {
    fn from(s: String) -> Self { Self::Text(s) }
}

impl From<Bytes> for Body {
    fn from(b: Bytes) -> Self { Self::Bytes(b) }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self { Self::Bytes(Bytes::from(b)) }
}

impl From<&'static [u8]> for Body {
    fn from(b: &'static [u8]) -> Self { Self::Bytes(Bytes::from_static(b)) }
}

impl From<bool> for Body {
    fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<Value> for Body {
    fn from(v: Value) -> Self { Self::Json(v) }
}

impl From<ReadStream> for Body {
    fn from(s: ReadStream) -> Self { Self::Stream(s) }
}

macro_rules! number_bodies {
    ($($t:ty),+) => {$(
        impl From<$t> for Body {
            fn from(n: $t) -> Self { Self::Number(Number::from(n)) }
        }
    )+};
}

number_bodies!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Body {
    fn from(n: f64) -> Self {
        // NaN and the infinities have no JSON number form.
        Number::from_f64(n).map_or_else(|| Self::Text(n.to_string()), Self::Number)
    }
}

impl From<f32> for Body {
    fn from(n: f32) -> Self { Self::from(f64::from(n)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(body: impl Into<Body>) -> (Bytes, ContentType) {
        match body.into().classify() {
            Classified::Content { bytes, content_type } => (bytes, content_type),
            other => panic!("expected content, got {other:?}"),
        }
    }

    #[test]
    fn markup_is_html() {
        assert_eq!(content("<p>hi</p>").1, ContentType::Html);
        assert_eq!(content("  \n\t<!doctype html>").1, ContentType::Html);
    }

    #[test]
    fn other_strings_are_plain_text() {
        assert_eq!(content("hello world"), (Bytes::from("hello world"), ContentType::Text));
        assert_eq!(content("x <b>").1, ContentType::Text);
        assert_eq!(content("").1, ContentType::Text);
    }

    #[test]
    fn bytes_pass_through_as_octet_stream() {
        let (bytes, ty) = content(vec![0u8, 159, 146, 150]);
        assert_eq!(&bytes[..], &[0u8, 159, 146, 150]);
        assert_eq!(ty, ContentType::OctetStream);
    }

    #[test]
    fn scalars_are_stringified_as_text() {
        assert_eq!(content(42), (Bytes::from("42"), ContentType::Text));
        assert_eq!(content(1.5), (Bytes::from("1.5"), ContentType::Text));
        assert_eq!(content(true), (Bytes::from("true"), ContentType::Text));
        assert_eq!(content(f64::NAN), (Bytes::from("NaN"), ContentType::Text));
    }

    #[test]
    fn objects_are_json() {
        #[derive(Serialize)]
        struct User { name: &'static str }

        let body = Body::json(&User { name: "foo" }).unwrap();
        assert_eq!(content(body), (Bytes::from(r#"{"name":"foo"}"#), ContentType::Json));
    }

    #[test]
    fn absent_values_are_empty() {
        assert!(matches!(Body::from(()).classify(), Classified::Empty));
        assert!(matches!(Body::from(None::<String>).classify(), Classified::Empty));
        assert!(matches!(Body::from(Some("x")).classify(), Classified::Content { .. }));
    }
}

//! Media types by short name.
//!
//! [`Response::set_type`](crate::Response::set_type) accepts either a full
//! `type/subtype` or one of the short tokens below (`"json"`, `"html"`, ...).

use http::HeaderValue;

/// Common content-type values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Css,          // text/css
    Csv,          // text/csv
    EventStream,  // text/event-stream  (SSE)
    FormData,     // application/x-www-form-urlencoded
    Gif,          // image/gif
    Html,         // text/html
    Ico,          // image/x-icon
    JavaScript,   // text/javascript
    Jpeg,         // image/jpeg
    Json,         // application/json
    MsgPack,      // application/msgpack
    OctetStream,  // application/octet-stream  (binary / file download)
    Pdf,          // application/pdf
    Png,          // image/png
    Svg,          // image/svg+xml
    Text,         // text/plain
    Wasm,         // application/wasm
    Webp,         // image/webp
    Xml,          // application/xml
    Zip,          // application/zip
}

impl ContentType {
    /// The bare media type, without parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css         => "text/css",
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData    => "application/x-www-form-urlencoded",
            Self::Gif         => "image/gif",
            Self::Html        => "text/html",
            Self::Ico         => "image/x-icon",
            Self::JavaScript  => "text/javascript",
            Self::Jpeg        => "image/jpeg",
            Self::Json        => "application/json",
            Self::MsgPack     => "application/msgpack",
            Self::OctetStream => "application/octet-stream",
            Self::Pdf         => "application/pdf",
            Self::Png         => "image/png",
            Self::Svg         => "image/svg+xml",
            Self::Text        => "text/plain",
            Self::Wasm        => "application/wasm",
            Self::Webp        => "image/webp",
            Self::Xml         => "application/xml",
            Self::Zip         => "application/zip",
        }
    }

    /// The header value used when the type is inferred: textual types carry
    /// `charset=utf-8`, binary ones don't.
    pub fn header_str(self) -> &'static str {
        match self {
            Self::Css        => "text/css; charset=utf-8",
            Self::Csv        => "text/csv; charset=utf-8",
            Self::Html       => "text/html; charset=utf-8",
            Self::JavaScript => "text/javascript; charset=utf-8",
            Self::Json       => "application/json; charset=utf-8",
            Self::Text       => "text/plain; charset=utf-8",
            Self::Xml        => "application/xml; charset=utf-8",
            other            => other.as_str(),
        }
    }

    pub(crate) fn header_value(self) -> HeaderValue {
        HeaderValue::from_static(self.header_str())
    }

    /// Resolves a short token or file extension (case-insensitive, optional
    /// leading dot) to a known type.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().trim_start_matches('.').to_ascii_lowercase();
        let ty = match token.as_str() {
            "css"                         => Self::Css,
            "csv"                         => Self::Csv,
            "event-stream" | "sse"        => Self::EventStream,
            "form" | "urlencoded"         => Self::FormData,
            "gif"                         => Self::Gif,
            "html" | "htm"                => Self::Html,
            "ico"                         => Self::Ico,
            "js" | "mjs" | "javascript"   => Self::JavaScript,
            "jpg" | "jpeg"                => Self::Jpeg,
            "json" | "map"                => Self::Json,
            "msgpack"                     => Self::MsgPack,
            "bin" | "binary" | "octet-stream" => Self::OctetStream,
            "pdf"                         => Self::Pdf,
            "png"                         => Self::Png,
            "svg"                         => Self::Svg,
            "text" | "txt" | "plain"      => Self::Text,
            "wasm"                        => Self::Wasm,
            "webp"                        => Self::Webp,
            "xml"                         => Self::Xml,
            "zip"                         => Self::Zip,
            _                             => return None,
        };
        Some(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_case_insensitively() {
        assert_eq!(ContentType::from_token("JSON"), Some(ContentType::Json));
        assert_eq!(ContentType::from_token(".html"), Some(ContentType::Html));
        assert_eq!(ContentType::from_token("txt"), Some(ContentType::Text));
        assert_eq!(ContentType::from_token("nope"), None);
    }

    #[test]
    fn textual_types_carry_a_charset() {
        assert_eq!(ContentType::Text.header_str(), "text/plain; charset=utf-8");
        assert_eq!(ContentType::Json.header_str(), "application/json; charset=utf-8");
        assert_eq!(ContentType::OctetStream.header_str(), "application/octet-stream");
        assert_eq!(ContentType::Png.header_str(), "image/png");
    }
}

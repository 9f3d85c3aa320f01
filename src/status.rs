//! HTTP status codes as a typed enum, plus one shorthand per code.
//!
//! The table below is the single source of truth. For each row the
//! `statuses!` macro emits a [`Status`] variant, its code and reason phrase,
//! and a method on [`Response`] that sets the status and sends a body:
//!
//! ```rust,no_run
//! use respond::{Request, Response};
//!
//! async fn get_user(_req: Request, mut res: Response) {
//!     // same as res.set_status(Status::NotFound); res.send("no such user")
//!     let _ = res.not_found("no such user").await;
//! }
//! ```

use http::StatusCode;

use crate::body::Body;
use crate::error::Error;
use crate::response::Response;

macro_rules! statuses {
    ($( $(#[$note:meta])* ($code:literal, $variant:ident, $method:ident, $reason:literal); )+) => {
        /// All IANA-registered HTTP status codes.
        #[allow(clippy::enum_variant_names)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Status {
            $(
                #[doc = concat!("`", stringify!($code), " ", $reason, "`")]
                $variant,
            )+
        }

        impl Status {
            /// Every known status, in ascending order.
            pub const ALL: &'static [Status] = &[$(Self::$variant),+];

            pub const fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub const fn reason(self) -> &'static str {
                match self {
                    $(Self::$variant => $reason,)+
                }
            }

            pub const fn from_code(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Response {
            $(
                #[doc = concat!("Sets `", stringify!($code), " ", $reason, "` and sends `body`.")]
                $(#[$note])*
                pub async fn $method(&mut self, body: impl Into<Body>) -> Result<(), Error> {
                    self.set_status(Status::$variant);
                    self.send(body).await
                }
            )+
        }
    };
}

statuses! {
    // ── 1xx Informational ─────────────────────────────────────────────────────
    ///
    /// hyper cannot deliver an interim status as the final response: over
    /// HTTP/1 the client receives a `500` instead.
    (100, Continue,                      r#continue,                       "Continue");
    ///
    /// Only meaningful together with a protocol upgrade, which this crate
    /// does not perform.
    (101, SwitchingProtocols,            switching_protocols,              "Switching Protocols");
    ///
    /// hyper cannot deliver an interim status as the final response: over
    /// HTTP/1 the client receives a `500` instead.
    (102, Processing,                    processing,                       "Processing");
    ///
    /// hyper cannot deliver an interim status as the final response: over
    /// HTTP/1 the client receives a `500` instead.
    (103, EarlyHints,                    early_hints,                      "Early Hints");

    // ── 2xx Success ───────────────────────────────────────────────────────────
    (200, Ok,                            ok,                               "OK");
    (201, Created,                       created,                          "Created");
    (202, Accepted,                      accepted,                         "Accepted");
    (203, NonAuthoritativeInformation,   non_authoritative_information,    "Non-Authoritative Information");
    (204, NoContent,                     no_content,                       "No Content");
    (205, ResetContent,                  reset_content,                    "Reset Content");
    (206, PartialContent,                partial_content,                  "Partial Content");
    (207, MultiStatus,                   multi_status,                     "Multi-Status");
    (208, AlreadyReported,               already_reported,                 "Already Reported");
    (226, ImUsed,                        im_used,                          "IM Used");

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    (300, MultipleChoices,               multiple_choices,                 "Multiple Choices");
    (301, MovedPermanently,              moved_permanently,                "Moved Permanently");
    (302, Found,                         found,                            "Found");
    (303, SeeOther,                      see_other,                        "See Other");
    (304, NotModified,                   not_modified,                     "Not Modified");
    (307, TemporaryRedirect,             temporary_redirect,               "Temporary Redirect");
    (308, PermanentRedirect,             permanent_redirect,               "Permanent Redirect");

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    (400, BadRequest,                    bad_request,                      "Bad Request");
    (401, Unauthorized,                  unauthorized,                     "Unauthorized");
    (402, PaymentRequired,               payment_required,                 "Payment Required");
    (403, Forbidden,                     forbidden,                        "Forbidden");
    (404, NotFound,                      not_found,                        "Not Found");
    (405, MethodNotAllowed,              method_not_allowed,               "Method Not Allowed");
    (406, NotAcceptable,                 not_acceptable,                   "Not Acceptable");
    (407, ProxyAuthenticationRequired,   proxy_authentication_required,    "Proxy Authentication Required");
    (408, RequestTimeout,                request_timeout,                  "Request Timeout");
    (409, Conflict,                      conflict,                         "Conflict");
    (410, Gone,                          gone,                             "Gone");
    (411, LengthRequired,                length_required,                  "Length Required");
    (412, PreconditionFailed,            precondition_failed,              "Precondition Failed");
    (413, ContentTooLarge,               content_too_large,                "Content Too Large");
    (414, UriTooLong,                    uri_too_long,                     "URI Too Long");
    (415, UnsupportedMediaType,          unsupported_media_type,           "Unsupported Media Type");
    (416, RangeNotSatisfiable,           range_not_satisfiable,            "Range Not Satisfiable");
    (417, ExpectationFailed,             expectation_failed,               "Expectation Failed");
    (418, ImATeapot,                     im_a_teapot,                      "I'm a Teapot");
    (421, MisdirectedRequest,            misdirected_request,              "Misdirected Request");
    (422, UnprocessableContent,          unprocessable_content,            "Unprocessable Content");
    (423, Locked,                        locked,                           "Locked");
    (424, FailedDependency,              failed_dependency,                "Failed Dependency");
    (425, TooEarly,                      too_early,                        "Too Early");
    (426, UpgradeRequired,               upgrade_required,                 "Upgrade Required");
    (428, PreconditionRequired,          precondition_required,            "Precondition Required");
    (429, TooManyRequests,               too_many_requests,                "Too Many Requests");
    (431, RequestHeaderFieldsTooLarge,   request_header_fields_too_large,  "Request Header Fields Too Large");
    (451, UnavailableForLegalReasons,    unavailable_for_legal_reasons,    "Unavailable For Legal Reasons");

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    (500, InternalServerError,           internal_server_error,            "Internal Server Error");
    (501, NotImplemented,                not_implemented,                  "Not Implemented");
    (502, BadGateway,                    bad_gateway,                      "Bad Gateway");
    (503, ServiceUnavailable,            service_unavailable,              "Service Unavailable");
    (504, GatewayTimeout,                gateway_timeout,                  "Gateway Timeout");
    (505, HttpVersionNotSupported,       http_version_not_supported,       "HTTP Version Not Supported");
    (506, VariantAlsoNegotiates,         variant_also_negotiates,          "Variant Also Negotiates");
    (507, InsufficientStorage,           insufficient_storage,             "Insufficient Storage");
    (508, LoopDetected,                  loop_detected,                    "Loop Detected");
    (510, NotExtended,                   not_extended,                     "Not Extended");
    (511, NetworkAuthenticationRequired, network_authentication_required,  "Network Authentication Required");
}

impl Status {
    /// `true` for 1xx codes, which are interim and never a final response.
    pub const fn is_informational(self) -> bool {
        matches!(self.code(), 100..=199)
    }

    /// `true` for 3xx codes.
    pub const fn is_redirection(self) -> bool {
        matches!(self.code(), 300..=399)
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 { s.code() }
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        // Every code in the table is within 100..=999.
        StatusCode::from_u16(s.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_the_table() {
        for &status in Status::ALL {
            assert_eq!(Status::from_code(status.code()), Some(status));
            assert_eq!(StatusCode::from(status).as_u16(), status.code());
        }
        assert_eq!(Status::from_code(299), None);
    }

    #[test]
    fn reasons() {
        assert_eq!(Status::NotFound.reason(), "Not Found");
        assert_eq!(Status::ImATeapot.code(), 418);
    }

    #[test]
    fn informational_range() {
        let interim: Vec<_> = Status::ALL.iter().filter(|s| s.is_informational()).collect();
        assert_eq!(
            interim,
            [&Status::Continue, &Status::SwitchingProtocols, &Status::Processing, &Status::EarlyHints]
        );
        assert!(!Status::Ok.is_informational());
    }

    #[test]
    fn redirection_range() {
        assert!(Status::Found.is_redirection());
        assert!(Status::PermanentRedirect.is_redirection());
        assert!(!Status::Ok.is_redirection());
        assert!(!Status::BadRequest.is_redirection());
    }

    #[tokio::test]
    async fn shorthand_sets_status_and_sends() {
        let (mut res, out) = Response::new(http::Method::GET, Default::default());
        res.not_found("no such user").await.unwrap();
        drop(res);

        let reply = out.into_http().await;
        assert_eq!(reply.status(), StatusCode::NOT_FOUND);
        assert_eq!(reply.headers()["content-type"], "text/plain; charset=utf-8");
    }
}

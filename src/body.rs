//! Request payloads and their wire encoding.

use std::borrow::Cow;

use tracing::trace;

use crate::{
    error::Result,
    header::{Headers, CONTENT_TYPE},
};

mod form;
#[cfg(feature = "multipart")]
mod multipart;

#[cfg(feature = "multipart")]
pub use multipart::Part;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How a request payload is carried.
///
/// Every variant defines how it turns into bytes and what it does to the `Content-Type` header;
/// see [`Body::encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No payload.
    #[default]
    None,
    /// Caller-serialized JSON.
    Json(Cow<'static, [u8]>),
    /// Name/value pairs sent as `application/x-www-form-urlencoded`.
    FormUrlEncoded(Vec<(Cow<'static, str>, Cow<'static, str>)>),
    /// Arbitrary bytes with an explicit content type.
    Raw {
        /// The payload.
        content: Cow<'static, [u8]>,
        /// Media type sent as `Content-Type`.
        content_type: Cow<'static, str>,
    },
    /// `multipart/form-data` parts, emitted in order.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    Multipart(Vec<Part>),
}

impl Body {
    pub fn text(
        text: impl Into<Cow<'static, str>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Raw {
            content: match text.into() {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                Cow::Owned(s) => Cow::Owned(s.into_bytes()),
            },
            content_type: content_type.into(),
        }
    }

    pub fn raw(
        bytes: impl Into<Cow<'static, [u8]>>,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Raw {
            content: bytes.into(),
            content_type: content_type.into(),
        }
    }

    pub fn json_bytes(bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        Self::Json(bytes.into())
    }

    /// Serializes `value` into a JSON body.
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_vec(value)?.into()))
    }

    /// See also the [`body_form!`](crate::body_form) macro.
    pub fn form(fields: Vec<(Cow<'static, str>, Cow<'static, str>)>) -> Self {
        Self::FormUrlEncoded(fields)
    }

    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn multipart(parts: impl IntoIterator<Item = Part>) -> Self {
        Self::Multipart(parts.into_iter().collect())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Encodes the payload and updates `headers` with its content type.
    ///
    /// - `None` yields no bytes and leaves `headers` alone.
    /// - `Json` passes its bytes through and sets `Content-Type: application/json` only when no
    ///   `Content-Type` is present.
    /// - `FormUrlEncoded` percent-encodes every name and value (space becomes `+`), joins them
    ///   with `=` and `&`, and sets `Content-Type: application/x-www-form-urlencoded`.
    /// - `Raw` passes its bytes through; its content type replaces any existing one.
    /// - `Multipart` picks a fresh random boundary that does not occur in any part and sets
    ///   `Content-Type: multipart/form-data; boundary=...`. A part whose MIME type contains CR or
    ///   LF fails with [`Error::InvalidMimeType`](crate::Error::InvalidMimeType).
    ///
    /// Header names are matched exactly, so only the `Content-Type` spelling is consulted.
    pub fn encode(&self, headers: &mut Headers) -> Result<Vec<u8>> {
        self.encode_inner(headers, None)
    }

    /// Like [`Body::encode`], but with a caller-chosen multipart boundary.
    ///
    /// Fails with [`Error::BoundaryCollision`](crate::Error::BoundaryCollision) when the data
    /// of a part contains `boundary`. Other variants ignore `boundary`.
    #[cfg(feature = "multipart")]
    #[cfg_attr(docsrs, doc(cfg(feature = "multipart")))]
    pub fn encode_with_boundary(&self, headers: &mut Headers, boundary: &str) -> Result<Vec<u8>> {
        self.encode_inner(headers, Some(boundary))
    }

    #[cfg_attr(not(feature = "multipart"), allow(unused_variables))]
    fn encode_inner(&self, headers: &mut Headers, boundary: Option<&str>) -> Result<Vec<u8>> {
        let bytes = match self {
            Self::None => vec![],
            Self::Json(content) => {
                if !headers.contains(CONTENT_TYPE) {
                    headers.set(CONTENT_TYPE, JSON_CONTENT_TYPE);
                }
                content.to_vec()
            }
            Self::FormUrlEncoded(fields) => {
                headers.set(CONTENT_TYPE, FORM_CONTENT_TYPE);
                form::encode_form_fields(fields).into_bytes()
            }
            Self::Raw {
                content,
                content_type,
            } => {
                if let Some(previous) = headers.value(CONTENT_TYPE) {
                    if previous != content_type {
                        trace!(
                            target: "endpointkit::body",
                            previous,
                            replacement = %content_type,
                            "raw body content type replaces header"
                        );
                    }
                }
                headers.set(CONTENT_TYPE, content_type.clone());
                content.to_vec()
            }
            #[cfg(feature = "multipart")]
            Self::Multipart(parts) => {
                multipart::check_mime_types(parts)?;
                let boundary = match boundary {
                    Some(boundary) => {
                        multipart::check_boundary(boundary, parts)?;
                        Cow::Borrowed(boundary)
                    }
                    None => Cow::Owned(multipart::pick_boundary(parts)?),
                };
                headers.set(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                );
                multipart::generate_multipart_body(&boundary, parts)
            }
        };
        Ok(bytes)
    }
}

/// Builds a [`Body::FormUrlEncoded`] from `key => value` pairs.
///
/// ```
/// use endpointkit::body_form;
/// let body = body_form! {
///     "key1" => "value1",
///     "key2" => String::from("value2"),
/// };
/// # let _ = body;
/// ```
#[macro_export]
macro_rules! body_form {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::Body::form(vec![$(($key.into(), $value.into()),)*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_side_effects() {
        let mut headers = Headers::new();
        assert!(Body::None.encode(&mut headers).unwrap().is_empty());
        assert!(headers.is_empty());
        assert!(Body::default().is_none());
    }

    #[test]
    fn test_json_defaults_content_type() {
        let mut headers = Headers::new();
        let bytes = Body::json_bytes(&b"{\"a\":1}"[..])
            .encode(&mut headers)
            .unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
        assert_eq!(headers.value(CONTENT_TYPE), Some("application/json"));
    }

    #[test]
    fn test_json_keeps_existing_content_type() {
        let mut headers = Headers::new().with(CONTENT_TYPE, "application/vnd.api+json");
        Body::json_bytes(&b"{}"[..]).encode(&mut headers).unwrap();
        assert_eq!(headers.value(CONTENT_TYPE), Some("application/vnd.api+json"));
    }

    #[test]
    fn test_raw_content_type_wins() {
        let mut headers = Headers::new().with(CONTENT_TYPE, "application/json");
        let bytes = Body::raw(&b"a,b\n1,2\n"[..], "text/csv")
            .encode(&mut headers)
            .unwrap();
        assert_eq!(bytes, b"a,b\n1,2\n");
        assert_eq!(headers.value(CONTENT_TYPE), Some("text/csv"));
    }

    #[test]
    fn test_text_body() {
        let mut headers = Headers::new();
        let bytes = Body::text(String::from("hello"), "text/plain; charset=utf-8")
            .encode(&mut headers)
            .unwrap();
        assert_eq!(bytes, b"hello");
        assert_eq!(
            headers.value(CONTENT_TYPE),
            Some("text/plain; charset=utf-8")
        );
    }

    #[test]
    fn test_form_body() {
        let mut headers = Headers::new().with(CONTENT_TYPE, "text/plain");
        let bytes = body_form! {
            "a" => "1",
            "b" => String::from("x y"),
        }
        .encode(&mut headers)
        .unwrap();
        assert_eq!(bytes, b"a=1&b=x+y");
        assert_eq!(headers.value(CONTENT_TYPE), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_empty_form_body() {
        let mut headers = Headers::new();
        let bytes = Body::form(vec![]).encode(&mut headers).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(headers.value(CONTENT_TYPE), Some(FORM_CONTENT_TYPE));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_serialize() {
        #[derive(serde::Serialize)]
        struct User<'a> {
            name: &'a str,
        }
        let body = Body::json(&User { name: "ada" }).unwrap();
        assert_eq!(body, Body::Json(Cow::Borrowed(&b"{\"name\":\"ada\"}"[..])));
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_multipart_sets_boundary_header() {
        let mut headers = Headers::new().with(CONTENT_TYPE, "application/json");
        let body = Body::multipart([Part::text("f", "hi")]);
        let bytes = body.encode_with_boundary(&mut headers, "XyZ").unwrap();
        assert_eq!(
            headers.value(CONTENT_TYPE),
            Some("multipart/form-data; boundary=XyZ")
        );
        assert!(bytes.ends_with(b"--XyZ--"));
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_multipart_mime_type_with_line_break() {
        let body = Body::multipart([Part::text("f", "hi").with_mime_type("text/plain\r\nX: 1")]);
        let mut headers = Headers::new();
        assert!(matches!(
            body.encode(&mut headers),
            Err(crate::Error::InvalidMimeType { ref part }) if part == "f"
        ));
        assert!(matches!(
            body.encode_with_boundary(&mut headers, "XyZ"),
            Err(crate::Error::InvalidMimeType { .. })
        ));
        assert!(headers.is_empty());
    }

    #[cfg(feature = "multipart")]
    #[test]
    fn test_multipart_random_boundary_matches_header() {
        let mut headers = Headers::new();
        let body = Body::multipart([Part::text("f", "hi")]);
        let bytes = body.encode(&mut headers).unwrap();
        let content_type = headers.value(CONTENT_TYPE).unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        assert!(bytes.starts_with(format!("--{boundary}\r\n").as_bytes()));
        assert!(bytes.ends_with(format!("--{boundary}--").as_bytes()));
    }
}

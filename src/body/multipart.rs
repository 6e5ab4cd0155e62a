//! Multipart form body generation.

use std::borrow::Cow;

use memchr::memmem;
use tracing::{trace, warn};

use crate::error::{Error, Result};

/// Fresh boundaries tried before a collision is reported.
const MAX_BOUNDARY_ATTEMPTS: usize = 4;

/// A named field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: Cow<'static, str>,
    filename: Option<Cow<'static, str>>,
    mime_type: Option<Cow<'static, str>>,
    data: Cow<'static, [u8]>,
}

impl Part {
    pub fn new(name: impl Into<Cow<'static, str>>, data: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            mime_type: None,
            data: data.into(),
        }
    }

    pub fn text(name: impl Into<Cow<'static, str>>, text: impl Into<Cow<'static, str>>) -> Self {
        let data = match text.into() {
            Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
            Cow::Owned(s) => Cow::Owned(s.into_bytes()),
        };
        Self::new(name, data)
    }

    /// Include an extension when applicable; servers often sniff the type from it.
    pub fn with_filename(mut self, filename: impl Into<Cow<'static, str>>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<Cow<'static, str>>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Generates a random multipart boundary string.
pub(crate) fn generate_multipart_boundary() -> String {
    let (rnd1, rnd2): (u32, u32) = rand::random();
    format!("----endpointkit.boundary.{rnd1:08x}{rnd2:08x}")
}

/// Fails when any part's data contains `boundary`.
pub(crate) fn check_boundary(boundary: &str, parts: &[Part]) -> Result<()> {
    let finder = memmem::Finder::new(boundary.as_bytes());
    match parts.iter().find(|p| finder.find(&p.data).is_some()) {
        Some(part) => Err(Error::BoundaryCollision {
            part: part.name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Fails when a part's MIME type would break out of its header line.
pub(crate) fn check_mime_types(parts: &[Part]) -> Result<()> {
    match parts.iter().find(|p| {
        p.mime_type
            .as_deref()
            .is_some_and(|m| m.contains(['\r', '\n']))
    }) {
        Some(part) => Err(Error::InvalidMimeType {
            part: part.name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Picks a random boundary absent from every part.
pub(crate) fn pick_boundary(parts: &[Part]) -> Result<String> {
    let mut last_err = None;
    for _ in 0..MAX_BOUNDARY_ATTEMPTS {
        let boundary = generate_multipart_boundary();
        match check_boundary(&boundary, parts) {
            Ok(()) => {
                trace!(target: "endpointkit::body", %boundary, "multipart boundary chosen");
                return Ok(boundary);
            }
            Err(e) => {
                warn!(target: "endpointkit::body", %boundary, "multipart boundary collided with part data");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or(Error::BoundaryCollision {
        part: String::new(),
    }))
}

fn escape_name(name: &str) -> Cow<'_, str> {
    static ESCAPED: &[char] = &['"', '\r', '\n'];
    if !name.contains(ESCAPED) {
        return Cow::Borrowed(name);
    }
    name.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
        .into()
}

fn sanitize_filename(filename: &str) -> Cow<'_, str> {
    const STRIPPED_CHARS: &[char] = &['"', '\\', '/'];
    if !filename.contains(STRIPPED_CHARS) && !filename.contains(['\r', '\n']) {
        return Cow::Borrowed(filename);
    }
    filename
        .replace(STRIPPED_CHARS, "_")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
        .into()
}

fn estimate_multipart_body_size(boundary: &str, parts: &[Part]) -> usize {
    let size: usize = parts
        .iter()
        .map(|part| {
            60 + boundary.len()
                + part.name.len()
                + part.filename.as_ref().map(|s| s.len() + 13).unwrap_or_default()
                + part.mime_type.as_ref().map(|s| s.len() + 16).unwrap_or_default()
                + part.data.len()
        })
        .sum();
    size + boundary.len() + 4
}

/// Writes `parts` in order, each as its own boundary-delimited section, followed by the closing
/// delimiter. The output ends with `--boundary--`.
pub(crate) fn generate_multipart_body(boundary: &str, parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::with_capacity(estimate_multipart_body_size(boundary, parts));

    for part in parts {
        body.extend_from_slice(b"--");
        body.extend_from_slice(boundary.as_bytes());
        body.extend_from_slice(b"\r\nContent-Disposition: form-data; name=\"");
        body.extend_from_slice(escape_name(&part.name).as_bytes());
        body.push(b'"');
        if let Some(filename) = &part.filename {
            body.extend_from_slice(b"; filename=\"");
            body.extend_from_slice(sanitize_filename(filename).as_bytes());
            body.push(b'"');
        }
        body.extend_from_slice(b"\r\n");
        if let Some(mime_type) = &part.mime_type {
            body.extend_from_slice(b"Content-Type: ");
            body.extend_from_slice(mime_type.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"--");
    body.extend_from_slice(boundary.as_bytes());
    body.extend_from_slice(b"--");

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_part() {
        let parts = [Part::text("f", "hi")
            .with_filename("a.txt")
            .with_mime_type("text/plain")];
        let body = generate_multipart_body("B", &parts);
        assert_eq!(
            body,
            b"--B\r\n\
              Content-Disposition: form-data; name=\"f\"; filename=\"a.txt\"\r\n\
              Content-Type: text/plain\r\n\
              \r\n\
              hi\r\n\
              --B--"
        );
    }

    #[test]
    fn test_plain_field_has_no_optional_lines() {
        let body = generate_multipart_body("B", &[Part::text("field", "value")]);
        assert_eq!(
            body,
            b"--B\r\nContent-Disposition: form-data; name=\"field\"\r\n\r\nvalue\r\n--B--"
        );
    }

    #[test]
    fn test_parts_keep_order() {
        let parts = [
            Part::text("z", "1"),
            Part::text("a", "2"),
            Part::new("m", vec![0u8, 159, 146, 150]),
        ];
        let body = generate_multipart_body("B", &parts);
        let z = memmem::find(&body, b"name=\"z\"").unwrap();
        let a = memmem::find(&body, b"name=\"a\"").unwrap();
        let m = memmem::find(&body, b"name=\"m\"").unwrap();
        assert!(z < a && a < m);
        assert_eq!(memmem::find_iter(&body, b"--B\r\n").count(), 3);
    }

    #[test]
    fn test_empty_parts() {
        assert_eq!(generate_multipart_body("B", &[]), b"--B--");
    }

    #[test]
    fn test_header_escaping() {
        let parts = [Part::text("a\"b\r\n", "x").with_filename("../evil\"name.txt")];
        let body = generate_multipart_body("B", &parts);
        assert!(memmem::find(
            &body,
            b"name=\"a%22b%0D%0A\"; filename=\".._evil_name.txt\""
        )
        .is_some());
    }

    #[test]
    fn test_filename_line_breaks_stay_in_header() {
        let parts =
            [Part::text("f", "hi").with_filename("a.txt\"\r\nX-Injected: 1\r\n\r\nfake\r\n--B--")];
        check_boundary("B", &parts).unwrap();
        let body = generate_multipart_body("B", &parts);
        assert!(memmem::find(&body, b"X-Injected: 1\r\n").is_none());
        assert!(memmem::find(
            &body,
            b"filename=\"a.txt_%0D%0AX-Injected: 1%0D%0A%0D%0Afake%0D%0A--B--\"\r\n"
        )
        .is_some());
        assert_eq!(memmem::find_iter(&body, b"\r\n--B--").count(), 1);
    }

    #[test]
    fn test_mime_type_line_breaks_rejected() {
        let parts = [
            Part::text("ok", "1").with_mime_type("text/plain"),
            Part::text("bad", "x").with_mime_type("text/plain\r\n\r\nx\r\n--B--"),
        ];
        let err = check_mime_types(&parts).unwrap_err();
        assert!(matches!(err, Error::InvalidMimeType { part } if part == "bad"));
        assert!(check_mime_types(&parts[..1]).is_ok());
    }

    #[test]
    fn test_boundary_collision() {
        let parts = [Part::text("ok", "fine"), Part::text("bad", "x--B y")];
        let err = check_boundary("--B", &parts).unwrap_err();
        assert!(matches!(err, Error::BoundaryCollision { part } if part == "bad"));
        assert!(check_boundary("--C", &parts).is_ok());
    }

    #[test]
    fn test_generated_boundaries_differ() {
        let a = generate_multipart_boundary();
        let b = generate_multipart_boundary();
        assert!(a.starts_with("----endpointkit.boundary."));
        assert_ne!(a, b);
    }

    #[test]
    fn test_pick_boundary_avoids_data() {
        let parts = [Part::text("f", "----endpointkit.boundary.")];
        let boundary = pick_boundary(&parts).unwrap();
        assert!(memmem::find(parts[0].data(), boundary.as_bytes()).is_none());
    }
}

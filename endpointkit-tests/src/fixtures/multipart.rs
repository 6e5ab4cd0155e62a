#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use endpointkit::{header::CONTENT_TYPE, Body, Error, Headers, Part, Route};
    use futures::{executor::block_on, stream};
    use http_body_util::BodyExt;
    use memchr::memmem;
    use multer::Multipart;

    use crate::*;

    const TEST_CONTENT: &str = "test content";

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct FormItem {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Bytes,
    }

    async fn decode_multipart(body: Bytes, boundary: String) -> Vec<FormItem> {
        let body_stream = stream::once(async move { Ok::<_, Infallible>(body) });
        let mut multipart = Multipart::new(body_stream, boundary);
        let mut form_items = vec![];
        while let Some(field) = multipart.next_field().await.unwrap() {
            form_items.push(FormItem {
                name: field.name().unwrap_or_default().to_owned(),
                file_name: field.file_name().unwrap_or("not_a_file").into(),
                content_type: field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_default(),
                bytes: field.bytes().await.unwrap_or_default(),
            });
        }
        form_items
    }

    fn upload_parts() -> Vec<Part> {
        vec![
            Part::text("text_field", TEST_CONTENT),
            Part::new("file_field", &b"\x00\x01binary\xff"[..])
                .with_filename("test.bin")
                .with_mime_type("application/octet-stream"),
            Part::text("notes", "line one\r\nline two").with_mime_type("text/plain"),
        ]
    }

    fn expected_items() -> Vec<FormItem> {
        vec![
            FormItem {
                name: "text_field".into(),
                file_name: "not_a_file".into(),
                content_type: "".into(),
                bytes: Bytes::from_static(TEST_CONTENT.as_bytes()),
            },
            FormItem {
                name: "file_field".into(),
                file_name: "test.bin".into(),
                content_type: "application/octet-stream".into(),
                bytes: Bytes::from_static(b"\x00\x01binary\xff"),
            },
            FormItem {
                name: "notes".into(),
                file_name: "not_a_file".into(),
                content_type: "text/plain".into(),
                bytes: Bytes::from_static(b"line one\r\nline two"),
            },
        ]
    }

    #[test]
    fn test_body_multipart_bytes() {
        const PATH: &str = "requests/body_multipart_bytes";
        let received_facts = Arc::new([const { OnceLock::new() }; 2]);
        let _handle = crate::add_hyper_fixture(fixture_path(ApiHost::InnovationBff, PATH), {
            let received_facts = Arc::clone(&received_facts);
            move |req: Request<body::Incoming>| {
                let received_facts = Arc::clone(&received_facts);
                async move {
                    let is_blocking = req.is_blocking();
                    let content_type = req.content_type();
                    let boundary = content_type
                        .as_deref()
                        .and_then(|ct| multer::parse_boundary(ct).ok());
                    let body = req.into_body().collect().await.unwrap().to_bytes();
                    let form_items = decode_multipart(body, boundary.unwrap_or_default()).await;
                    received_facts[is_blocking as usize]
                        .set((form_items, content_type))
                        .ok();
                    let res = Response::new(Full::new(Default::default()));
                    (res, Ok(()))
                }
            }
        });

        let assertions = |(form_items, content_type): &(Vec<FormItem>, Option<String>)| {
            assert!(content_type
                .as_deref()
                .unwrap_or_default()
                .starts_with("multipart/form-data; boundary="));
            assert_eq!(form_items, &expected_items());
        };
        let route = Route::post(ApiHost::InnovationBff, PATH)
            .with_header(CONTENT_TYPE, "application/json")
            .with_body(Body::multipart(upload_parts()));
        let client = crate::init_builder().build().unwrap();

        #[cfg(feature = "blocking")]
        {
            client.send_blocking(&HyperTransport, &route).unwrap();
            assertions(received_facts[1].get().unwrap());
        }
        #[cfg(feature = "async")]
        {
            TOKIO_RT
                .block_on(client.send_async(&HyperTransport, &route))
                .unwrap();
            assertions(received_facts[0].get().unwrap());
        }
    }

    #[test]
    fn test_multipart_single_file_layout() {
        let body = Body::multipart([Part::text("f", "hi")
            .with_filename("a.txt")
            .with_mime_type("text/plain")]);
        let mut headers = Headers::new();
        let bytes = body
            .encode_with_boundary(&mut headers, "fixture-boundary")
            .unwrap();
        assert_eq!(
            headers.value(CONTENT_TYPE),
            Some("multipart/form-data; boundary=fixture-boundary")
        );
        assert_eq!(memmem::find_iter(&bytes, b"--fixture-boundary\r\n").count(), 1);
        assert!(memmem::find(
            &bytes,
            b"Content-Disposition: form-data; name=\"f\"; filename=\"a.txt\"\r\n"
        )
        .is_some());
        assert!(memmem::find(&bytes, b"\r\nContent-Type: text/plain\r\n\r\nhi\r\n").is_some());
        assert!(bytes.ends_with(b"--fixture-boundary--"));

        let items = block_on(decode_multipart(
            Bytes::from(bytes),
            "fixture-boundary".into(),
        ));
        assert_eq!(
            items,
            [FormItem {
                name: "f".into(),
                file_name: "a.txt".into(),
                content_type: "text/plain".into(),
                bytes: Bytes::from_static(b"hi"),
            }]
        );
    }

    #[test]
    fn test_multipart_boundary_collision() {
        let body = Body::multipart([
            Part::text("safe", "nothing to see"),
            Part::text("evil", "prefix --fixture-boundary suffix"),
        ]);
        let err = body
            .encode_with_boundary(&mut Headers::new(), "fixture-boundary")
            .unwrap_err();
        assert!(matches!(err, Error::BoundaryCollision { ref part } if part == "evil"));
    }

    #[test]
    fn test_multipart_boundaries_are_fresh() {
        let client = crate::init_builder().build().unwrap();
        let route = Route::post(ApiHost::MaxBff, "upload")
            .with_body(Body::multipart([Part::text("f", "x")]));
        let first = client.prepare(&route).unwrap();
        let second = client.prepare(&route).unwrap();
        assert_ne!(first.header("Content-Type"), second.header("Content-Type"));
    }
}

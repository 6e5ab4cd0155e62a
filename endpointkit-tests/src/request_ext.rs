use hyper::{body, header::CONTENT_TYPE, Request};

pub trait RequestExt {
    fn is_blocking(&self) -> bool;
    fn content_type(&self) -> Option<String>;
}

impl RequestExt for Request<body::Incoming> {
    fn is_blocking(&self) -> bool {
        self.headers().get("blocking").map(|v| v.as_bytes()) == Some(b"1")
    }

    fn content_type(&self) -> Option<String> {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }
}

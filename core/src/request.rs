//! Fluent HTTP request builder.
//!
//! # Design
//! `Request` accumulates method, URL, headers, query parameters, and a
//! body, then materializes into a `WireRequest` and executes it through a
//! `Transport`. Building is split from executing so the I/O boundary stays
//! explicit and unit tests can inspect exactly what would go on the wire.
//! Headers and query parameters are append-only lists that keep insertion
//! order and allow duplicates; the body is replaceable, last write wins.
//! `send` consumes the builder, which is what enforces the single-writer
//! contract.

use std::collections::HashMap;
use std::io::Read;
use std::time::Instant;

use http::Method;
use log::debug;
use serde::Serialize;
use url::Url;

use crate::body::{self, Body, MultipartForm};
use crate::error::RequestError;
use crate::param::Param;
use crate::response::Response;
use crate::transport::{Transport, UreqTransport};
use crate::wire::{WireRequest, WireResponse};

/// A mutable builder for one outbound HTTP request.
#[derive(Debug)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub body: Option<Body>,
    pub headers: Vec<Param>,
    pub query: Vec<Param>,
}

impl Request {
    /// Neither `method` nor `url` is validated here; invalid values only
    /// surface as `InvalidRequest` at materialization.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Append a header. Does not deduplicate.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push(Param::new(key, value));
    }

    /// Append a query parameter. Does not deduplicate.
    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push(Param::new(key, value));
    }

    /// Set the body to an arbitrary byte stream, replacing any prior body.
    pub fn add_body(&mut self, stream: impl Read + Send + 'static) {
        self.body = Some(Body::from_reader(stream));
    }

    /// Set the body to an in-memory string, replacing any prior body.
    pub fn add_body_string(&mut self, s: impl Into<String>) {
        self.body = Some(Body::from(s.into()));
    }

    /// Serialize `value` as the JSON body and append the matching
    /// `Content-Type` header.
    ///
    /// The header is appended before serialization runs, so on failure the
    /// builder keeps the header while the body stays untouched.
    pub fn add_body_json<T: Serialize>(&mut self, value: &T) -> Result<(), RequestError> {
        self.add_header("Content-Type", "application/json");

        let text = serde_json::to_string(value)
            .map_err(|e| RequestError::Serialization(e.to_string()))?;
        self.add_body_string(text);
        Ok(())
    }

    /// Serialize `value` as the XML body and append the matching
    /// `Content-Type` header. Same failure disposition as JSON.
    pub fn add_body_xml<T: Serialize>(&mut self, value: &T) -> Result<(), RequestError> {
        self.add_header("Content-Type", "application/xml");

        let text = quick_xml::se::to_string(value)
            .map_err(|e| RequestError::Serialization(e.to_string()))?;
        self.add_body_string(text);
        Ok(())
    }

    /// Set a form-encoded body, fields in lexicographic key order, and
    /// append the matching `Content-Type` header.
    pub fn add_body_form(&mut self, fields: &HashMap<String, String>) {
        self.add_header("Content-Type", "application/x-www-form-urlencoded");
        self.add_body_string(body::encode_form(fields));
    }

    /// Set a multipart body from the given fields, with a freshly generated
    /// boundary carried in the `Content-Type` header.
    pub fn add_body_multipart_form(&mut self, fields: &HashMap<String, String>) {
        let mut form = MultipartForm::new();
        self.add_header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", form.boundary()),
        );
        form.fields(fields);
        self.body = Some(Body::from(form.finish()));
    }

    /// Multipart body with one additional file part read from `file_path`
    /// and attached under `file_key`/`file_name`.
    ///
    /// If the file cannot be read the body stays untouched (the header has
    /// already been appended) and the error is returned.
    pub fn add_body_multipart_form_file(
        &mut self,
        fields: &HashMap<String, String>,
        file_key: &str,
        file_name: &str,
        file_path: &str,
    ) -> Result<(), RequestError> {
        let mut form = MultipartForm::new();
        self.add_header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", form.boundary()),
        );
        form.fields(fields);
        form.file_part(file_key, file_name, file_path)?;
        self.body = Some(Body::from(form.finish()));
        Ok(())
    }

    /// Value of the first header matching `key`, or `""` when absent.
    pub fn get_header(&self, key: &str) -> &str {
        self.headers
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }

    /// Value of the first query parameter matching `key`, or `""` when absent.
    pub fn get_query(&self, key: &str) -> &str {
        self.query
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
            .unwrap_or("")
    }

    /// Turn the accumulated state into a `WireRequest`.
    ///
    /// Validates the method token and parses the URL; query parameters
    /// already present in the URL are merged with the added ones and the
    /// query string is re-encoded in canonical form (stable-sorted by key,
    /// percent-encoded). The pending body stream is drained into bytes.
    pub fn materialize(self) -> Result<WireRequest, RequestError> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|e| RequestError::InvalidRequest(format!("method {:?}: {e}", self.method)))?;
        let mut url = Url::parse(&self.url)
            .map_err(|e| RequestError::InvalidRequest(format!("url {:?}: {e}", self.url)))?;

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.extend(self.query.into_iter().map(|p| (p.key, p.value)));
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            let mut encoder = url::form_urlencoded::Serializer::new(String::new());
            encoder.extend_pairs(&pairs);
            url.set_query(Some(&encoder.finish()));
        }

        let payload = match self.body {
            Some(mut stream) => {
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf).map_err(|e| {
                    RequestError::InvalidRequest(format!("reading request body: {e}"))
                })?;
                Some(buf)
            }
            None => None,
        };

        Ok(WireRequest {
            method,
            url,
            headers: self.headers,
            body: payload,
        })
    }

    /// Materialize and execute through the default ureq transport.
    pub fn send(self) -> Result<Response, RequestError> {
        self.send_with(&UreqTransport::default())
    }

    /// Materialize and execute through the given transport, timing the
    /// round-trip. Blocks until the response arrives.
    pub fn send_with(self, transport: &dyn Transport) -> Result<Response, RequestError> {
        let start = Instant::now();
        let wire = self.materialize()?;
        debug!("sending {} {}", wire.method, wire.url);

        let WireResponse {
            status,
            headers,
            body,
        } = transport.execute(wire)?;
        let duration = start.elapsed();
        debug!("{status} after {duration:?}");

        Ok(Response {
            status_code: status,
            duration,
            body,
            headers,
        })
    }
}

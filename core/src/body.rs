//! Request and response body payloads.
//!
//! # Design
//! `Body` is an opaque byte stream. Builders hand in readers, strings, or
//! byte vectors; whoever ends up owning the body is responsible for
//! draining or dropping it. The form and multipart encoders live here too:
//! both produce fully in-memory encodings, and multipart file parts copy
//! the file contents into the buffer so no handle outlives the call.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Cursor, Read};

use crate::error::RequestError;

/// An opaque byte stream used for request and response bodies.
pub struct Body(Box<dyn Read + Send>);

impl Body {
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self(Box::new(reader))
    }

    /// Drain the stream into a byte vector.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.0.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Drain the stream into a UTF-8 string.
    pub fn into_string(mut self) -> io::Result<String> {
        let mut buf = String::new();
        self.0.read_to_string(&mut buf)?;
        Ok(buf)
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Body(..)")
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self(Box::new(Cursor::new(s.into_bytes())))
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Box::new(Cursor::new(bytes)))
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`, keys in
/// lexicographic order so the output is deterministic.
pub(crate) fn encode_form(fields: &HashMap<String, String>) -> String {
    let sorted: BTreeMap<&String, &String> = fields.iter().collect();
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Incremental `multipart/form-data` encoder with a freshly generated
/// boundary.
pub(crate) struct MultipartForm {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        Self {
            boundary: uuid::Uuid::new_v4().simple().to_string(),
            buf: Vec::new(),
        }
    }

    pub(crate) fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Append every field, keys in lexicographic order.
    pub(crate) fn fields(&mut self, fields: &HashMap<String, String>) {
        let sorted: BTreeMap<&String, &String> = fields.iter().collect();
        for (key, value) in sorted {
            let part = format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{key}\"\r\n\r\n{value}\r\n",
                self.boundary
            );
            self.push(&part);
        }
    }

    /// Append one file part, its contents copied from `path`. The file
    /// handle is released before this returns.
    pub(crate) fn file_part(
        &mut self,
        key: &str,
        file_name: &str,
        path: &str,
    ) -> Result<(), RequestError> {
        let contents = std::fs::read(path).map_err(|e| RequestError::FileAttachment {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let part = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{key}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            self.boundary
        );
        self.push(&part);
        self.buf.extend_from_slice(&contents);
        self.push("\r\n");
        Ok(())
    }

    /// Write the closing boundary and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let closing = format!("--{}--\r\n", self.boundary);
        self.push(&closing);
        self.buf
    }

    fn push(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_from_string_round_trips() {
        let body = Body::from("hello world");
        assert_eq!(body.into_string().unwrap(), "hello world");
    }

    #[test]
    fn body_from_reader_drains() {
        let body = Body::from_reader(Cursor::new(vec![1u8, 2, 3]));
        assert_eq!(body.into_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn encode_form_sorts_keys() {
        let fields = HashMap::from([
            ("foo".to_string(), "bar".to_string()),
            ("baz".to_string(), "qux".to_string()),
        ]);
        assert_eq!(encode_form(&fields), "baz=qux&foo=bar");
    }

    #[test]
    fn encode_form_escapes_values() {
        let fields = HashMap::from([("key".to_string(), "two words&more".to_string())]);
        assert_eq!(encode_form(&fields), "key=two+words%26more");
    }

    #[test]
    fn encode_form_empty_map() {
        assert_eq!(encode_form(&HashMap::new()), "");
    }

    #[test]
    fn multipart_fields_use_the_boundary() {
        let mut form = MultipartForm::new();
        let boundary = form.boundary().to_string();
        form.fields(&HashMap::from([("name".to_string(), "value".to_string())]));
        let encoded = String::from_utf8(form.finish()).unwrap();

        assert_eq!(
            encoded,
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
            )
        );
    }

    #[test]
    fn multipart_boundaries_are_fresh() {
        assert_ne!(MultipartForm::new().boundary(), MultipartForm::new().boundary());
    }

    #[test]
    fn multipart_file_part_copies_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.txt");
        std::fs::write(&path, b"file bytes").unwrap();

        let mut form = MultipartForm::new();
        form.file_part("file", "upload.txt", path.to_str().unwrap()).unwrap();
        let encoded = String::from_utf8(form.finish()).unwrap();

        assert!(encoded.contains("name=\"file\"; filename=\"upload.txt\""));
        assert!(encoded.contains("Content-Type: application/octet-stream"));
        assert!(encoded.contains("file bytes"));
    }

    #[test]
    fn multipart_missing_file_is_an_error() {
        let mut form = MultipartForm::new();
        let err = form.file_part("file", "nope.txt", "/no/such/path").unwrap_err();
        assert!(matches!(err, RequestError::FileAttachment { .. }));
    }
}

//! `multipart/form-data` body encoding.
//!
//! Job submissions and applications upload a file next to plain text fields.
//! Parts are written in insertion order; names and file names have quotes and
//! line breaks percent-escaped the way browsers do.

use crate::domain::Attachment;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text { name: String, value: String },
    File { name: String, attachment: Attachment },
}

/// A multipart body under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multipart {
    boundary: String,
    parts: Vec<Part>,
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

impl Multipart {
    /// Creates an empty body with a time-derived boundary.
    #[must_use]
    pub fn new() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::with_boundary(format!("----jobboard{nanos:x}"))
    }

    /// Creates an empty body with a fixed boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a text part.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends every `(name, value)` pair as a text part.
    #[must_use]
    pub fn texts<N: Into<String>>(self, fields: impl IntoIterator<Item = (N, String)>) -> Self {
        fields
            .into_iter()
            .fold(self, |body, (name, value)| body.text(name, value))
    }

    /// Appends a file part.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.parts.push(Part::File {
            name: name.into(),
            attachment,
        });
        self
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` request header.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Number of parts added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serializes the body.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                Part::Text { name, value } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape(name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                Part::File { name, attachment } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape(name),
                            escape(&attachment.file_name),
                            attachment.content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(&attachment.bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

fn escape(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_file_parts_in_order() {
        let attachment = Attachment {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
        };
        let body = Multipart::with_boundary("XyZ")
            .file("resumeFile", attachment)
            .text("applicantName", "Ada")
            .encode();
        let expected = "--XyZ\r\n\
            Content-Disposition: form-data; name=\"resumeFile\"; filename=\"cv.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            %PDF\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"applicantName\"\r\n\r\n\
            Ada\r\n\
            --XyZ--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn escapes_quotes_in_names() {
        let body = Multipart::with_boundary("b").text("a\"b", "v").encode();
        assert!(String::from_utf8(body).unwrap().contains("name=\"a%22b\""));
    }
}

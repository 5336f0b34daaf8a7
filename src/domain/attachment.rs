//! Files staged for multipart upload.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file read from disk and ready to be sent as a multipart part.
///
/// Attachments travel from the worker thread to the plugin as JSON, so the
/// bytes are serialized as one standard base64 string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name reported in the `Content-Disposition` header.
    pub file_name: String,
    /// MIME type guessed from the extension.
    pub content_type: String,
    /// Raw file contents.
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment named after the last component of `path`.
    #[must_use]
    pub fn from_path(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

/// Guesses a MIME type from a file name's extension.
#[must_use]
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_common_types() {
        assert_eq!(content_type_for("resume.PDF"), "application/pdf");
        assert_eq!(content_type_for("logo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("Makefile"), "application/octet-stream");
    }

    #[test]
    fn names_after_last_component() {
        let att = Attachment::from_path(Path::new("/host/docs/cv.docx"), vec![1, 2]);
        assert_eq!(att.file_name, "cv.docx");
        assert!(att.content_type.contains("wordprocessingml"));
    }

    #[test]
    fn bytes_cross_ipc_as_base64_text() {
        let att = Attachment::from_path(Path::new("cv.pdf"), b"%PDF\x00\xff".to_vec());
        let json = serde_json::to_value(&att).unwrap();
        assert_eq!(json["bytes"], "JVBERgD/");

        let back: Attachment = serde_json::from_value(json).unwrap();
        assert_eq!(back, att);

        let legacy = r#"{"file_name":"a","content_type":"b","bytes":[1,2]}"#;
        assert!(serde_json::from_str::<Attachment>(legacy).is_err());
    }
}

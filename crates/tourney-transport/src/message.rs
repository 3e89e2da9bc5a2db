//! Request and response values exchanged with a [`Transport`](crate::Transport).
//!
//! These are deliberately plain data: interceptors mutate an
//! [`HttpRequest`] before it is sent, and inspect an [`HttpResponse`]
//! after it comes back, without knowing which transport is in use.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::TransportError;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// The HTTP methods the remote API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// A case-insensitive header map.
///
/// Names are stored lowercased, so `Content-Type` and `content-type`
/// address the same entry. One value per name is enough for this client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Removes `name`, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&name.to_ascii_lowercase())
    }

    /// Returns `true` if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    /// Iterates over `(name, value)` pairs with lowercased names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: AsRef<str>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name.as_ref(), value);
        }
        headers
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

/// A file attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, when known. The transport falls back to
    /// `application/octet-stream`.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload from in-memory bytes.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk. The MIME type is guessed from common image
    /// extensions, since images are what the API accepts.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            TransportError::InvalidRequest(format!("cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => Some("image/png"),
            Some("jpg") | Some("jpeg") => Some("image/jpeg"),
            Some("gif") => Some("image/gif"),
            Some("webp") => Some("image/webp"),
            Some("svg") => Some("image/svg+xml"),
            _ => None,
        };
        Ok(Self {
            file_name,
            content_type: content_type.map(str::to_string),
            bytes,
        })
    }
}

// File contents can be large; keep them out of debug logs.
impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The value of one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileUpload),
}

/// One named field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(name: impl Into<String>, file: FileUpload) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File(file),
        }
    }
}

/// A request body.
///
/// Multipart bodies are kept as parts rather than pre-encoded bytes: the
/// transport owns the boundary, and therefore the `Content-Type` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Vec<u8>),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Returns the named multipart field, if this is a multipart body.
    pub fn part(&self, name: &str) -> Option<&PartValue> {
        match self {
            Self::Multipart(parts) => {
                parts.iter().find(|p| p.name == name).map(|p| &p.value)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Response
// ---------------------------------------------------------------------------

/// An outgoing request. `path` is relative to the client's base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// A received response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert_eq!(
            headers.remove("Content-type").as_deref(),
            Some("application/json")
        );
        assert!(headers.is_empty());
    }

    #[test]
    fn test_headers_insert_replaces() {
        let mut headers: Headers = [("Accept", "text/html")].into_iter().collect();
        headers.insert("accept", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("application/json"));
    }

    #[test]
    fn test_body_part_lookup() {
        let body = RequestBody::Multipart(vec![
            FormPart::text("name", "Spring Cup"),
            FormPart::file("image", FileUpload::new("cup.png", vec![1, 2, 3])),
        ]);
        assert!(body.is_multipart());
        assert_eq!(
            body.part("name"),
            Some(&PartValue::Text("Spring Cup".into()))
        );
        assert!(matches!(body.part("image"), Some(PartValue::File(_))));
        assert!(body.part("rules").is_none());
        assert!(RequestBody::Json(b"{}".to_vec()).part("name").is_none());
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_file_upload_debug_hides_bytes() {
        let file = FileUpload::new("a.png", vec![0; 1024]).with_content_type("image/png");
        let debug = format!("{file:?}");
        assert!(debug.contains("len: 1024"));
        assert!(!debug.contains("[0, 0"));
    }

    #[tokio::test]
    async fn test_file_upload_from_path_guesses_mime() {
        let dir = std::env::temp_dir().join(format!("tourney-upload-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("banner.PNG");
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let file = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "banner.PNG");
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.bytes, b"png-bytes");

        let missing = FileUpload::from_path(dir.join("missing.png")).await;
        assert!(matches!(missing, Err(TransportError::InvalidRequest(_))));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}

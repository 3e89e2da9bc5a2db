//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::{
    join_url, FormPart, Headers, HttpRequest, HttpResponse, Method, PartValue, RequestBody,
    Transport, TransportError,
};

/// A `reqwest`-based [`Transport`] bound to one base address.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        reqwest::Url::parse(base_url).map_err(|e| {
            TransportError::InvalidRequest(format!("invalid base url {base_url}: {e}"))
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        tracing::debug!(base_url, ?timeout, "HTTP transport ready");
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Returns the base address requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            // reqwest adds `Content-Type: multipart/form-data; boundary=…`.
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::NoResponse(format!("reading body failed: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for FormPart { name, value } in parts {
        form = match value {
            PartValue::Text(text) => form.text(name, text),
            PartValue::File(file) => {
                let mime = file
                    .content_type
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&mime)
                    .map_err(|e| TransportError::InvalidRequest(format!("bad mime {mime}: {e}")))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else {
        TransportError::NoResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_base_url() {
        let err = HttpTransport::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let parts = vec![FormPart::file(
            "image",
            crate::FileUpload::new("a.png", vec![1]).with_content_type("not a mime"),
        )];
        assert!(build_form(parts).is_err());
    }
}

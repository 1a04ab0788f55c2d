//! Response body classification by `Content-Type`

use etims_domain::{EtimsError, ResponseBody};
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

use crate::errors::InfraError;

/// Status, content type and raw bytes of a received response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body strictly; JSON that does not parse is an error.
    pub fn parse(&self) -> Result<ResponseBody, EtimsError> {
        parse_body(self.content_type.as_deref(), &self.bytes)
    }

    /// Parse the body, falling back to its lossy text when it does not
    /// match the declared content type. Used for error responses.
    pub fn parse_lossy(&self) -> ResponseBody {
        self.parse().unwrap_or_else(|_| {
            let text = String::from_utf8_lossy(&self.bytes).into_owned();
            if text.trim().is_empty() {
                ResponseBody::Empty
            } else {
                ResponseBody::Text(text)
            }
        })
    }
}

/// Drain a response into a [`RawResponse`].
pub async fn read_body(response: Response) -> Result<RawResponse, EtimsError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await.map_err(|err| EtimsError::from(InfraError::from(err)))?;

    Ok(RawResponse { status, content_type, bytes: bytes.to_vec() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Json,
    Text,
    Binary,
    Unknown,
}

fn content_kind(content_type: Option<&str>) -> ContentKind {
    let Some(raw) = content_type else {
        return ContentKind::Unknown;
    };
    let mime = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

    match mime.as_str() {
        "application/json" => ContentKind::Json,
        m if m.ends_with("+json") => ContentKind::Json,
        "text/plain" | "text/html" | "application/xml" | "text/xml" => ContentKind::Text,
        "application/octet-stream" | "application/pdf" | "application/zip" => ContentKind::Binary,
        _ => ContentKind::Unknown,
    }
}

/// Classify a body by its declared content type.
///
/// Unrecognised content types produce [`ResponseBody::Empty`].
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Result<ResponseBody, EtimsError> {
    match content_kind(content_type) {
        ContentKind::Json => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(ResponseBody::Empty);
            }
            serde_json::from_slice(bytes)
                .map(ResponseBody::Json)
                .map_err(|err| InfraError::from(err).into())
        }
        ContentKind::Text => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            if text.trim().is_empty() {
                Ok(ResponseBody::Empty)
            } else {
                Ok(ResponseBody::Text(text))
            }
        }
        ContentKind::Binary => Ok(ResponseBody::Binary(bytes.to_vec())),
        ContentKind::Unknown => Ok(ResponseBody::Empty),
    }
}

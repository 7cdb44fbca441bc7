//! `data:` URLs: the text-safe form of binary payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use thiserror::Error;

/// MIME type used when the uploader reported none.
pub const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("missing 'data:' scheme")]
    MissingScheme,

    #[error("payload is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload")]
    Decode(#[from] base64::DecodeError),
}

/// A decoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode `bytes` as `data:<mime>;base64,<payload>`.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        FALLBACK_MIME
    } else {
        mime.trim()
    };
    format!("data:{mime};base64,{}", B64.encode(bytes))
}

/// Decode a base64 `data:` URL.
pub fn decode(url: &str) -> Result<Payload, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::NotBase64)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(DataUrlError::NotBase64)?;
    let bytes = B64.decode(payload.trim())?;
    Ok(Payload {
        mime: mime.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_mime() {
        assert_eq!(encode("text/plain", b"hi"), "data:text/plain;base64,aGk=");
    }

    #[test]
    fn missing_mime_falls_back() {
        assert!(encode("", b"x").starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn decodes_payload() {
        let payload = decode("data:image/png;base64,AAEC").unwrap();
        assert_eq!(payload.mime, "image/png");
        assert_eq!(payload.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_plain_text_urls() {
        assert!(matches!(decode("https://example.org"), Err(DataUrlError::MissingScheme)));
        assert!(matches!(decode("data:text/plain,hello"), Err(DataUrlError::NotBase64)));
        assert!(matches!(decode("data:text/plain;base64,@@"), Err(DataUrlError::Decode(_))));
    }
}

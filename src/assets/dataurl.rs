// src/assets/dataurl.rs

//! RFC 2397 `data:` URLs for inline file contents

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

/// Media type declared on every encoded asset
pub const MEDIA_TYPE: &str = "text/plain;charset=utf-8";

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    NotDataUrl,

    #[error("data URL has no ',' separator")]
    MissingSeparator,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encode bytes as a base64 `data:` URL
pub fn encode(data: &[u8]) -> String {
    format!("data:{};base64,{}", MEDIA_TYPE, BASE64.encode(data))
}

/// Decode a `data:` URL back to its bytes
///
/// Handles both base64 payloads and percent-encoded ones (`data:,hello%20world`).
pub fn decode(url: &str) -> Result<Vec<u8>, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or(DataUrlError::MissingSeparator)?;

    if header.ends_with(";base64") {
        Ok(BASE64.decode(payload)?)
    } else {
        Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        assert_eq!(
            encode(b"hello"),
            "data:text/plain;charset=utf-8;base64,aGVsbG8="
        );
        assert_eq!(encode(b""), "data:text/plain;charset=utf-8;base64,");
    }

    #[test]
    fn test_decode_binary_content() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_percent_encoded() {
        assert_eq!(decode("data:,hello%20world").unwrap(), b"hello world");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode("https://x/y"), Err(DataUrlError::NotDataUrl)));
        assert!(matches!(decode("data:text/plain"), Err(DataUrlError::MissingSeparator)));
        assert!(matches!(decode("data:;base64,@@@"), Err(DataUrlError::Base64(_))));
    }
}

//! Parsing and validation of `data:<mime>;base64,<payload>` image strings.

use crate::{Error, Result};
use base64::Engine as _;

/// Borrowed view into a validated data URI.
#[derive(Debug, PartialEq)]
pub struct DataUri<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

/// Split a data URI into MIME type and base64 payload.
///
/// Requires exactly one comma separating header from payload, a `data:` header
/// carrying a MIME type before `;`, and a payload that decodes as standard
/// base64.
pub fn parse(input: &str) -> Result<DataUri<'_>> {
    let (header, payload) = input
        .split_once(',')
        .ok_or_else(|| Error::InvalidImageEncoding("missing ',' separator".to_string()))?;

    if payload.contains(',') {
        return Err(Error::InvalidImageEncoding(
            "more than one ',' separator".to_string(),
        ));
    }

    let header = header.strip_prefix("data:").ok_or_else(|| {
        Error::InvalidImageEncoding("header does not start with 'data:'".to_string())
    })?;

    let mime_type = header.split(';').next().unwrap_or("");
    if mime_type.is_empty() || !mime_type.contains('/') {
        return Err(Error::InvalidImageEncoding(format!(
            "header carries no MIME type: 'data:{}'",
            header
        )));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::InvalidImageEncoding(format!("payload is not valid base64: {}", e)))?;

    Ok(DataUri { mime_type, payload })
}

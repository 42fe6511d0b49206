//! Turning registry bytes into text before XML parsing.
//!
//! The manager has written the file as UTF-8 and as UTF-16, and hand-edited
//! copies sometimes declare a legacy encoding such as `iso-8859-1`. The
//! encoding is taken from the byte-order mark, then from the first bytes of
//! a BOM-less UTF-16 declaration, then from the `encoding` pseudo-attribute,
//! and falls back to UTF-8.

use crate::error::DocumentError;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use std::borrow::Cow;

const DECLARATION_START: &[u8] = b"<?xml";
const DECLARATION_END: &[u8] = b"?>";
const ENCODING_ATTR: &[u8] = b"encoding";

/// Decode a whole document. Undecodable bytes are an error, never replaced.
pub fn decode_document(bytes: &[u8]) -> Result<Cow<'_, str>, DocumentError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (sniff_encoding(bytes)?, bytes),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(DocumentError::Malformed(encoding.name()))
}

fn sniff_encoding(bytes: &[u8]) -> Result<&'static Encoding, DocumentError> {
    if bytes.starts_with(b"<\0?\0") {
        return Ok(UTF_16LE);
    }
    if bytes.starts_with(b"\0<\0?") {
        return Ok(UTF_16BE);
    }
    let Some(label) = declared_encoding(bytes) else {
        return Ok(UTF_8);
    };
    match Encoding::for_label(label) {
        // The declaration was readable as ASCII, so the body cannot be UTF-16.
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok(UTF_8),
        Some(encoding) => Ok(encoding),
        None => Err(DocumentError::UnsupportedEncoding(
            String::from_utf8_lossy(label).into_owned(),
        )),
    }
}

/// Value of `encoding="..."` in a leading `<?xml ... ?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let rest = bytes.strip_prefix(DECLARATION_START)?;
    let end = rest
        .windows(DECLARATION_END.len())
        .position(|window| window == DECLARATION_END)?;
    let declaration = &rest[..end];
    let at = declaration
        .windows(ENCODING_ATTR.len())
        .position(|window| window == ENCODING_ATTR)?;
    let value = declaration[at + ENCODING_ATTR.len()..].trim_ascii_start();
    let value = value.strip_prefix(b"=")?.trim_ascii_start();
    let (&quote, value) = value.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let close = value.iter().position(|&byte| byte == quote)?;
    Some(&value[..close])
}

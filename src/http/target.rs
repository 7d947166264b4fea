//! Request target normalization
//!
//! Turns the raw request path into the canonical string used for routing
//! and path resolution: `+` becomes a space, `%XY` escapes are decoded and
//! the file-extension suffix is lower-cased.

use thiserror::Error;

/// The raw target could not be decoded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedTarget {
    #[error("malformed percent-escape at offset {offset}")]
    BadEscape { offset: usize },

    #[error("decoded target is not valid UTF-8")]
    NotUtf8,
}

/// Normalize a raw request path
pub fn normalize_target(raw: &str) -> Result<String, MalformedTarget> {
    let decoded = percent_decode(raw)?;
    Ok(lowercase_extension(&decoded))
}

/// Decode `+` and `%XY` escapes
///
/// An escape produced `+` is kept literally; only `+` present in the raw
/// input turns into a space.
fn percent_decode(raw: &str) -> Result<String, MalformedTarget> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err(MalformedTarget::BadEscape { offset: i });
                };
                out.push((hi << 4) | lo);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| MalformedTarget::NotUtf8)
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Lower-case everything from the last `.` of the final path segment
fn lowercase_extension(path: &str) -> String {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => {
            let split = segment_start + dot;
            let mut out = String::with_capacity(path.len());
            out.push_str(&path[..split]);
            out.push_str(&path[split..].to_lowercase());
            out
        }
        None => path.to_string(),
    }
}

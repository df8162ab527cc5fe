use crate::errors::ParseError;
use encoding_rs::{UTF_16LE, WINDOWS_1252};

#[inline]
pub fn le_i32(d: &[u8]) -> i32 {
    i32::from_le_bytes([d[0], d[1], d[2], d[3]])
}

#[inline]
pub fn le_f32(d: &[u8]) -> f32 {
    f32::from_le_bytes([d[0], d[1], d[2], d[3]])
}

#[inline]
pub fn le_u64(d: &[u8]) -> u64 {
    u64::from_le_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]])
}

/// Decodes a UTF-8 string whose on disk form carries a trailing null, which
/// is dropped from the returned slice.
pub fn decode_str(input: &[u8]) -> Result<&str, ParseError> {
    if input.is_empty() {
        Err(ParseError::ZeroSize)
    } else {
        Ok(::std::str::from_utf8(&input[..input.len() - 1])?)
    }
}

/// Decodes UTF-16LE bytes, dropping the two byte null terminator
pub fn decode_utf16(input: &[u8]) -> Result<String, ParseError> {
    if input.len() < 2 {
        Err(ParseError::ZeroSize)
    } else {
        let (s, _) = UTF_16LE.decode_without_bom_handling(&input[..input.len() - 2]);
        Ok(String::from(s))
    }
}

/// Decodes Windows-1252 bytes, dropping the null terminator
pub fn decode_windows1252(input: &[u8]) -> Result<String, ParseError> {
    if input.is_empty() {
        Err(ParseError::ZeroSize)
    } else {
        let (s, _) = WINDOWS_1252.decode_without_bom_handling(&input[..input.len() - 1]);
        Ok(String::from(s))
    }
}

//! Lowercase hexadecimal codec
//!
//! Object IDs travel as raw bytes inside trees and as hex text everywhere else
//! (commit bodies, reference files, object paths). Only the lowercase alphabet
//! `0-9a-f` is accepted when decoding.

use crate::errors::ParseError;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len() * 2);
    for byte in data {
        result.push(DIGITS[(byte >> 4) as usize] as char);
        result.push(DIGITS[(byte & 0x0f) as usize] as char);
    }
    result
}

/// Decode a string of hex digit pairs into bytes.
///
/// Fails on odd-length input, or on the first pair containing a character
/// outside the alphabet; the error carries the index of that pair's first
/// character.
pub fn decode(input: &str) -> Result<Vec<u8>, ParseError> {
    let input = input.as_bytes();
    if input.len() % 2 != 0 {
        return Err(ParseError::OddLength {
            length: input.len(),
        });
    }

    input
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| match (digit_value(pair[0]), digit_value(pair[1])) {
            (Some(high), Some(low)) => Ok((high << 4) | low),
            _ => Err(ParseError::InvalidHexByte { position: 2 * i }),
        })
        .collect()
}

fn digit_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

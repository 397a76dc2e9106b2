//! Bit/byte codec: pure conversions between bit strings, hex strings,
//! UTF-8 text, and fixed 16-byte blocks.
//!
//! All conversions are total, best-effort with implicit zero-fill, except
//! hex decoding: an odd number of hex digits cannot be paired and is an
//! [`EngineError::InvalidEncoding`].

use aes_core::{Block, BLOCK_SIZE};
use cipherlab_modes::pkcs7_first_block;

use crate::error::EngineError;

/// Decodes a bit string into a block: non-`0/1` characters are stripped,
/// the first 128 bits are taken, short input is right-padded with zeros.
pub fn bits_to_block(bits: &str) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    for (i, bit) in bits
        .chars()
        .filter(|c| *c == '0' || *c == '1')
        .take(BLOCK_SIZE * 8)
        .enumerate()
    {
        if bit == '1' {
            block[i / 8] |= 1 << (7 - i % 8);
        }
    }
    block
}

/// Decodes a bit string into bytes of arbitrary length (whole bytes only;
/// a trailing partial byte is right-padded with zero bits).
pub fn bits_to_bytes(bits: &str) -> Vec<u8> {
    let filtered: Vec<char> = bits.chars().filter(|c| *c == '0' || *c == '1').collect();
    filtered
        .chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, c)| acc | (u8::from(*c == '1') << (7 - i)))
        })
        .collect()
}

/// Renders bytes as a bit string, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> String {
    let mut bits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push(if byte >> shift & 1 == 1 { '1' } else { '0' });
        }
    }
    bits
}

/// Renders a block as a 128-character bit string.
pub fn block_to_bits(block: &Block) -> String {
    bytes_to_bits(block)
}

/// Decodes a hex string into bytes: non-hex characters are stripped first;
/// an odd count of remaining digits is an error.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, EngineError> {
    let filtered: String = hex_str.chars().filter(char::is_ascii_hexdigit).collect();
    if filtered.len() % 2 != 0 {
        return Err(EngineError::InvalidEncoding(format!(
            "odd number of hex digits ({})",
            filtered.len()
        )));
    }
    hex::decode(&filtered).map_err(|e| EngineError::InvalidEncoding(e.to_string()))
}

/// Decodes a hex string into a block, zero-padding on the right; input
/// longer than 16 bytes is truncated.
pub fn hex_to_block(hex_str: &str) -> Result<Block, EngineError> {
    let bytes = hex_to_bytes(hex_str)?;
    let mut block = [0u8; BLOCK_SIZE];
    let take = bytes.len().min(BLOCK_SIZE);
    block[..take].copy_from_slice(&bytes[..take]);
    Ok(block)
}

/// Takes the first 16 bytes of the UTF-8 encoding, zero-padded.
pub fn text_to_block(text: &str) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    let bytes = text.as_bytes();
    let take = bytes.len().min(BLOCK_SIZE);
    block[..take].copy_from_slice(&bytes[..take]);
    block
}

/// First 16-byte block of the PKCS#7-padded UTF-8 stream.
pub fn text_pkcs7_to_block(text: &str) -> Block {
    pkcs7_first_block(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_strip_pad_and_truncate() {
        // Whitespace and separators are stripped.
        let block = bits_to_block("1000 0001_x");
        assert_eq!(block[0], 0x81);
        assert_eq!(&block[1..], &[0u8; 15]);

        // 129 ones: only the first 128 are taken.
        let all = "1".repeat(129);
        assert_eq!(bits_to_block(&all), [0xffu8; 16]);
    }

    #[test]
    fn bit_round_trip() {
        let block = bits_to_block("10100101");
        assert_eq!(&block_to_bits(&block)[..8], "10100101");
        assert_eq!(bits_to_bytes("10100101 11110000"), vec![0xa5, 0xf0]);
        assert_eq!(bytes_to_bits(&[0xa5]), "10100101");
    }

    #[test]
    fn hex_strips_noise_and_pads() {
        let block = hex_to_block("2b 7e:15-16").unwrap();
        assert_eq!(&block[..4], &[0x2b, 0x7e, 0x15, 0x16]);
        assert_eq!(&block[4..], &[0u8; 12]);
    }

    #[test]
    fn odd_hex_is_invalid() {
        assert!(matches!(
            hex_to_block("abc"),
            Err(EngineError::InvalidEncoding(_))
        ));
        // Stripping can make a string odd.
        assert!(hex_to_bytes("0x1").is_err());
    }

    #[test]
    fn long_hex_is_truncated_to_a_block() {
        let block = hex_to_block(&"ff".repeat(20)).unwrap();
        assert_eq!(block, [0xffu8; 16]);
    }

    #[test]
    fn text_takes_first_sixteen_utf8_bytes() {
        assert_eq!(&text_to_block("hi")[..2], b"hi");
        assert_eq!(text_to_block("hi")[2], 0);
        let long = "this is longer than sixteen bytes";
        assert_eq!(&text_to_block(long)[..], &long.as_bytes()[..16]);
    }

    #[test]
    fn pkcs7_text_block_pads_to_the_boundary() {
        let block = text_pkcs7_to_block("abc");
        assert_eq!(&block[..3], b"abc");
        assert!(block[3..].iter().all(|&b| b == 13));
    }
}

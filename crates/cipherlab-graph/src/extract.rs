//! Key/state extractor: normalizes heterogeneous node payloads into the
//! canonical forms the engines consume.
//!
//! Block extraction follows the codec's lenient zero-fill rules; the
//! validating extractors (`iv_block`, `des_key_bytes`) reject material of
//! the wrong exact size instead, per the cipher's key rules.

use aes_core::{Block, BLOCK_SIZE};

use crate::codec::{bits_to_block, bits_to_bytes, hex_to_block, hex_to_bytes, text_to_block};
use crate::error::EngineError;
use crate::model::Payload;
use cipherlab_modes::{pkcs7_first_block, ModeError};

/// Canonical 16-byte state block for a payload.
pub fn state_block(payload: &Payload) -> Result<Block, EngineError> {
    match payload {
        Payload::Bits(bits) => Ok(bits_to_block(bits)),
        Payload::Hex(hex_str) => hex_to_block(hex_str),
        Payload::Text(text) => Ok(text_to_block(text)),
        Payload::TextPkcs7(text) => Ok(pkcs7_first_block(text)),
        Payload::Binary(bytes) => {
            let mut block = [0u8; BLOCK_SIZE];
            let take = bytes.len().min(BLOCK_SIZE);
            block[..take].copy_from_slice(&bytes[..take]);
            Ok(block)
        }
        Payload::Empty => Ok([0u8; BLOCK_SIZE]),
    }
}

/// Canonical 16-byte key block; same normalization as [`state_block`].
pub fn key_block(payload: &Payload) -> Result<Block, EngineError> {
    state_block(payload)
}

/// Arbitrary-length byte material (keys, IVs, nonces, file buffers); no
/// padding or truncation.
pub fn material_bytes(payload: &Payload) -> Result<Vec<u8>, EngineError> {
    match payload {
        Payload::Bits(bits) => Ok(bits_to_bytes(bits)),
        Payload::Hex(hex_str) => hex_to_bytes(hex_str),
        Payload::Text(text) => Ok(text.as_bytes().to_vec()),
        Payload::TextPkcs7(text) => Ok(pkcs7_first_block(text).to_vec()),
        Payload::Binary(bytes) => Ok(bytes.clone()),
        Payload::Empty => Ok(Vec::new()),
    }
}

/// A CBC initialization vector: must decode to exactly 128 bits.
pub fn iv_block(payload: &Payload) -> Result<Block, EngineError> {
    let bytes = material_bytes(payload)?;
    if bytes.len() != BLOCK_SIZE {
        return Err(
            ModeError::InvalidKeyMaterial(format!("IV must be 128 bits, got {}", bytes.len() * 8))
                .into(),
        );
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(&bytes);
    Ok(block)
}

/// A DES key: must decode to exactly 8 bytes.
pub fn des_key_bytes(payload: &Payload) -> Result<[u8; 8], EngineError> {
    let bytes = material_bytes(payload)?;
    let key: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
        ModeError::InvalidKeyMaterial(format!("DES key must be 8 bytes, got {}", bytes.len()))
    })?;
    Ok(key)
}

/// The CTR start value: decimal for text payloads, base-16 for hex,
/// base-2 for bit strings.
pub fn counter_value(payload: &Payload) -> Result<u64, EngineError> {
    let parsed = match payload {
        Payload::Text(text) => text.trim().parse::<u64>(),
        Payload::Hex(hex_str) => {
            let filtered: String = hex_str.chars().filter(char::is_ascii_hexdigit).collect();
            u64::from_str_radix(&filtered, 16)
        }
        Payload::Bits(bits) => {
            let filtered: String = bits.chars().filter(|c| *c == '0' || *c == '1').collect();
            u64::from_str_radix(&filtered, 2)
        }
        Payload::Empty => return Ok(0),
        other => {
            return Err(EngineError::InvalidEncoding(format!(
                "counter payload must be text, hex, or bits, got {other:?}"
            )))
        }
    };
    parsed.map_err(|e| EngineError::InvalidEncoding(format!("counter value: {e}")))
}

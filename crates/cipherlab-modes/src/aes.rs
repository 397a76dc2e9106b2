//! AES-128 as a [`BlockCipher`].

use aes_core::{
    block_from_slice, decrypt_block, encrypt_block, expand_key, Aes128Key, RoundKeys, BLOCK_SIZE,
};

use crate::cipher::BlockCipher;
use crate::error::{ModeError, Result};

/// AES-128 cipher value with pre-expanded round keys.
#[derive(Clone, Debug)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Aes128 {
    /// Builds the cipher from exactly 16 key bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = Aes128Key::from_slice(key).map_err(|_| {
            ModeError::InvalidKeyMaterial(format!(
                "AES-128 key must be 16 bytes, got {}",
                key.len()
            ))
        })?;
        Ok(Self {
            round_keys: expand_key(&key),
        })
    }
}

impl BlockCipher for Aes128 {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>> {
        let block = block_from_slice(block)?;
        Ok(encrypt_block(&block, &self.round_keys).to_vec())
    }

    fn decrypt_block(&self, block: &[u8]) -> Result<Vec<u8>> {
        let block = block_from_slice(block)?;
        Ok(decrypt_block(&block, &self.round_keys).to_vec())
    }
}

//! Repeating-key XOR demonstration cipher.
//!
//! Not a cipher in any cryptographic sense; it exists so the chaining modes
//! can be demonstrated without the cost of a real block transform.

use crate::cipher::BlockCipher;
use crate::error::{ModeError, Result};

/// XOR "cipher" with a repeating key and a configurable block size.
#[derive(Clone, Debug)]
pub struct XorCipher {
    key: Vec<u8>,
    block_size: usize,
}

impl XorCipher {
    /// Builds the cipher; the key must be non-empty and the block size
    /// positive.
    pub fn new(key: &[u8], block_size: usize) -> Result<Self> {
        if key.is_empty() {
            return Err(ModeError::InvalidKeyMaterial(
                "XOR key must not be empty".into(),
            ));
        }
        if block_size == 0 {
            return Err(ModeError::InvalidKeyMaterial(
                "XOR block size must be positive".into(),
            ));
        }
        Ok(Self {
            key: key.to_vec(),
            block_size,
        })
    }

    fn apply(&self, block: &[u8]) -> Result<Vec<u8>> {
        if block.len() != self.block_size {
            return Err(ModeError::InvalidBlockLength {
                expected: self.block_size,
                actual: block.len(),
            });
        }
        Ok(block
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect())
    }
}

impl BlockCipher for XorCipher {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>> {
        self.apply(block)
    }

    // XOR is its own inverse.
    fn decrypt_block(&self, block: &[u8]) -> Result<Vec<u8>> {
        self.apply(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(
            XorCipher::new(b"", 16),
            Err(ModeError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn encrypt_is_its_own_inverse() {
        let cipher = XorCipher::new(b"key", 8).unwrap();
        let block = b"8 bytes!";
        let ct = cipher.encrypt_block(block).unwrap();
        assert_ne!(ct, block.to_vec());
        assert_eq!(cipher.decrypt_block(&ct).unwrap(), block.to_vec());
    }

    #[test]
    fn key_repeats_across_the_block() {
        let cipher = XorCipher::new(&[0x01], 4).unwrap();
        assert_eq!(
            cipher.encrypt_block(&[0x10, 0x20, 0x30, 0x40]).unwrap(),
            vec![0x11, 0x21, 0x31, 0x41]
        );
    }
}

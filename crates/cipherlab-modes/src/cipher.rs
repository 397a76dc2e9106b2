//! Generic block cipher seam.

use crate::error::Result;

/// A keyed block cipher operating on fixed-size blocks.
///
/// Key material is owned by the implementing value and validated when it is
/// constructed; the mode compositors only ever see whole blocks.
pub trait BlockCipher {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encrypts exactly one block.
    fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>>;

    /// Decrypts exactly one block.
    fn decrypt_block(&self, block: &[u8]) -> Result<Vec<u8>>;
}

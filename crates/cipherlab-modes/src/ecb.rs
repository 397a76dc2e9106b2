//! ECB mode: every block encrypted independently.

use crate::cipher::BlockCipher;
use crate::error::{ModeError, Result};
use crate::padding::{pkcs7_pad, pkcs7_unpad};

/// Encrypts `plaintext` under ECB with PKCS#7 padding.
pub fn ecb_encrypt<C: BlockCipher + ?Sized>(cipher: &C, plaintext: &[u8]) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    let padded = pkcs7_pad(plaintext, block_size);
    let mut ciphertext = Vec::with_capacity(padded.len());
    for chunk in padded.chunks(block_size) {
        ciphertext.extend(cipher.encrypt_block(chunk)?);
    }
    Ok(ciphertext)
}

/// Decrypts ECB ciphertext and strips the PKCS#7 padding.
pub fn ecb_decrypt<C: BlockCipher + ?Sized>(cipher: &C, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    if ciphertext.len() % block_size != 0 {
        return Err(ModeError::InvalidBlockLength {
            expected: block_size,
            actual: ciphertext.len(),
        });
    }
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for chunk in ciphertext.chunks(block_size) {
        plaintext.extend(cipher.decrypt_block(chunk)?);
    }
    Ok(pkcs7_unpad(&plaintext, block_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::Aes128;
    use crate::xor::XorCipher;

    #[test]
    fn aes_round_trip() {
        let cipher = Aes128::new(b"sixteen byte key").unwrap();
        for len in [0usize, 1, 15, 16, 17, 47] {
            let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let ct = ecb_encrypt(&cipher, &plaintext).unwrap();
            assert_eq!(ct.len() % 16, 0);
            assert!(ct.len() > plaintext.len());
            assert_eq!(ecb_decrypt(&cipher, &ct).unwrap(), plaintext);
        }
    }

    #[test]
    fn identical_blocks_leak_under_ecb() {
        // The defining ECB weakness, kept as a regression check on the
        // independence of blocks.
        let cipher = Aes128::new(&[7u8; 16]).unwrap();
        let plaintext = [0xabu8; 32];
        let ct = ecb_encrypt(&cipher, &plaintext).unwrap();
        assert_eq!(ct[..16], ct[16..32]);
    }

    #[test]
    fn ragged_ciphertext_is_rejected() {
        let cipher = XorCipher::new(b"k", 8).unwrap();
        assert!(matches!(
            ecb_decrypt(&cipher, &[0u8; 12]),
            Err(ModeError::InvalidBlockLength { .. })
        ));
    }
}

//! CBC mode: each plaintext block XORed with the previous ciphertext block
//! (the IV before the first) prior to encryption.

use crate::cipher::BlockCipher;
use crate::error::{ModeError, Result};
use crate::padding::{pkcs7_pad, pkcs7_unpad};

fn check_iv<C: BlockCipher + ?Sized>(cipher: &C, iv: &[u8]) -> Result<()> {
    if iv.len() != cipher.block_size() {
        return Err(ModeError::InvalidKeyMaterial(format!(
            "CBC IV must be {} bytes, got {}",
            cipher.block_size(),
            iv.len()
        )));
    }
    Ok(())
}

fn xor_into(chunk: &[u8], prev: &[u8]) -> Vec<u8> {
    chunk.iter().zip(prev.iter()).map(|(c, p)| c ^ p).collect()
}

/// Encrypts `plaintext` under CBC with full PKCS#7 padding. This is the
/// reversible pairing with [`cbc_decrypt`].
pub fn cbc_encrypt<C: BlockCipher + ?Sized>(cipher: &C, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let block_size = cipher.block_size();
    let padded = pkcs7_pad(plaintext, block_size);

    let mut ciphertext = Vec::with_capacity(padded.len());
    let mut previous = iv.to_vec();
    for chunk in padded.chunks(block_size) {
        let encrypted = cipher.encrypt_block(&xor_into(chunk, &previous))?;
        ciphertext.extend_from_slice(&encrypted);
        previous = encrypted;
    }
    Ok(ciphertext)
}

/// Decrypts CBC ciphertext and strips the PKCS#7 padding.
pub fn cbc_decrypt<C: BlockCipher + ?Sized>(cipher: &C, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let block_size = cipher.block_size();
    if ciphertext.len() % block_size != 0 {
        return Err(ModeError::InvalidBlockLength {
            expected: block_size,
            actual: ciphertext.len(),
        });
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut previous = iv;
    for chunk in ciphertext.chunks(block_size) {
        let decrypted = cipher.decrypt_block(chunk)?;
        plaintext.extend(xor_into(&decrypted, previous));
        previous = chunk;
    }
    Ok(pkcs7_unpad(&plaintext, block_size))
}

/// CBC over a buffer whose length must not change, e.g. a fixed-size pixel
/// buffer: zero-fill to the block boundary, encrypt, truncate back.
///
/// The trailing partial block cannot be recovered bit-exactly from the
/// truncated ciphertext; callers that need a genuine round trip use
/// [`cbc_encrypt`]. Preserved as observed application behavior.
pub fn cbc_encrypt_keep_len<C: BlockCipher + ?Sized>(
    cipher: &C,
    iv: &[u8],
    buffer: &[u8],
) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let block_size = cipher.block_size();
    let mut padded = buffer.to_vec();
    padded.resize(buffer.len().div_ceil(block_size) * block_size, 0);

    let mut out = Vec::with_capacity(padded.len());
    let mut previous = iv.to_vec();
    for chunk in padded.chunks(block_size) {
        let encrypted = cipher.encrypt_block(&xor_into(chunk, &previous))?;
        out.extend_from_slice(&encrypted);
        previous = encrypted;
    }
    out.truncate(buffer.len());
    Ok(out)
}

/// Length-preserving mirror of [`cbc_encrypt_keep_len`].
pub fn cbc_decrypt_keep_len<C: BlockCipher + ?Sized>(
    cipher: &C,
    iv: &[u8],
    buffer: &[u8],
) -> Result<Vec<u8>> {
    check_iv(cipher, iv)?;
    let block_size = cipher.block_size();
    let mut padded = buffer.to_vec();
    padded.resize(buffer.len().div_ceil(block_size) * block_size, 0);

    let mut out = Vec::with_capacity(padded.len());
    let mut previous = iv.to_vec();
    for chunk in padded.chunks(block_size) {
        let decrypted = cipher.decrypt_block(chunk)?;
        out.extend(xor_into(&decrypted, &previous));
        previous = chunk.to_vec();
    }
    out.truncate(buffer.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::Aes128;

    fn cipher() -> Aes128 {
        Aes128::new(b"sixteen byte key").unwrap()
    }

    #[test]
    fn round_trip_including_ragged_lengths() {
        let iv = [0x24u8; 16];
        for len in [0usize, 1, 15, 16, 17, 100] {
            let plaintext: Vec<u8> = (0..len).map(|i| (i * 3) as u8).collect();
            let ct = cbc_encrypt(&cipher(), &iv, &plaintext).unwrap();
            assert_eq!(cbc_decrypt(&cipher(), &iv, &ct).unwrap(), plaintext);
        }
    }

    #[test]
    fn chaining_hides_repeated_blocks() {
        let iv = [0u8; 16];
        let plaintext = [0xabu8; 32];
        let ct = cbc_encrypt(&cipher(), &iv, &plaintext).unwrap();
        assert_ne!(ct[..16], ct[16..32]);
    }

    #[test]
    fn iv_length_is_validated() {
        assert!(matches!(
            cbc_encrypt(&cipher(), &[0u8; 8], b"data"),
            Err(ModeError::InvalidKeyMaterial(_))
        ));
        assert!(cbc_decrypt(&cipher(), &[0u8; 12], &[0u8; 16]).is_err());
    }

    #[test]
    fn keep_len_preserves_exact_length() {
        let iv = [9u8; 16];
        for len in [1usize, 16, 33, 1024, 777] {
            let buffer: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let out = cbc_encrypt_keep_len(&cipher(), &iv, &buffer).unwrap();
            assert_eq!(out.len(), buffer.len());
        }
    }

    #[test]
    fn keep_len_round_trips_whole_blocks() {
        // With no truncated tail the compromise variant is still exact.
        let iv = [1u8; 16];
        let buffer: Vec<u8> = (0..64).map(|i| (i * 5) as u8).collect();
        let ct = cbc_encrypt_keep_len(&cipher(), &iv, &buffer).unwrap();
        assert_eq!(cbc_decrypt_keep_len(&cipher(), &iv, &ct).unwrap(), buffer);
    }
}

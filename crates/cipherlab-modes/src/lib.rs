//! Block ciphers and chaining-mode compositors.
//!
//! The [`BlockCipher`] trait is the seam between a keyed per-block cipher
//! and the chaining disciplines built on top of it:
//!
//! - [`ecb_encrypt`]/[`ecb_decrypt`] — independent blocks, PKCS#7 padded.
//! - [`cbc_encrypt`]/[`cbc_decrypt`] — chained XOR with the previous
//!   ciphertext block (IV first), plus length-preserving variants for
//!   fixed-size buffers.
//! - [`ctr_transform`] — nonce‖counter keystream XOR; its own inverse.
//!
//! Cipher values own their key material and validate it at construction;
//! per-call block lengths are checked on every invocation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod aes;
mod cbc;
mod cipher;
mod ctr;
mod des;
mod ecb;
mod error;
mod padding;
mod xor;

pub use crate::aes::Aes128;
pub use crate::cbc::{cbc_decrypt, cbc_decrypt_keep_len, cbc_encrypt, cbc_encrypt_keep_len};
pub use crate::cipher::BlockCipher;
pub use crate::ctr::{counter_block, ctr_transform, CounterOrder, CtrLayout};
pub use crate::des::Des;
pub use crate::ecb::{ecb_decrypt, ecb_encrypt};
pub use crate::error::{ModeError, Result};
pub use crate::padding::{pkcs7_first_block, pkcs7_pad, pkcs7_unpad};
pub use crate::xor::XorCipher;

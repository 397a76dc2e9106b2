//! CTR mode: the cipher encrypts nonce‖counter blocks into a keystream
//! which is XORed with the data. Applying the transform twice with the same
//! parameters restores the input.

use crate::cipher::BlockCipher;
use crate::error::Result;

/// Serialization order of the 64-bit counter inside the counter block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterOrder {
    /// Most significant byte first (the conventional layout).
    #[default]
    BigEndian,
    /// Least significant byte first.
    LittleEndian,
}

/// Counter-block layout configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CtrLayout {
    /// Byte order of the counter field.
    pub counter_order: CounterOrder,
}

/// Builds one counter block: the nonce occupies the leading
/// `block_size - 8` bytes (truncated if longer, zero-filled if shorter) and
/// the counter the trailing 8 bytes in the configured order. A block size
/// of 8 leaves no nonce bytes and the counter fills the block.
pub fn counter_block(nonce: &[u8], counter: u64, layout: CtrLayout, block_size: usize) -> Vec<u8> {
    let mut block = vec![0u8; block_size];
    let nonce_len = block_size.saturating_sub(8).min(nonce.len());
    block[..nonce_len].copy_from_slice(&nonce[..nonce_len]);

    let counter_bytes = match layout.counter_order {
        CounterOrder::BigEndian => counter.to_be_bytes(),
        CounterOrder::LittleEndian => counter.to_le_bytes(),
    };
    let field = block_size.min(8);
    let start = block_size - field;
    match layout.counter_order {
        // Keep the low-order end of the counter when the field is narrow.
        CounterOrder::BigEndian => block[start..].copy_from_slice(&counter_bytes[8 - field..]),
        CounterOrder::LittleEndian => block[start..].copy_from_slice(&counter_bytes[..field]),
    }
    block
}

/// Applies the CTR keystream to `data`, advancing the counter once per
/// block. No padding: the output length equals the input length, and the
/// transform is its own inverse.
pub fn ctr_transform<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &[u8],
    counter: u64,
    layout: CtrLayout,
    data: &[u8],
) -> Result<Vec<u8>> {
    let block_size = cipher.block_size();
    let mut out = Vec::with_capacity(data.len());
    let mut current = counter;

    for chunk in data.chunks(block_size) {
        let keystream = cipher.encrypt_block(&counter_block(nonce, current, layout, block_size))?;
        out.extend(chunk.iter().zip(keystream.iter()).map(|(d, k)| d ^ k));
        current = current.wrapping_add(1);
    }
    Ok(out)
}

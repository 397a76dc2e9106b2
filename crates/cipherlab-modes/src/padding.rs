//! PKCS#7 padding.

/// Pads `data` to a multiple of `block_size` by appending `n` bytes of
/// value `n`, where `n = block_size - len % block_size`. Already-aligned
/// input gains a full block of padding.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad = block_size - data.len() % block_size;
    let mut padded = data.to_vec();
    padded.extend(std::iter::repeat(pad as u8).take(pad));
    padded
}

/// Strips PKCS#7 padding leniently: the final byte is read as the pad
/// length and truncated away when it is in `1..=block_size` and does not
/// exceed the buffer; otherwise the input is returned unchanged.
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Vec<u8> {
    match data.last() {
        Some(&pad) if (1..=block_size).contains(&(pad as usize)) && pad as usize <= data.len() => {
            data[..data.len() - pad as usize].to_vec()
        }
        _ => data.to_vec(),
    }
}

/// Returns the first 16-byte block of the PKCS#7-padded UTF-8 encoding of
/// `text`. Used when a passphrase stands in for block material in trace
/// displays.
pub fn pkcs7_first_block(text: &str) -> [u8; 16] {
    let padded = pkcs7_pad(text.as_bytes(), 16);
    let mut block = [0u8; 16];
    block.copy_from_slice(&padded[..16]);
    block
}

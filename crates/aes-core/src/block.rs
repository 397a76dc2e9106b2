//! Block representation helpers.

use crate::error::AesError;

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// XORs two blocks into a new block.
#[inline]
pub fn xor_blocks(lhs: &Block, rhs: &Block) -> Block {
    let mut out = *lhs;
    for (o, r) in out.iter_mut().zip(rhs.iter()) {
        *o ^= *r;
    }
    out
}

/// Converts a slice into a block, rejecting anything but exactly 16 bytes.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block, AesError> {
    if bytes.len() != BLOCK_SIZE {
        return Err(AesError::InvalidBlockLength {
            expected: BLOCK_SIZE,
            actual: bytes.len(),
        });
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(bytes);
    Ok(block)
}

/// Reinterprets a block as the 4x4 state grid, column-major: byte `k` sits
/// at row `k % 4`, column `k / 4`.
pub fn block_to_grid(block: &Block) -> [[u8; 4]; 4] {
    let mut grid = [[0u8; 4]; 4];
    for (k, &byte) in block.iter().enumerate() {
        grid[k % 4][k / 4] = byte;
    }
    grid
}

/// Flattens a 4x4 state grid back into a block. Inverse of [`block_to_grid`].
pub fn grid_to_block(grid: &[[u8; 4]; 4]) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    for (k, byte) in block.iter_mut().enumerate() {
        *byte = grid[k % 4][k / 4];
    }
    block
}

//! Trace-capable AES-128 reference engine.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - Key schedule for AES-128, exposed both as plain round keys and as a
//!   per-round derivation record (`RotWord`/`SubWord`/`Rcon` detail).
//! - The four round primitives as pure value-to-value functions.
//! - Single-block encryption and decryption.
//! - A stage-by-stage trace of every round for inspection.
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; it should not be treated as side-channel
//! hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod round;
mod sbox;
mod schedule;
mod trace;

pub use crate::block::{
    block_from_slice, block_to_grid, grid_to_block, xor_blocks, Block, BLOCK_SIZE,
};
pub use crate::cipher::{decrypt_block, encrypt_block};
pub use crate::error::AesError;
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes, xtime,
};
pub use crate::sbox::{inv_sbox, sbox};
pub use crate::schedule::{
    derive_round_key, expand_key, rcon, Aes128Key, KeyScheduleStep, RoundKeys, Word,
};
pub use crate::trace::{trace, trace_round, RoundTrace};

//! Stage-by-stage round traces.
//!
//! The trace regroups the cipher the way it is usually displayed: display
//! round `r` (1..=10) starts with `AddRoundKey(K(r-1))` and runs through
//! SubBytes and ShiftRows, followed by MixColumns for rounds 1..=9 or the
//! final `AddRoundKey(K10)` for round 10. Concatenating the stages of all
//! ten display rounds reproduces [`crate::encrypt_block`] exactly; the
//! trace is an inspection view, not an alternate algorithm.

use crate::block::Block;
use crate::round::{add_round_key, mix_columns, shift_rows, sub_bytes};
use crate::schedule::{derive_round_key, KeyScheduleStep, RoundKeys};

/// Every intermediate state of one display round, plus the derivation of
/// the round key applied at the start of the next display round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundTrace {
    /// Display round, 1..=10.
    pub round: usize,
    /// State entering the round.
    pub input: Block,
    /// After `AddRoundKey(K(round - 1))`.
    pub after_add_round_key: Block,
    /// After SubBytes.
    pub after_sub_bytes: Block,
    /// After ShiftRows.
    pub after_shift_rows: Block,
    /// After MixColumns; `None` in display round 10, which skips it.
    pub after_mix_columns: Option<Block>,
    /// State leaving the round. For round 10 this is the ciphertext.
    pub output: Block,
    /// Derivation of the next round key, `K(round - 1) -> K(round)`.
    pub key_step: KeyScheduleStep,
}

fn trace_step(input: &Block, round_keys: &RoundKeys, index: usize) -> RoundTrace {
    let after_add_round_key = add_round_key(input, round_keys.get(index));
    let after_sub_bytes = sub_bytes(&after_add_round_key);
    let after_shift_rows = shift_rows(&after_sub_bytes);
    let (after_mix_columns, output) = if index == 9 {
        (None, add_round_key(&after_shift_rows, round_keys.get(10)))
    } else {
        let mixed = mix_columns(&after_shift_rows);
        (Some(mixed), mixed)
    };
    let (_, key_step) = derive_round_key(round_keys.get(index), index + 1);

    RoundTrace {
        round: index + 1,
        input: *input,
        after_add_round_key,
        after_sub_bytes,
        after_shift_rows,
        after_mix_columns,
        output,
        key_step,
    }
}

/// Traces a single round.
///
/// `index` is the 0-based round index (0..=9, display rounds 1..=10); the
/// preceding rounds are executed to reach the round's input state.
///
/// # Panics
///
/// Panics if `index > 9`; the AES-128 trace has exactly ten rounds.
pub fn trace_round(plaintext: &Block, round_keys: &RoundKeys, index: usize) -> RoundTrace {
    assert!(index < 10, "AES-128 round index must be 0..=9");
    let mut state = *plaintext;
    for i in 0..index {
        state = trace_step(&state, round_keys, i).output;
    }
    trace_step(&state, round_keys, index)
}

/// Traces all ten rounds of one block encryption.
///
/// The final trace's `output` equals [`crate::encrypt_block`] for the same
/// inputs.
pub fn trace(plaintext: &Block, round_keys: &RoundKeys) -> Vec<RoundTrace> {
    let mut state = *plaintext;
    (0..10)
        .map(|index| {
            let step = trace_step(&state, round_keys, index);
            state = step.output;
            step
        })
        .collect()
}

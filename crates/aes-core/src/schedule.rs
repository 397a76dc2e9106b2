//! AES-128 key schedule.
//!
//! The expansion is formulated round by round rather than as one flat word
//! array: [`derive_round_key`] computes `K(r)` from `K(r-1)` alone and hands
//! back the intermediate words, which is what the round trace displays.

use crate::block::Block;
use crate::error::AesError;
use crate::round::xtime;
use crate::sbox::sbox;

/// One 4-byte key-schedule word (a state-grid column).
pub type Word = [u8; 4];

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl Aes128Key {
    /// Builds a key from a slice, rejecting anything but exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AesError> {
        crate::block::block_from_slice(bytes).map(Self)
    }
}

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// Expanded round keys `K0..=K10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; 11]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }
}

/// Intermediate values of one key-schedule round, `K(round-1) -> K(round)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyScheduleStep {
    /// Round being derived (1..=10).
    pub round: usize,
    /// `W0..W3`: the previous round key split into words.
    pub prev_words: [Word; 4],
    /// `RotWord(W3)`.
    pub rotated: Word,
    /// `SubWord(RotWord(W3))`.
    pub substituted: Word,
    /// The round constant word `[rc, 0, 0, 0]`.
    pub rcon: Word,
    /// `T = SubWord(RotWord(W3)) ^ Rcon(round)`.
    pub t: Word,
    /// `W4..W7`: the words of the derived round key.
    pub next_words: [Word; 4],
}

/// Round-constant byte for the given round (1..=10), obtained by iterating
/// the GF(2^8) doubling `round - 1` times starting from 1.
pub fn rcon(round: usize) -> u8 {
    let mut rc = 1u8;
    for _ in 1..round {
        rc = xtime(rc);
    }
    rc
}

fn rot_word(word: Word) -> Word {
    [word[1], word[2], word[3], word[0]]
}

fn sub_word(word: Word) -> Word {
    word.map(sbox)
}

fn xor_words(lhs: &Word, rhs: &Word) -> Word {
    [
        lhs[0] ^ rhs[0],
        lhs[1] ^ rhs[1],
        lhs[2] ^ rhs[2],
        lhs[3] ^ rhs[3],
    ]
}

fn block_words(block: &Block) -> [Word; 4] {
    core::array::from_fn(|i| {
        let base = i * 4;
        [block[base], block[base + 1], block[base + 2], block[base + 3]]
    })
}

fn words_block(words: &[Word; 4]) -> Block {
    let mut block = [0u8; 16];
    for (i, word) in words.iter().enumerate() {
        block[i * 4..i * 4 + 4].copy_from_slice(word);
    }
    block
}

/// Derives round key `K(round)` from `K(round - 1)` and records the
/// intermediate words.
pub fn derive_round_key(prev: &Block, round: usize) -> (Block, KeyScheduleStep) {
    let prev_words = block_words(prev);
    let rotated = rot_word(prev_words[3]);
    let substituted = sub_word(rotated);
    let rcon_word = [rcon(round), 0, 0, 0];
    let t = xor_words(&substituted, &rcon_word);

    let mut next_words = [[0u8; 4]; 4];
    next_words[0] = xor_words(&prev_words[0], &t);
    for i in 1..4 {
        next_words[i] = xor_words(&prev_words[i], &next_words[i - 1]);
    }

    let step = KeyScheduleStep {
        round,
        prev_words,
        rotated,
        substituted,
        rcon: rcon_word,
        t,
        next_words,
    };
    (words_block(&next_words), step)
}

/// Expands a 128-bit key into the 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut keys = [[0u8; 16]; 11];
    keys[0] = key.0;
    for round in 1..=10 {
        let (next, _) = derive_round_key(&keys[round - 1], round);
        keys[round] = next;
    }
    RoundKeys(keys)
}

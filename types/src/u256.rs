// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub use ethereum_types::U256;

/// One physical storage slot worth of state, big-endian.
pub type Word = [u8; 32];

pub const ZERO_WORD: Word = [0u8; 32];

pub fn u256_to_word(value: &U256) -> Word {
    let mut word = ZERO_WORD;
    value.to_big_endian(&mut word);
    word
}

pub fn word_to_u256(word: &Word) -> U256 {
    U256::from_big_endian(word)
}

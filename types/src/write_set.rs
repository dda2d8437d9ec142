// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! For each operation the engine commits, it outputs a `WriteSet` that
//! contains each slot it updates together with the new 32-byte word.

use crate::state_store::SlotId;
use crate::u256::Word;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum WriteOp {
    /// The slot held the zero word (or was never written) before this
    /// operation.
    Creation(Word),
    /// The slot already held a non-zero word.
    Modification(Word),
}

impl WriteOp {
    #[inline]
    pub fn is_creation(&self) -> bool {
        matches!(self, WriteOp::Creation(_))
    }

    #[inline]
    pub fn is_modification(&self) -> bool {
        matches!(self, WriteOp::Modification(_))
    }

    pub fn word(&self) -> &Word {
        match self {
            WriteOp::Creation(word) | WriteOp::Modification(word) => word,
        }
    }
}

impl std::fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOp::Creation(word) => write!(f, "Creation({})", hex::encode(word)),
            WriteOp::Modification(word) => write!(f, "Modification({})", hex::encode(word)),
        }
    }
}

/// `WriteSet` contains every slot one operation modifies. Slots are never
/// deleted, only reset to the zero word, so there is no deletion op.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WriteSet(WriteSetMut);

impl WriteSet {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.write_set.len()
    }

    #[inline]
    pub fn iter(&self) -> ::std::slice::Iter<'_, (SlotId, WriteOp)> {
        self.into_iter()
    }

    #[inline]
    pub fn into_mut(self) -> WriteSetMut {
        self.0
    }
}

/// A mutable version of `WriteSet`.
///
/// This is separate because it goes through validation before becoming an
/// immutable `WriteSet`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WriteSetMut {
    write_set: Vec<(SlotId, WriteOp)>,
}

impl WriteSetMut {
    pub fn new(write_set: Vec<(SlotId, WriteOp)>) -> Self {
        Self { write_set }
    }

    pub fn push(&mut self, item: (SlotId, WriteOp)) {
        self.write_set.push(item);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.write_set.is_empty()
    }

    pub fn freeze(self) -> Result<WriteSet> {
        // Each slot must appear at most once; the overlay coalesces repeated
        // writes before freezing.
        let mut seen = std::collections::BTreeSet::new();
        for (slot, _) in &self.write_set {
            anyhow::ensure!(seen.insert(*slot), "duplicate slot in write set: {:?}", slot);
        }
        Ok(WriteSet(self))
    }
}

impl<'a> IntoIterator for &'a WriteSet {
    type Item = &'a (SlotId, WriteOp);
    type IntoIter = ::std::slice::Iter<'a, (SlotId, WriteOp)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.write_set.iter()
    }
}

impl IntoIterator for WriteSet {
    type Item = (SlotId, WriteOp);
    type IntoIter = ::std::vec::IntoIter<(SlotId, WriteOp)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.write_set.into_iter()
    }
}

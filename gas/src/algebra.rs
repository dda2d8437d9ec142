// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

/***************************************************************************************************
 * Units & Quantities
 *
 **************************************************************************************************/

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Unit of internal gas, the unit the metering schedule is denominated in.
pub enum InternalGasUnit {}

pub type InternalGas = GasQuantity<InternalGasUnit>;

/// An opaque u64 quantity tagged with a unit, so quantities of different
/// units cannot be mixed up accidentally.
pub struct GasQuantity<U> {
    val: u64,
    phantom: PhantomData<U>,
}

impl<U> GasQuantity<U> {
    pub const fn new(val: u64) -> Self {
        Self {
            val,
            phantom: PhantomData,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_zero(&self) -> bool {
        self.val == 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.val.checked_add(rhs.val).map(Self::new)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.val.checked_sub(rhs.val).map(Self::new)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self::new(self.val.saturating_add(rhs.val))
    }
}

impl<U> From<u64> for GasQuantity<U> {
    fn from(val: u64) -> Self {
        Self::new(val)
    }
}

impl<U> From<GasQuantity<U>> for u64 {
    fn from(quantity: GasQuantity<U>) -> Self {
        quantity.val
    }
}

impl<U> std::ops::Add for GasQuantity<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl<U> std::ops::AddAssign for GasQuantity<U> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

// Manual impls so the unit type does not need to implement anything.

impl<U> Clone for GasQuantity<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for GasQuantity<U> {}

impl<U> PartialEq for GasQuantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<U> Eq for GasQuantity<U> {}

impl<U> PartialOrd for GasQuantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<U> Ord for GasQuantity<U> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<U> Hash for GasQuantity<U> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<U> fmt::Debug for GasQuantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val)
    }
}

impl<U> fmt::Display for GasQuantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val)
    }
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod algebra;
pub mod fee;
pub mod meter;
mod params;
pub mod schedule;
pub mod traits;

pub use algebra::{GasQuantity, InternalGas, InternalGasUnit};
pub use fee::{quote, settle, FeeQuote};
pub use meter::LedgerGasMeter;
pub use schedule::{LedgerGasParameters, G_LATEST_GAS_PARAMS, G_TEST_GAS_PARAMS};
pub use traits::{FromOnChainGasSchedule, InitialGasSchedule, ToOnChainGasSchedule};

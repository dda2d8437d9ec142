// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod access_control;
pub mod engine;
pub mod queries;

pub use access_control::{AccessGuard, OwnerGuard};
pub use engine::OperationEngine;

use anyhow::Result;
use log::debug;
use metered_ledger_state::{LedgerDB, StateView, StateViewCache};
use metered_ledger_types::error::LedgerError;
use metered_ledger_types::fee_statement::FeeStatement;
use metered_ledger_types::transaction::{OperationOutput, OperationRequest};

/// Executes a batch of operations against one view, each on its own
/// overlay. Committed effects become visible to the operations that follow;
/// admission failures surface as rolled-back outputs with a zero fee so a
/// bad request cannot poison the batch.
pub fn execute_operations<S: StateView, G: AccessGuard>(
    state: &S,
    engine: &OperationEngine<G>,
    requests: Vec<OperationRequest>,
) -> Result<Vec<OperationOutput>> {
    let mut cache = StateViewCache::new(state);
    let mut outputs = Vec::with_capacity(requests.len());
    for request in requests {
        let output = match engine.execute_operation(&cache, &request) {
            Ok(output) => output,
            Err(rejected) => OperationOutput::rolled_back(rejected, FeeStatement::zero()),
        };
        debug!("{:?}", output);
        if output.status().is_committed() {
            cache.push_write_set(output.write_set());
        }
        outputs.push(output);
    }
    Ok(outputs)
}

/// Executes one operation and applies its effects to the ledger.
///
/// The ledger's exclusive lock is held for the whole operation, which gives
/// the serializable single-writer ordering: no two operations interleave
/// their mutations, and a rolled-back operation applies nothing.
pub fn execute_and_apply<G: AccessGuard>(
    db: &LedgerDB,
    engine: &OperationEngine<G>,
    request: &OperationRequest,
) -> Result<OperationOutput, LedgerError> {
    let _exclusive = db.exclusive_lock();
    let output = engine.execute_operation(db, request)?;
    if output.status().is_committed() {
        db.apply_write_set(output.write_set());
    }
    Ok(output)
}

// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Conservation law: after every committed operation the sum of all balances
//! equals the total supply, and a rolled-back operation changes nothing.

use metered_ledger_executor::{execute_and_apply, queries, OperationEngine};
use metered_ledger_gas::schedule::LedgerGasParameters;
use metered_ledger_gas::InitialGasSchedule;
use metered_ledger_state::{GenesisConfig, LedgerDB};
use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::state_store::SlotId;
use metered_ledger_types::transaction::{Budget, Operation, OperationRequest};
use metered_ledger_types::u256::{word_to_u256, U256};
use proptest::prelude::*;

fn accounts() -> [AccountAddress; 4] {
    [
        AccountAddress::new([0x01; 20]),
        AccountAddress::new([0x02; 20]),
        AccountAddress::new([0x03; 20]),
        AccountAddress::new([0x04; 20]),
    ]
}

fn sum_of_balances(db: &LedgerDB) -> U256 {
    db.dump()
        .into_iter()
        .filter(|(slot, _)| matches!(slot, SlotId::Balance(_)))
        .fold(U256::zero(), |acc, (_, word)| acc + word_to_u256(&word))
}

#[derive(Clone, Debug)]
enum Step {
    Transfer { caller: usize, to: usize, value: u64 },
    Approve { caller: usize, spender: usize, value: u64 },
    TransferFrom { caller: usize, from: usize, to: usize, value: u64 },
    Mint { caller: usize, to: usize, value: u64 },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let idx = 0usize..4;
    let value = 0u64..2_000;
    prop_oneof![
        (idx.clone(), idx.clone(), value.clone())
            .prop_map(|(caller, to, value)| Step::Transfer { caller, to, value }),
        (idx.clone(), idx.clone(), value.clone())
            .prop_map(|(caller, spender, value)| Step::Approve { caller, spender, value }),
        (idx.clone(), idx.clone(), idx.clone(), value.clone()).prop_map(
            |(caller, from, to, value)| Step::TransferFrom { caller, from, to, value }
        ),
        (idx.clone(), idx, value).prop_map(|(caller, to, value)| Step::Mint { caller, to, value }),
    ]
}

fn to_request(step: &Step, accounts: &[AccountAddress; 4]) -> OperationRequest {
    let budget = Budget::new(1_000_000, U256::from(100), U256::from(2));
    match step {
        Step::Transfer { caller, to, value } => OperationRequest::new(
            accounts[*caller],
            Operation::Transfer {
                to: accounts[*to],
                value: U256::from(*value),
            },
            budget,
        ),
        Step::Approve { caller, spender, value } => OperationRequest::new(
            accounts[*caller],
            Operation::Approve {
                spender: accounts[*spender],
                value: U256::from(*value),
            },
            budget,
        ),
        Step::TransferFrom { caller, from, to, value } => OperationRequest::new(
            accounts[*caller],
            Operation::TransferFrom {
                from: accounts[*from],
                to: accounts[*to],
                value: U256::from(*value),
            },
            budget,
        ),
        Step::Mint { caller, to, value } => OperationRequest::new(
            accounts[*caller],
            Operation::Mint {
                to: accounts[*to],
                value: U256::from(*value),
            },
            budget,
        ),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_conservation_over_random_sequences(steps in proptest::collection::vec(step_strategy(), 1..40)) {
        let accounts = accounts();
        let db = LedgerDB::genesis(&GenesisConfig {
            owner: accounts[0],
            name: "Metered Token".to_string(),
            symbol: "MTK".to_string(),
            decimals: 9,
            initial_supply: U256::from(10_000u64),
        })
        .unwrap();
        let engine = OperationEngine::new(LedgerGasParameters::initial(), U256::one());

        for step in &steps {
            let before = db.dump();
            let output = execute_and_apply(&db, &engine, &to_request(step, &accounts)).unwrap();
            if !output.status().is_committed() {
                // atomic rollback: nothing moved
                prop_assert_eq!(&db.dump(), &before);
            }
            // conservation holds after every operation
            prop_assert_eq!(sum_of_balances(&db), queries::total_supply(&db).unwrap());
        }
    }
}

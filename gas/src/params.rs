// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

/// Defines a parameter struct of the gas schedule, along with its genesis
/// values and the mapping to and from the on-chain schedule representation.
#[macro_export]
macro_rules! define_gas_parameters {
    (
        $params_name: ident,
        $prefix: literal,
        [$([$name: ident: $ty: ty, $key: literal, $initial: expr]),+ $(,)?]
    ) => {
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $params_name {
            $(pub $name: $ty,)*
        }

        impl $params_name {
            pub fn zeros() -> Self {
                Self {
                    $($name: 0u64.into(),)*
                }
            }
        }

        impl $crate::traits::InitialGasSchedule for $params_name {
            fn initial() -> Self {
                Self {
                    $($name: ($initial as u64).into(),)*
                }
            }
        }

        impl $crate::traits::FromOnChainGasSchedule for $params_name {
            fn from_on_chain_gas_schedule(
                gas_schedule: &$crate::traits::OnChainGasSchedule,
            ) -> Option<Self> {
                Some(Self {
                    $($name: gas_schedule
                        .get(&format!("{}.{}", $prefix, $key))
                        .cloned()?
                        .into(),)*
                })
            }
        }

        impl $crate::traits::ToOnChainGasSchedule for $params_name {
            fn to_on_chain_gas_schedule(&self) -> Vec<(String, u64)> {
                vec![
                    $((format!("{}.{}", $prefix, $key), self.$name.into()),)*
                ]
            }
        }
    };
}

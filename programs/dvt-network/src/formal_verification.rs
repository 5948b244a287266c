// ============================================================================
// FORMAL VERIFICATION & PROPERTY-BASED TESTS
// ============================================================================
//
// Run with: cargo test --lib formal_verification
//
// This module implements:
// 1. Accrual invariants (randomized with proptest)
// 2. Conservation and liquidation properties
// 3. Arithmetic edge cases
// ============================================================================

#[cfg(test)]
mod formal_tests {
    use anchor_lang::prelude::*;
    use proptest::prelude::*;
    use crate::constants::*;
    use crate::helpers::*;
    use crate::ledger::*;
    use crate::state::*;
    use crate::ErrorCode;

    const OWNER: Pubkey = Pubkey::new_from_array([1u8; 32]);

    /// Fees are drawn in FEE_GRANULARITY steps, up to 0.1 token per slot
    fn arb_fee() -> impl Strategy<Value = u64> {
        (0u64..=10_000).prop_map(|steps| steps * FEE_GRANULARITY)
    }

    fn network(network_fee: u64) -> NetworkState {
        NetworkState::new(
            Pubkey::new_from_array([9u8; 32]),
            Pubkey::new_from_array([8u8; 32]),
            Pubkey::new_from_array([7u8; 32]),
            network_fee,
            NetworkParams::default(),
            0,
        )
    }

    fn operators(fees: &[u64]) -> Vec<Box<Operator>> {
        fees.iter()
            .enumerate()
            .map(|(i, fee)| Box::new(Operator::new(i as u64 + 1, OWNER, *fee, 0, 0)))
            .collect()
    }

    fn cluster_for(operators: &[Box<Operator>]) -> Cluster {
        let ids: Vec<u64> = operators.iter().map(|operator| operator.id).collect();
        Cluster::new(OWNER, hash_operator_ids(&ids), ids, 0)
    }

    // ========================================================================
    // SECTION 1: ACCRUAL INVARIANTS
    // ========================================================================

    proptest! {
        /// Earnings between two slots are fee * validators * elapsed
        #[test]
        fn prop_operator_accrual_is_linear(
            fee in arb_fee(),
            validators in 1u32..=500,
            b1 in 0u64..1_000_000,
            elapsed in 0u64..1_000_000,
        ) {
            let mut operator = Operator::new(1, OWNER, fee, 0, 0);
            operator.add_validators(validators, 500, 0).unwrap();

            let b2 = b1 + elapsed;
            let delta = operator.earnings_at(b2).unwrap() - operator.earnings_at(b1).unwrap();
            prop_assert_eq!(delta, fee * validators as u64 * elapsed);
        }

        /// Checkpointing anywhere along the way never changes a later reading
        #[test]
        fn prop_checkpoints_are_path_independent(
            fee in arb_fee(),
            validators in 1u32..=100,
            checkpoints in prop::collection::vec(0u64..100_000, 0..8),
            end in 100_000u64..200_000,
        ) {
            let mut operator = Operator::new(1, OWNER, fee, 0, 0);
            operator.add_validators(validators, 500, 0).unwrap();
            let expected = operator.earnings_at(end).unwrap();

            let mut sorted = checkpoints.clone();
            sorted.sort_unstable();
            for block in sorted {
                operator.checkpoint(block).unwrap();
                operator.checkpoint(block).unwrap();
            }
            prop_assert_eq!(operator.earnings_at(end).unwrap(), expected);
        }

        /// A fee change only affects slots after it
        #[test]
        fn prop_fee_change_is_not_retroactive(
            old_fee in arb_fee(),
            new_fee in arb_fee(),
            validators in 1u32..=100,
            change_at in 0u64..100_000,
            after in 0u64..100_000,
        ) {
            let mut operator = Operator::new(1, OWNER, old_fee, 0, 0);
            operator.add_validators(validators, 500, 0).unwrap();
            let before_change = operator.earnings_at(change_at).unwrap();

            operator.set_fee(new_fee, change_at).unwrap();
            prop_assert_eq!(operator.earnings_at(change_at).unwrap(), before_change);
            prop_assert_eq!(
                operator.earnings_at(change_at + after).unwrap(),
                before_change + new_fee * validators as u64 * after
            );
        }

        /// Cluster balance drops by exactly burn rate * elapsed until it hits zero
        #[test]
        fn prop_cluster_burn_conservation(
            fees in prop::collection::vec(arb_fee(), 4),
            network_fee in arb_fee(),
            deposit in 0u64..1_000_000_000_000_000,
            b1 in 0u64..1_000_000,
            elapsed in 0u64..1_000_000,
        ) {
            let network = network(network_fee);
            let mut ops = operators(&fees);
            for operator in ops.iter_mut() {
                operator.add_validators(1, 500, 0).unwrap();
            }
            let mut cluster = cluster_for(&ops);
            cluster.validator_count = 1;
            cluster.balance = deposit;

            let rate = cluster.burn_rate(&ops, &network).unwrap();
            let b2 = b1 + elapsed;
            let at_b1 = cluster.balance_at(&ops, &network, b1).unwrap();
            let at_b2 = cluster.balance_at(&ops, &network, b2).unwrap();

            prop_assert_eq!(at_b1, deposit.saturating_sub(rate * b1));
            prop_assert_eq!(at_b2, at_b1.saturating_sub(rate * elapsed));

            // Settling in between lands on the same projection
            cluster.settle(&ops, &network, b1).unwrap();
            prop_assert_eq!(cluster.balance, at_b1);
            prop_assert_eq!(cluster.balance_at(&ops, &network, b2).unwrap(), at_b2);
        }
    }

    // ========================================================================
    // SECTION 2: CONSERVATION & LIQUIDATION
    // ========================================================================

    proptest! {
        /// Once eligible, a cluster stays eligible as time passes
        #[test]
        fn prop_liquidation_is_monotonic(
            fees in prop::collection::vec(arb_fee(), 4),
            network_fee in arb_fee(),
            extra in 0u64..1_000_000_000_000,
            block in 0u64..2_000_000,
            later in 0u64..2_000_000,
        ) {
            let mut network = network(network_fee);
            let mut ops = operators(&fees);
            let mut cluster = cluster_for(&ops);

            let rate = fees.iter().sum::<u64>() + network_fee;
            let runway = (rate * DEFAULT_MINIMUM_BLOCKS_BEFORE_LIQUIDATION)
                .max(DEFAULT_MINIMUM_LIQUIDATION_COLLATERAL);
            register_validators(&mut cluster, &mut ops, &mut network, 1, runway + extra, &OWNER, 0)
                .unwrap();

            if is_liquidatable(&cluster, &ops, &network, block).unwrap() {
                prop_assert!(is_liquidatable(&cluster, &ops, &network, block + later).unwrap());
            }
        }

        /// Bounty, operator earnings and treasury add up to the deposit
        /// whenever the balance never ran dry
        #[test]
        fn prop_liquidation_conserves_deposit(
            fees in prop::collection::vec(arb_fee(), 4),
            network_fee in arb_fee(),
            at in 1u64..1_000_000,
        ) {
            let rate = fees.iter().sum::<u64>() + network_fee;
            prop_assume!(rate > 0);

            let mut network = network(network_fee);
            let mut ops = operators(&fees);
            let mut cluster = cluster_for(&ops);
            let runway = (rate * DEFAULT_MINIMUM_BLOCKS_BEFORE_LIQUIDATION)
                .max(DEFAULT_MINIMUM_LIQUIDATION_COLLATERAL);
            register_validators(&mut cluster, &mut ops, &mut network, 1, runway, &OWNER, 0).unwrap();

            prop_assume!(is_liquidatable(&cluster, &ops, &network, at).unwrap());
            let bounty = liquidate(&mut cluster, &mut ops, &mut network, at).unwrap();

            let operators_earned: u64 = ops.iter().map(|operator| operator.earnings_at(at).unwrap()).sum();
            let treasury = network.treasury_earnings_at(at).unwrap();
            prop_assert_eq!(bounty + operators_earned + treasury, runway);
            prop_assert!(!cluster.active);
            prop_assert_eq!(network.active_validator_count, 0);
        }

        /// Register-then-remove returns every counter to where it started
        #[test]
        fn prop_register_remove_restores_counts(
            count in 1u32..=MAX_VALIDATORS_PER_BATCH as u32,
            at in 0u64..1_000,
        ) {
            let fees = [1_000_000u64; 4];
            let mut network = network(1_000_000);
            let mut ops = operators(&fees);
            let mut cluster = cluster_for(&ops);
            let deposit = 5_000_000 * count as u64 * DEFAULT_MINIMUM_BLOCKS_BEFORE_LIQUIDATION * 2;

            register_validators(&mut cluster, &mut ops, &mut network, count, deposit, &OWNER, 0).unwrap();
            remove_validators(&mut cluster, &mut ops, &mut network, count, at).unwrap();

            prop_assert_eq!(cluster.validator_count, 0);
            prop_assert_eq!(network.active_validator_count, 0);
            prop_assert!(ops.iter().all(|operator| operator.validator_count == 0));
            prop_assert_eq!(cluster.balance, deposit - 5_000_000 * count as u64 * at);
        }

        /// A declared fee never exceeds the increase limit
        #[test]
        fn prop_declared_fee_respects_limit(
            current_steps in 10u64..100_000,
            proposed_steps in 0u64..200_000,
        ) {
            let params = NetworkParams::default();
            let current = current_steps * FEE_GRANULARITY;
            let proposed = proposed_steps * FEE_GRANULARITY;
            let operator = Operator::new(1, OWNER, current, 0, 0);
            let mut request = OperatorFeeRequest {
                operator_id: 0,
                fee: 0,
                approval_begin_block: 0,
                approval_end_block: 0,
                bump: 0,
            };

            if declare_operator_fee(&operator, &mut request, proposed, &params, 0).is_ok() {
                prop_assert!(proposed <= max_allowed_fee(current, params.operator_fee_increase_limit_bps).unwrap());
                prop_assert!(proposed <= params.operator_max_fee);
                prop_assert!(proposed != current);
            }
        }
    }

    // ========================================================================
    // SECTION 3: ARITHMETIC EDGE CASES
    // ========================================================================

    mod arithmetic {
        use super::*;

        #[test]
        fn accrue_overflow_is_an_error() {
            assert_eq!(
                accrue(u64::MAX, 2).unwrap_err(),
                anchor_lang::error::Error::from(ErrorCode::MathOverflow)
            );
            assert_eq!(accrue(u64::MAX, 1).unwrap(), u64::MAX);
            assert_eq!(accrue(0, u64::MAX).unwrap(), 0);
        }

        #[test]
        fn max_allowed_fee_rounds_down() {
            assert_eq!(max_allowed_fee(100_000_000, 1_000).unwrap(), 110_000_000);
            assert_eq!(max_allowed_fee(9, 1_000).unwrap(), 9);
            assert_eq!(max_allowed_fee(0, 1_000).unwrap(), 0);
            assert_eq!(max_allowed_fee(u64::MAX, 10_000).unwrap_err(),
                anchor_lang::error::Error::from(ErrorCode::MathOverflow));
        }

        #[test]
        fn snapshot_advance_returns_delta() {
            let mut snapshot = FeeSnapshot::new(10);
            assert_eq!(snapshot.advance(5, 20).unwrap(), 50);
            assert_eq!(snapshot, FeeSnapshot { index: 50, block: 20 });
            assert_eq!(snapshot.advance(5, 20).unwrap(), 0);
        }

        #[test]
        fn huge_validator_count_overflows_cleanly() {
            let mut operator = Operator::new(1, OWNER, u64::MAX / 2, 0, 0);
            operator.add_validators(4, u32::MAX, 0).unwrap();
            assert!(operator.earnings_at(1).is_err());
        }
    }
}

#![cfg(test)]

use crate::test_helpers::{assert_close, fund, setup, ONE};
use reserve_errors::ContractError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[test]
fn test_transfer_moves_displayed_amount() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);
    let alice = fund(&e, &client, &staking, 50 * ONE);
    let bob = Address::generate(&e);

    client.transfer(&alice, &bob, &(20 * ONE));

    assert_eq!(client.balance_of(&alice), 30 * ONE);
    assert_eq!(client.balance_of(&bob), 20 * ONE);
}

#[test]
fn test_transfer_over_balance_rejected() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);
    let alice = fund(&e, &client, &staking, 5 * ONE);
    let bob = Address::generate(&e);

    assert_eq!(
        client.try_transfer(&alice, &bob, &(5 * ONE + 1)).unwrap_err(),
        Ok(ContractError::InsufficientBalance)
    );
    assert_eq!(
        client.try_transfer(&alice, &bob, &-1).unwrap_err(),
        Ok(ContractError::InvalidAmount)
    );
    assert_eq!(client.balance_of(&alice), 5 * ONE);
}

#[test]
fn test_full_balance_transfer_after_rebase_leaves_no_dust() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);
    let alice = fund(&e, &client, &staking, 3 * ONE);
    fund(&e, &client, &staking, 7 * ONE);
    client.rebase(&(ONE / 3), &1);

    let bob = Address::generate(&e);
    let all = client.balance_of(&alice);
    client.transfer(&alice, &bob, &all);

    assert_eq!(client.balance_of(&alice), 0);
    assert_eq!(client.balance_of(&bob), all);
}

#[test]
fn test_transfer_from_spends_allowance() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);
    let alice = fund(&e, &client, &staking, 10 * ONE);
    let spender = Address::generate(&e);
    let bob = Address::generate(&e);

    client.approve(&alice, &spender, &(4 * ONE));
    client.transfer_from(&spender, &alice, &bob, &(3 * ONE));

    assert_eq!(client.allowance(&alice, &spender), ONE);
    assert_eq!(client.balance_of(&bob), 3 * ONE);
    assert_eq!(
        client
            .try_transfer_from(&spender, &alice, &bob, &(ONE + 1))
            .unwrap_err(),
        Ok(ContractError::InsufficientAllowance)
    );
}

/// Displayed balances always sum to total supply, short by at most one
/// unit per holder.
#[test]
fn test_conservation_across_transfers_and_rebases() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);

    let mut holders = soroban_sdk::Vec::<Address>::new(&e);
    for i in 1..=6i128 {
        holders.push_back(fund(&e, &client, &staking, i * 1_111 * ONE + i * 7));
    }
    let gons = client.move_to_warmup(&(333 * ONE));

    let profits = [ONE, 0, 17 * ONE + 9, 250 * ONE, 3];
    for (epoch, profit) in profits.iter().enumerate() {
        client.rebase(profit, &(epoch as u32));

        // shuffle some value around between rebases
        let from = holders.get(epoch as u32 % 6).unwrap();
        let to = holders.get((epoch as u32 + 1) % 6).unwrap();
        let amount = client.balance_of(&from) / 3;
        client.transfer(&from, &to, &amount);

        let mut sum = client.balance_of(&staking) + client.warmup_balance();
        for h in holders.iter() {
            sum += client.balance_of(&h);
        }
        let total = client.total_supply();
        // six holders, the pool and the warmup bucket
        assert!(sum <= total, "sum {} > total {}", sum, total);
        assert!(total - sum <= 8, "drift {}", total - sum);
    }

    let released = client.release_warmup(&holders.get(0).unwrap(), &gons);
    assert!(released >= 333 * ONE);
}

#[test]
fn test_round_trip_conversion() {
    let e = Env::default();
    let (client, _, staking) = setup(&e);
    fund(&e, &client, &staking, 400_000 * ONE);
    client.rebase(&(12_345 * ONE + 678), &1);

    let total = client.total_supply();
    for x in [1i128, 2, 999, ONE, 77_777 * ONE + 1, total] {
        let back = client.balance_for_gons(&client.gons_for_balance(&x));
        assert_close(back, x, 1);
    }
}

//! Off-chain estimates built on the same math the program executes.
//!
//! Quotes never fail on empty or zero inputs; they report zero so a client
//! can render "no output" instead of an error.

use crate::{
    constants::{FEE_DENOMINATOR, FEE_NUMERATOR},
    instructions::SwapDirection,
    math,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub amount_out: u64,
    /// Portion of `amount_in` retained by the pool as fee.
    pub fee: u64,
}

pub fn quote_swap(reserve_a: u64, reserve_b: u64, amount_in: u64, direction: SwapDirection) -> SwapQuote {
    let (reserve_in, reserve_out) = match direction {
        SwapDirection::AToB => (reserve_a, reserve_b),
        SwapDirection::BToA => (reserve_b, reserve_a),
    };

    let amount_out = math::swap_out(amount_in, reserve_in, reserve_out, FEE_NUMERATOR, FEE_DENOMINATOR)
        .unwrap_or_default();
    let fee = if amount_out == 0 {
        0
    } else {
        let kept = amount_in as u128 * (FEE_DENOMINATOR - FEE_NUMERATOR) as u128
            / FEE_DENOMINATOR as u128;
        amount_in - kept as u64
    };

    SwapQuote {
        amount_in,
        amount_out,
        fee,
    }
}

/// Assets returned for burning `burn_shares`, or `(0, 0)` when the burn is
/// not possible against the given supply.
pub fn quote_withdrawal(burn_shares: u64, reserve_a: u64, reserve_b: u64, total_shares: u64) -> (u64, u64) {
    math::withdrawal_amounts(burn_shares, reserve_a, reserve_b, total_shares).unwrap_or_default()
}

/// Shares a deposit would mint against current reserves and supply.
pub fn quote_deposit(
    deposit_a: u64,
    deposit_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
) -> u64 {
    let issue = if total_shares == 0 {
        math::initial_shares(deposit_a, deposit_b)
    } else {
        math::incremental_shares(deposit_a, deposit_b, reserve_a, reserve_b, total_shares)
    };
    issue.map(|issue| issue.shares).unwrap_or_default()
}

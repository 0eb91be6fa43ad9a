//! Constant-product pricing and share accounting.
//!
//! All amounts are integers in the asset's smallest unit. Intermediates are
//! widened to `u128` and every operation is checked; results are floored,
//! so rounding always favours the pool.

use anchor_lang::prelude::*;

use crate::errors::PoolErrorCode;

/// Amounts taken from a depositor and the shares issued for them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShareIssue {
    pub accepted_a: u64,
    pub accepted_b: u64,
    pub shares: u64,
}

/// Floor of the square root (Babylonian iteration).
pub fn isqrt(value: u128) -> u128 {
    if value == 0 {
        return 0;
    }
    // Start at ceil(value / 2), which is never below the root.
    let mut root = value;
    let mut next = value / 2 + value % 2;
    while next < root {
        root = next;
        next = (value / next + next) / 2;
    }
    root
}

/// Shares for the first deposit into an empty pool: `floor(sqrt(a * b))`.
pub fn initial_shares(deposit_a: u64, deposit_b: u64) -> Result<ShareIssue> {
    let product = (deposit_a as u128)
        .checked_mul(deposit_b as u128)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;

    Ok(ShareIssue {
        accepted_a: deposit_a,
        accepted_b: deposit_b,
        shares: to_u64(isqrt(product))?,
    })
}

/// Shares for a deposit into a funded pool, priced on the limiting side:
/// `floor(total * min(a / R_a, b / R_b))`.
///
/// Both requested amounts are accepted in full. Whatever exceeds the
/// limiting ratio stays in the pool without extra share credit.
pub fn incremental_shares(
    deposit_a: u64,
    deposit_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
) -> Result<ShareIssue> {
    require!(
        reserve_a > 0 && reserve_b > 0,
        PoolErrorCode::InsufficientLiquidity
    );

    let from_a = mul_div(deposit_a, total_shares, reserve_a)?;
    let from_b = mul_div(deposit_b, total_shares, reserve_b)?;

    Ok(ShareIssue {
        accepted_a: deposit_a,
        accepted_b: deposit_b,
        shares: to_u64(from_a.min(from_b))?,
    })
}

/// Assets returned for burning `burn_shares`: each reserve times
/// `burn_shares / total_shares`, floored.
pub fn withdrawal_amounts(
    burn_shares: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
) -> Result<(u64, u64)> {
    require!(total_shares > 0, PoolErrorCode::InsufficientLiquidity);
    require!(
        burn_shares <= total_shares,
        PoolErrorCode::InsufficientShares
    );

    let return_a = to_u64(mul_div(reserve_a, burn_shares, total_shares)?)?;
    let return_b = to_u64(mul_div(reserve_b, burn_shares, total_shares)?)?;
    Ok((return_a, return_b))
}

/// Output of a constant-product swap with the fee kept in the pool.
///
/// `in_after_fee = amount_in * (den - num) / den`, then
/// `out = in_after_fee * reserve_out / (reserve_in + in_after_fee)`.
/// A zero input or an empty reserve quotes zero; callers that must move
/// funds reject that as a zero-effect operation.
pub fn swap_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<u64> {
    if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
        return Ok(0);
    }

    let fee_kept = fee_denominator
        .checked_sub(fee_numerator)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;
    let in_after_fee = mul_div(amount_in, fee_kept, fee_denominator)?;

    let numerator = in_after_fee
        .checked_mul(reserve_out as u128)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_add(in_after_fee)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;
    let amount_out = to_u64(
        numerator
            .checked_div(denominator)
            .ok_or(PoolErrorCode::ArithmeticOverflow)?,
    )?;

    require!(
        amount_out <= reserve_out,
        PoolErrorCode::InsufficientLiquidity
    );
    Ok(amount_out)
}

fn mul_div(value: u64, numerator: u64, denominator: u64) -> Result<u128> {
    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;
    let quotient = product
        .checked_div(denominator as u128)
        .ok_or(PoolErrorCode::ArithmeticOverflow)?;
    Ok(quotient)
}

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(PoolErrorCode::ArithmeticOverflow))
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::{FEE_DENOMINATOR, FEE_NUMERATOR, POOL_SEED},
    errors::PoolErrorCode,
    events::Swapped,
    ledger::{SplTokenLedger, TokenLedger},
    math,
    state::PoolState,
    validation::{self, PoolKeys, Trader},
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        seeds = [POOL_SEED, pool_state.token_a.as_ref(), pool_state.token_b.as_ref()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    pub token_a_mint: Account<'info, Mint>,
    pub token_b_mint: Account<'info, Mint>,

    #[account(mut)]
    pub pool_token_a_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pool_token_b_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_a_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_b_account: Account<'info, TokenAccount>,

    pub payer: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    pub amount_in: u64,
    pub amount_out: u64,
}

pub fn swap_exact(ctx: Context<Swap>, amount_in: u64, direction: SwapDirection) -> Result<()> {
    let accounts = &ctx.accounts;
    let seeds = accounts.pool_state.signer_seeds();
    let keys = PoolKeys {
        address: accounts.pool_state.key(),
        token_a_mint: accounts.token_a_mint.key(),
        token_b_mint: accounts.token_b_mint.key(),
        token_a_vault: accounts.pool_token_a_vault.key(),
        token_b_vault: accounts.pool_token_b_vault.key(),
        // No share movement in a swap; the recorded mint is presented as-is
        lp_token_mint: accounts.pool_state.lp_token_mint,
    };
    let trader = Trader {
        authority: accounts.payer.key(),
        token_a: accounts.user_token_a_account.key(),
        token_b: accounts.user_token_b_account.key(),
    };

    let mut ledger = SplTokenLedger::new(
        accounts.token_program.to_account_info(),
        vec![
            accounts.pool_state.to_account_info(),
            accounts.pool_token_a_vault.to_account_info(),
            accounts.pool_token_b_vault.to_account_info(),
            accounts.user_token_a_account.to_account_info(),
            accounts.user_token_b_account.to_account_info(),
            accounts.payer.to_account_info(),
        ],
    )
    .with_pool_signer(keys.address, &seeds);

    let outcome = execute_swap(
        &mut ledger,
        &accounts.pool_state,
        &keys,
        &trader,
        amount_in,
        direction,
    )?;

    emit!(Swapped {
        pool: keys.address,
        trader: trader.authority,
        direction,
        amount_in: outcome.amount_in,
        amount_out: outcome.amount_out,
    });

    Ok(())
}

/// Swaps an exact input amount along the constant-product curve. The fee
/// stays in the input vault.
pub fn execute_swap<L: TokenLedger>(
    ledger: &mut L,
    pool: &PoolState,
    keys: &PoolKeys,
    trader: &Trader,
    amount_in: u64,
    direction: SwapDirection,
) -> Result<SwapOutcome> {
    validation::require_pool_keys(pool, keys)?;
    validation::require_trader(ledger, keys, trader)?;
    require!(amount_in > 0, PoolErrorCode::ZeroEffect);

    // (vault in, vault out, user in, user out)
    let (vault_in, vault_out, user_in, user_out) = match direction {
        SwapDirection::AToB => (
            keys.token_a_vault,
            keys.token_b_vault,
            trader.token_a,
            trader.token_b,
        ),
        SwapDirection::BToA => (
            keys.token_b_vault,
            keys.token_a_vault,
            trader.token_b,
            trader.token_a,
        ),
    };

    let reserve_in = ledger.balance(&vault_in)?;
    let reserve_out = ledger.balance(&vault_out)?;
    require!(
        reserve_in > 0 && reserve_out > 0,
        PoolErrorCode::InsufficientLiquidity
    );

    let amount_out = math::swap_out(
        amount_in,
        reserve_in,
        reserve_out,
        FEE_NUMERATOR,
        FEE_DENOMINATOR,
    )?;
    require!(amount_out > 0, PoolErrorCode::ZeroEffect);
    require!(
        amount_out < reserve_out,
        PoolErrorCode::InsufficientLiquidity
    );

    ledger.transfer(&user_in, &vault_in, &trader.authority, amount_in)?;
    ledger.transfer(&vault_out, &user_out, &keys.address, amount_out)?;

    msg!("Reserves before swap: {} in / {} out", reserve_in, reserve_out);
    msg!("Swapped {} in for {} out", amount_in, amount_out);

    Ok(SwapOutcome {
        amount_in,
        amount_out,
    })
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::POOL_SEED,
    errors::PoolErrorCode,
    events::{LiquidityAdded, LiquidityRemoved},
    ledger::{SplTokenLedger, TokenLedger},
    math::{self, ShareIssue},
    state::PoolState,
    validation::{self, Depositor, PoolKeys},
};

/// Accounts shared by `add_liquidity` and `remove_liquidity`. Identities
/// are checked by the validation layer so every mismatch reports the same
/// error code.
#[derive(Accounts)]
pub struct Liquidity<'info> {
    #[account(
        seeds = [POOL_SEED, pool_state.token_a.as_ref(), pool_state.token_b.as_ref()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    pub token_a_mint: Account<'info, Mint>,
    pub token_b_mint: Account<'info, Mint>,

    #[account(mut)]
    pub lp_token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub pool_token_a_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub pool_token_b_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_a_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_token_b_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user_lp_token_account: Account<'info, TokenAccount>,

    pub payer: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

impl<'info> Liquidity<'info> {
    fn pool_keys(&self) -> PoolKeys {
        PoolKeys {
            address: self.pool_state.key(),
            token_a_mint: self.token_a_mint.key(),
            token_b_mint: self.token_b_mint.key(),
            token_a_vault: self.pool_token_a_vault.key(),
            token_b_vault: self.pool_token_b_vault.key(),
            lp_token_mint: self.lp_token_mint.key(),
        }
    }

    fn depositor(&self) -> Depositor {
        Depositor {
            authority: self.payer.key(),
            token_a: self.user_token_a_account.key(),
            token_b: self.user_token_b_account.key(),
            shares: self.user_lp_token_account.key(),
        }
    }

    fn ledger_accounts(&self) -> Vec<AccountInfo<'info>> {
        vec![
            self.pool_state.to_account_info(),
            self.lp_token_mint.to_account_info(),
            self.pool_token_a_vault.to_account_info(),
            self.pool_token_b_vault.to_account_info(),
            self.user_token_a_account.to_account_info(),
            self.user_token_b_account.to_account_info(),
            self.user_lp_token_account.to_account_info(),
            self.payer.to_account_info(),
        ]
    }
}

/// Assets returned for a burn of LP shares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

pub fn add_liquidity(ctx: Context<Liquidity>, deposit_a: u64, deposit_b: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let seeds = accounts.pool_state.signer_seeds();
    let keys = accounts.pool_keys();
    let depositor = accounts.depositor();

    let mut ledger = SplTokenLedger::new(
        accounts.token_program.to_account_info(),
        accounts.ledger_accounts(),
    )
    .with_pool_signer(keys.address, &seeds);

    let issue = provide_liquidity(
        &mut ledger,
        &accounts.pool_state,
        &keys,
        &depositor,
        deposit_a,
        deposit_b,
    )?;

    emit!(LiquidityAdded {
        pool: keys.address,
        provider: depositor.authority,
        amount_a: issue.accepted_a,
        amount_b: issue.accepted_b,
        shares: issue.shares,
    });

    Ok(())
}

pub fn remove_liquidity(ctx: Context<Liquidity>, burn_shares: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let seeds = accounts.pool_state.signer_seeds();
    let keys = accounts.pool_keys();
    let depositor = accounts.depositor();

    let mut ledger = SplTokenLedger::new(
        accounts.token_program.to_account_info(),
        accounts.ledger_accounts(),
    )
    .with_pool_signer(keys.address, &seeds);

    let withdrawal = withdraw_liquidity(
        &mut ledger,
        &accounts.pool_state,
        &keys,
        &depositor,
        burn_shares,
    )?;

    emit!(LiquidityRemoved {
        pool: keys.address,
        provider: depositor.authority,
        shares: withdrawal.shares,
        amount_a: withdrawal.amount_a,
        amount_b: withdrawal.amount_b,
    });

    Ok(())
}

/// Deposits both assets and mints LP shares to the depositor.
///
/// The first deposit into an empty pool sets the price and receives
/// `floor(sqrt(a * b))` shares. Later deposits are priced on the limiting
/// side of the current reserve ratio; both requested amounts are still
/// taken in full.
pub fn provide_liquidity<L: TokenLedger>(
    ledger: &mut L,
    pool: &PoolState,
    keys: &PoolKeys,
    depositor: &Depositor,
    deposit_a: u64,
    deposit_b: u64,
) -> Result<ShareIssue> {
    validation::require_pool_keys(pool, keys)?;
    validation::require_depositor(ledger, keys, depositor)?;
    require!(deposit_a > 0 && deposit_b > 0, PoolErrorCode::ZeroEffect);

    let reserve_a = ledger.balance(&keys.token_a_vault)?;
    let reserve_b = ledger.balance(&keys.token_b_vault)?;
    let total_shares = ledger.supply(&keys.lp_token_mint)?;

    let issue = if total_shares == 0 {
        math::initial_shares(deposit_a, deposit_b)?
    } else {
        math::incremental_shares(deposit_a, deposit_b, reserve_a, reserve_b, total_shares)?
    };
    require!(issue.shares > 0, PoolErrorCode::ZeroEffect);

    ledger.transfer(
        &depositor.token_a,
        &keys.token_a_vault,
        &depositor.authority,
        issue.accepted_a,
    )?;
    ledger.transfer(
        &depositor.token_b,
        &keys.token_b_vault,
        &depositor.authority,
        issue.accepted_b,
    )?;
    ledger.mint_to(&keys.lp_token_mint, &depositor.shares, &keys.address, issue.shares)?;

    if total_shares == 0 {
        msg!("Initial Liquidity: Minting {} LP tokens", issue.shares);
    } else {
        msg!("Subsequent Liquidity: Minting {} LP tokens", issue.shares);
    }
    msg!("Token A transferred: {}", issue.accepted_a);
    msg!("Token B transferred: {}", issue.accepted_b);

    Ok(issue)
}

/// Burns LP shares and returns the proportional slice of both reserves,
/// priced on reserves and supply read just before the burn.
pub fn withdraw_liquidity<L: TokenLedger>(
    ledger: &mut L,
    pool: &PoolState,
    keys: &PoolKeys,
    depositor: &Depositor,
    burn_shares: u64,
) -> Result<Withdrawal> {
    validation::require_pool_keys(pool, keys)?;
    validation::require_depositor(ledger, keys, depositor)?;
    require!(burn_shares > 0, PoolErrorCode::ZeroEffect);

    let held = ledger.balance(&depositor.shares)?;
    require!(burn_shares <= held, PoolErrorCode::InsufficientShares);

    let reserve_a = ledger.balance(&keys.token_a_vault)?;
    let reserve_b = ledger.balance(&keys.token_b_vault)?;
    let total_shares = ledger.supply(&keys.lp_token_mint)?;

    let (amount_a, amount_b) =
        math::withdrawal_amounts(burn_shares, reserve_a, reserve_b, total_shares)?;
    require!(amount_a > 0 || amount_b > 0, PoolErrorCode::ZeroEffect);

    ledger.burn(
        &depositor.shares,
        &keys.lp_token_mint,
        &depositor.authority,
        burn_shares,
    )?;
    if amount_a > 0 {
        ledger.transfer(&keys.token_a_vault, &depositor.token_a, &keys.address, amount_a)?;
    }
    if amount_b > 0 {
        ledger.transfer(&keys.token_b_vault, &depositor.token_b, &keys.address, amount_b)?;
    }

    msg!("Burned {} LP tokens", burn_shares);
    msg!("Token A returned: {}", amount_a);
    msg!("Token B returned: {}", amount_b);

    Ok(Withdrawal {
        shares: burn_shares,
        amount_a,
        amount_b,
    })
}

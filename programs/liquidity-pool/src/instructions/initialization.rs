use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::{POOL_SEED, VAULT_A_SEED, VAULT_B_SEED},
    errors::PoolErrorCode,
    events::{PoolCreated, ReservesInitialized},
    ledger::{SplTokenLedger, TokenLedger},
    state::{PoolState, PoolStatus, ShareMintInfo},
};

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        seeds = [POOL_SEED, token_a_mint.key().as_ref(), token_b_mint.key().as_ref()],
        bump,
        space = 8 + PoolState::INIT_SPACE,
    )]
    pub pool_state: Account<'info, PoolState>,

    pub token_a_mint: Account<'info, Mint>,

    // Mints are presented in canonical order: token_a_mint < token_b_mint
    #[account(
        constraint = token_b_mint.key() != token_a_mint.key() @ PoolErrorCode::IdenticalMints,
        constraint = token_b_mint.key() > token_a_mint.key() @ PoolErrorCode::AccountMismatch,
    )]
    pub token_b_mint: Account<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,
    pub system_program: Program<'info, System>,
}

pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
    let pool_key = ctx.accounts.pool_state.key();
    let pool_state = &mut ctx.accounts.pool_state;

    pool_state.record(
        ctx.accounts.token_a_mint.key(),
        ctx.accounts.token_b_mint.key(),
        ctx.accounts.owner.key(),
        ctx.bumps.pool_state,
    )?;

    msg!("Pool record created: {}", pool_key);
    msg!("Token A Mint: {}", pool_state.token_a);
    msg!("Token B Mint: {}", pool_state.token_b);

    emit!(PoolCreated {
        pool: pool_key,
        token_a: pool_state.token_a,
        token_b: pool_state.token_b,
        owner: pool_state.owner,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeReserves<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool_state.token_a.as_ref(), pool_state.token_b.as_ref()],
        bump = pool_state.bump,
    )]
    pub pool_state: Account<'info, PoolState>,

    #[account(address = pool_state.token_a @ PoolErrorCode::AccountMismatch)]
    pub token_a_mint: Account<'info, Mint>,

    #[account(address = pool_state.token_b @ PoolErrorCode::AccountMismatch)]
    pub token_b_mint: Account<'info, Mint>,

    // Authority, supply and decimals are checked in `open_reserves`
    pub lp_token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = payer,
        seeds = [VAULT_A_SEED, token_a_mint.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool_state,
    )]
    pub pool_token_a_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = payer,
        seeds = [VAULT_B_SEED, token_b_mint.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool_state,
    )]
    pub pool_token_b_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub payer: Signer<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_reserves(ctx: Context<InitializeReserves>) -> Result<()> {
    let pool_key = ctx.accounts.pool_state.key();
    let token_a_vault = ctx.accounts.pool_token_a_vault.key();
    let token_b_vault = ctx.accounts.pool_token_b_vault.key();
    let lp_token_mint = ctx.accounts.lp_token_mint.key();

    let ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        vec![
            ctx.accounts.pool_token_a_vault.to_account_info(),
            ctx.accounts.pool_token_b_vault.to_account_info(),
            ctx.accounts.lp_token_mint.to_account_info(),
        ],
    );

    open_reserves(
        &ledger,
        &mut ctx.accounts.pool_state,
        pool_key,
        token_a_vault,
        token_b_vault,
        lp_token_mint,
    )?;

    emit!(ReservesInitialized {
        pool: pool_key,
        token_a_vault,
        token_b_vault,
        lp_token_mint,
    });

    Ok(())
}

/// Checks the freshly created vaults and the share mint against the ledger,
/// then activates the pool.
pub fn open_reserves<L: TokenLedger>(
    ledger: &L,
    pool: &mut PoolState,
    pool_address: Pubkey,
    token_a_vault: Pubkey,
    token_b_vault: Pubkey,
    lp_token_mint: Pubkey,
) -> Result<()> {
    match pool.status {
        PoolStatus::Uninitialized => return err!(PoolErrorCode::PoolNotInitialized),
        PoolStatus::Active => return err!(PoolErrorCode::AlreadyInitialized),
        PoolStatus::RecordCreated => {}
    }

    for (vault, mint) in [(token_a_vault, pool.token_a), (token_b_vault, pool.token_b)] {
        let vault_mint = ledger.mint_of(&vault)?;
        let vault_owner = ledger.owner_of(&vault)?;
        require_keys_eq!(vault_mint, mint, PoolErrorCode::AccountMismatch);
        require_keys_eq!(vault_owner, pool_address, PoolErrorCode::AccountMismatch);
    }

    let share_mint = ShareMintInfo {
        key: lp_token_mint,
        mint_authority: ledger.mint_authority(&lp_token_mint)?,
        supply: ledger.supply(&lp_token_mint)?,
        decimals: ledger.decimals(&lp_token_mint)?,
    };
    pool.attach_reserves(pool_address, token_a_vault, token_b_vault, share_mint)?;

    msg!("Pool reserves initialized: {}", pool_address);
    msg!("Token A Vault: {}", pool.token_a_vault);
    msg!("Token B Vault: {}", pool.token_b_vault);
    msg!("LP Token Mint: {}", pool.lp_token_mint);

    Ok(())
}

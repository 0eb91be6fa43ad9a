//! Identity checks run before any funds move.
//!
//! Every mint, vault and user account named by an instruction is compared
//! against the pool record and against freshly derived addresses. A single
//! mismatch fails the whole operation with `AccountMismatch`.

use anchor_lang::prelude::*;

use crate::{
    derivation::{self, VaultRole},
    errors::PoolErrorCode,
    ledger::TokenLedger,
    state::PoolState,
};

/// Pool-side accounts as presented by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolKeys {
    pub address: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub lp_token_mint: Pubkey,
}

impl PoolKeys {
    /// Keys an honest caller would present for `pool`.
    pub fn for_pool(pool: &PoolState, address: Pubkey) -> Self {
        Self {
            address,
            token_a_mint: pool.token_a,
            token_b_mint: pool.token_b,
            token_a_vault: pool.token_a_vault,
            token_b_vault: pool.token_b_vault,
            lp_token_mint: pool.lp_token_mint,
        }
    }

    fn is_vault(&self, account: &Pubkey) -> bool {
        *account == self.token_a_vault || *account == self.token_b_vault
    }
}

/// A liquidity provider's accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depositor {
    pub authority: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub shares: Pubkey,
}

/// A swapper's accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trader {
    pub authority: Pubkey,
    pub token_a: Pubkey,
    pub token_b: Pubkey,
}

pub fn require_active(pool: &PoolState) -> Result<()> {
    require!(pool.is_active(), PoolErrorCode::PoolNotInitialized);
    Ok(())
}

pub fn require_pool_keys(pool: &PoolState, keys: &PoolKeys) -> Result<()> {
    require_active(pool)?;

    let address = derivation::pool_address_with_bump(&pool.token_a, &pool.token_b, pool.bump)?;
    require_keys_eq!(keys.address, address, PoolErrorCode::AccountMismatch);

    require_keys_eq!(keys.token_a_mint, pool.token_a, PoolErrorCode::AccountMismatch);
    require_keys_eq!(keys.token_b_mint, pool.token_b, PoolErrorCode::AccountMismatch);
    require_keys_eq!(keys.lp_token_mint, pool.lp_token_mint, PoolErrorCode::AccountMismatch);

    let vault_a = derivation::vault_address_with_bump(
        VaultRole::TokenA,
        &pool.token_a,
        pool.token_a_vault_bump,
    )?;
    let vault_b = derivation::vault_address_with_bump(
        VaultRole::TokenB,
        &pool.token_b,
        pool.token_b_vault_bump,
    )?;
    require_keys_eq!(keys.token_a_vault, vault_a, PoolErrorCode::AccountMismatch);
    require_keys_eq!(keys.token_b_vault, vault_b, PoolErrorCode::AccountMismatch);
    require_keys_eq!(keys.token_a_vault, pool.token_a_vault, PoolErrorCode::AccountMismatch);
    require_keys_eq!(keys.token_b_vault, pool.token_b_vault, PoolErrorCode::AccountMismatch);

    Ok(())
}

/// Checks that a token account holds `mint` and is not one of the vaults.
pub fn require_user_account<L: TokenLedger>(
    ledger: &L,
    keys: &PoolKeys,
    account: &Pubkey,
    mint: &Pubkey,
) -> Result<()> {
    require!(!keys.is_vault(account), PoolErrorCode::AccountMismatch);
    let actual = ledger.mint_of(account)?;
    require_keys_eq!(actual, *mint, PoolErrorCode::AccountMismatch);
    Ok(())
}

pub fn require_depositor<L: TokenLedger>(
    ledger: &L,
    keys: &PoolKeys,
    depositor: &Depositor,
) -> Result<()> {
    require_user_account(ledger, keys, &depositor.token_a, &keys.token_a_mint)?;
    require_user_account(ledger, keys, &depositor.token_b, &keys.token_b_mint)?;
    require_user_account(ledger, keys, &depositor.shares, &keys.lp_token_mint)?;
    Ok(())
}

pub fn require_trader<L: TokenLedger>(ledger: &L, keys: &PoolKeys, trader: &Trader) -> Result<()> {
    require_user_account(ledger, keys, &trader.token_a, &keys.token_a_mint)?;
    require_user_account(ledger, keys, &trader.token_b, &keys.token_b_mint)?;
    Ok(())
}

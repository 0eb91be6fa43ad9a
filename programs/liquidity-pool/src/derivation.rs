//! Deterministic pool and vault addresses.
//!
//! Every address is a program-derived address: a hash over a fixed seed tag
//! and the canonically ordered mints, bumped off the ed25519 curve so no
//! private key exists for it. The program proves authority over these
//! addresses by recomputing them, never by holding a secret.

use anchor_lang::prelude::*;

use crate::{
    constants::{POOL_SEED, VAULT_A_SEED, VAULT_B_SEED},
    errors::PoolErrorCode,
};

/// Which side of the pair a reserve vault holds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VaultRole {
    TokenA,
    TokenB,
}

impl VaultRole {
    pub fn seed(&self) -> &'static [u8] {
        match self {
            VaultRole::TokenA => VAULT_A_SEED,
            VaultRole::TokenB => VAULT_B_SEED,
        }
    }
}

/// Orders a mint pair so the lower key comes first. The same pair always
/// maps to the same `(token_a, token_b)` regardless of argument order.
pub fn sort_mints(mint_x: Pubkey, mint_y: Pubkey) -> Result<(Pubkey, Pubkey)> {
    require_keys_neq!(mint_x, mint_y, PoolErrorCode::IdenticalMints);
    if mint_x < mint_y {
        Ok((mint_x, mint_y))
    } else {
        Ok((mint_y, mint_x))
    }
}

/// Canonical pool address and bump for a mint pair, in either order.
pub fn pool_address(mint_x: Pubkey, mint_y: Pubkey) -> Result<(Pubkey, u8)> {
    let (token_a, token_b) = sort_mints(mint_x, mint_y)?;
    Ok(Pubkey::find_program_address(
        &[POOL_SEED, token_a.as_ref(), token_b.as_ref()],
        &crate::ID,
    ))
}

/// Recomputes a pool address from an already sorted pair and its stored bump.
pub fn pool_address_with_bump(token_a: &Pubkey, token_b: &Pubkey, bump: u8) -> Result<Pubkey> {
    Pubkey::create_program_address(
        &[POOL_SEED, token_a.as_ref(), token_b.as_ref(), &[bump]],
        &crate::ID,
    )
    .map_err(|_| error!(PoolErrorCode::AccountMismatch))
}

pub fn vault_address(role: VaultRole, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[role.seed(), mint.as_ref()], &crate::ID)
}

pub fn vault_address_with_bump(role: VaultRole, mint: &Pubkey, bump: u8) -> Result<Pubkey> {
    Pubkey::create_program_address(&[role.seed(), mint.as_ref(), &[bump]], &crate::ID)
        .map_err(|_| error!(PoolErrorCode::AccountMismatch))
}

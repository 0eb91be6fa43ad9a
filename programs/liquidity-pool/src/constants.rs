use anchor_lang::prelude::*;

// PDA seeds
#[constant]
pub const POOL_SEED: &[u8] = b"liquidity_pool";

#[constant]
pub const VAULT_A_SEED: &[u8] = b"pool_token_a";

#[constant]
pub const VAULT_B_SEED: &[u8] = b"pool_token_b";

// Swap fee retained by the pool: 3 / 1000 = 0.3%
#[constant]
pub const FEE_NUMERATOR: u64 = 3;

#[constant]
pub const FEE_DENOMINATOR: u64 = 1_000;

#[constant]
pub const SHARE_DECIMALS: u8 = 9;

use anchor_lang::prelude::*;

// Codes are assigned in declaration order from 6000. Append only.
#[error_code]
pub enum PoolErrorCode {
    #[msg("Account does not match the pool's recorded or derived identity.")]
    AccountMismatch,
    #[msg("The pool has not been initialized.")]
    PoolNotInitialized,
    #[msg("The pool has already been initialized.")]
    AlreadyInitialized,
    #[msg("Insufficient liquidity in the pool.")]
    InsufficientLiquidity,
    #[msg("Insufficient share balance.")]
    InsufficientShares,
    #[msg("Integer overflow or underflow.")]
    ArithmeticOverflow,
    #[msg("Operation would have no effect.")]
    ZeroEffect,
    #[msg("Pool assets must be two distinct mints.")]
    IdenticalMints,
    #[msg("Share mint authority must be the pool.")]
    InvalidMintAuthority,
    #[msg("Share mint supply must be zero.")]
    NonZeroShareSupply,
    #[msg("Share mint decimals do not match the pool's share decimals.")]
    InvalidShareDecimals,
}

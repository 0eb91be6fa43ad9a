//! Boundary to the fungible-token ledger.
//!
//! Pool operations never touch balances directly. They read and move funds
//! through a `TokenLedger` handle passed in by the caller: the SPL Token
//! program on-chain, or an in-memory ledger on the host.

use anchor_lang::prelude::*;

#[cfg(not(target_os = "solana"))]
pub mod memory;
pub mod spl;

#[cfg(not(target_os = "solana"))]
pub use memory::MemoryLedger;
pub use spl::SplTokenLedger;

pub trait TokenLedger {
    /// Current balance of a token account.
    fn balance(&self, account: &Pubkey) -> Result<u64>;

    /// Mint a token account holds.
    fn mint_of(&self, account: &Pubkey) -> Result<Pubkey>;

    /// Authority that may move funds out of a token account.
    fn owner_of(&self, account: &Pubkey) -> Result<Pubkey>;

    /// Outstanding supply of a mint.
    fn supply(&self, mint: &Pubkey) -> Result<u64>;

    fn mint_authority(&self, mint: &Pubkey) -> Result<Option<Pubkey>>;

    fn decimals(&self, mint: &Pubkey) -> Result<u8>;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()>;

    fn mint_to(&mut self, mint: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()>;

    fn burn(&mut self, from: &Pubkey, mint: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()>;
}

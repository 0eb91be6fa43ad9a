use std::collections::HashMap;

use anchor_lang::{prelude::*, solana_program::program_error::ProgramError};

use super::TokenLedger;
use crate::errors::PoolErrorCode;

#[derive(Clone, Debug, PartialEq, Eq)]
struct MintRecord {
    authority: Option<Pubkey>,
    supply: u64,
    decimals: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TokenRecord {
    mint: Pubkey,
    owner: Pubkey,
    amount: u64,
}

/// In-memory token ledger for host-side simulation and tests.
///
/// Enforces what the token program enforces for the pool's calls: the
/// authority must own the source account (or the mint), both sides of a
/// movement must hold the same mint, and balances cannot go negative.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    mints: HashMap<Pubkey, MintRecord>,
    accounts: HashMap<Pubkey, TokenRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_mint(&mut self, mint: Pubkey, authority: Option<Pubkey>, decimals: u8) -> Result<()> {
        if self.mints.contains_key(&mint) {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        self.mints.insert(
            mint,
            MintRecord {
                authority,
                supply: 0,
                decimals,
            },
        );
        Ok(())
    }

    pub fn create_account(&mut self, address: Pubkey, mint: Pubkey, owner: Pubkey) -> Result<()> {
        if self.accounts.contains_key(&address) {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        if !self.mints.contains_key(&mint) {
            return Err(ProgramError::UninitializedAccount.into());
        }
        self.accounts.insert(
            address,
            TokenRecord {
                mint,
                owner,
                amount: 0,
            },
        );
        Ok(())
    }

    pub fn set_mint_authority(&mut self, mint: &Pubkey, authority: Option<Pubkey>) -> Result<()> {
        self.mint_record_mut(mint)?.authority = authority;
        Ok(())
    }

    /// Runs `op` as one all-or-nothing unit: if it fails, every change it
    /// made is rolled back before the error is returned.
    pub fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    fn mint_record(&self, mint: &Pubkey) -> Result<&MintRecord> {
        self.mints
            .get(mint)
            .ok_or_else(|| error!(PoolErrorCode::AccountMismatch))
    }

    fn mint_record_mut(&mut self, mint: &Pubkey) -> Result<&mut MintRecord> {
        self.mints
            .get_mut(mint)
            .ok_or_else(|| error!(PoolErrorCode::AccountMismatch))
    }

    fn token_record(&self, account: &Pubkey) -> Result<&TokenRecord> {
        self.accounts
            .get(account)
            .ok_or_else(|| error!(PoolErrorCode::AccountMismatch))
    }

    fn token_record_mut(&mut self, account: &Pubkey) -> Result<&mut TokenRecord> {
        self.accounts
            .get_mut(account)
            .ok_or_else(|| error!(PoolErrorCode::AccountMismatch))
    }
}

impl TokenLedger for MemoryLedger {
    fn balance(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.token_record(account)?.amount)
    }

    fn mint_of(&self, account: &Pubkey) -> Result<Pubkey> {
        Ok(self.token_record(account)?.mint)
    }

    fn owner_of(&self, account: &Pubkey) -> Result<Pubkey> {
        Ok(self.token_record(account)?.owner)
    }

    fn supply(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.mint_record(mint)?.supply)
    }

    fn mint_authority(&self, mint: &Pubkey) -> Result<Option<Pubkey>> {
        Ok(self.mint_record(mint)?.authority)
    }

    fn decimals(&self, mint: &Pubkey) -> Result<u8> {
        Ok(self.mint_record(mint)?.decimals)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        let source = self.token_record(from)?.clone();
        let destination = self.token_record(to)?.clone();

        if source.owner != *authority {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        if source.mint != destination.mint {
            return Err(ProgramError::InvalidAccountData.into());
        }
        if source.amount < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }
        if from == to {
            return Ok(());
        }

        self.token_record_mut(from)?.amount = source.amount - amount;
        let credited = destination
            .amount
            .checked_add(amount)
            .ok_or(PoolErrorCode::ArithmeticOverflow)?;
        self.token_record_mut(to)?.amount = credited;
        Ok(())
    }

    fn mint_to(&mut self, mint: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        let record = self.mint_record(mint)?.clone();
        if record.authority != Some(*authority) {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        let destination = self.token_record(to)?.clone();
        if destination.mint != *mint {
            return Err(ProgramError::InvalidAccountData.into());
        }

        let supply = record
            .supply
            .checked_add(amount)
            .ok_or(PoolErrorCode::ArithmeticOverflow)?;
        let credited = destination
            .amount
            .checked_add(amount)
            .ok_or(PoolErrorCode::ArithmeticOverflow)?;
        self.mint_record_mut(mint)?.supply = supply;
        self.token_record_mut(to)?.amount = credited;
        Ok(())
    }

    fn burn(&mut self, from: &Pubkey, mint: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        let source = self.token_record(from)?.clone();
        let record = self.mint_record(mint)?.clone();

        if source.owner != *authority {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        if source.mint != *mint {
            return Err(ProgramError::InvalidAccountData.into());
        }
        if source.amount < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }

        self.token_record_mut(from)?.amount = source.amount - amount;
        self.mint_record_mut(mint)?.supply = record.supply - amount;
        Ok(())
    }
}

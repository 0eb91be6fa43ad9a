use anchor_lang::{prelude::*, solana_program::program_option::COption};
use anchor_spl::token::{self, Burn, Mint, MintTo, TokenAccount, Transfer};

use super::TokenLedger;
use crate::errors::PoolErrorCode;

/// `TokenLedger` over the SPL Token program.
///
/// Holds the account infos of one instruction. Balances are decoded from
/// account data on every read, so values observed after a CPI are current.
/// Any movement whose authority is the pool is signed with the pool seeds.
pub struct SplTokenLedger<'a, 'info> {
    token_program: AccountInfo<'info>,
    accounts: Vec<AccountInfo<'info>>,
    pool: Option<Pubkey>,
    pool_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> SplTokenLedger<'a, 'info> {
    pub fn new(token_program: AccountInfo<'info>, accounts: Vec<AccountInfo<'info>>) -> Self {
        Self {
            token_program,
            accounts,
            pool: None,
            pool_seeds: &[],
        }
    }

    pub fn with_pool_signer(mut self, pool: Pubkey, pool_seeds: &'a [&'a [u8]]) -> Self {
        self.pool = Some(pool);
        self.pool_seeds = pool_seeds;
        self
    }

    fn account(&self, key: &Pubkey) -> Result<AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|info| info.key == key)
            .cloned()
            .ok_or_else(|| error!(PoolErrorCode::AccountMismatch))
    }

    fn token_account(&self, key: &Pubkey) -> Result<TokenAccount> {
        let info = self.account(key)?;
        let data = info.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(account)
    }

    fn mint(&self, key: &Pubkey) -> Result<Mint> {
        let info = self.account(key)?;
        let data = info.try_borrow_data()?;
        let mint = Mint::try_deserialize(&mut &data[..])?;
        Ok(mint)
    }

    fn signs_as_pool(&self, authority: &Pubkey) -> bool {
        self.pool.as_ref() == Some(authority)
    }
}

impl<'a, 'info> TokenLedger for SplTokenLedger<'a, 'info> {
    fn balance(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.token_account(account)?.amount)
    }

    fn mint_of(&self, account: &Pubkey) -> Result<Pubkey> {
        Ok(self.token_account(account)?.mint)
    }

    fn owner_of(&self, account: &Pubkey) -> Result<Pubkey> {
        Ok(self.token_account(account)?.owner)
    }

    fn supply(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.mint(mint)?.supply)
    }

    fn mint_authority(&self, mint: &Pubkey) -> Result<Option<Pubkey>> {
        match self.mint(mint)?.mint_authority {
            COption::Some(authority) => Ok(Some(authority)),
            COption::None => Ok(None),
        }
    }

    fn decimals(&self, mint: &Pubkey) -> Result<u8> {
        Ok(self.mint(mint)?.decimals)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        let cpi_accounts = Transfer {
            from: self.account(from)?,
            to: self.account(to)?,
            authority: self.account(authority)?,
        };

        if self.signs_as_pool(authority) {
            let signer_seeds: &[&[&[u8]]] = &[self.pool_seeds];
            token::transfer(
                CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer_seeds),
                amount,
            )
        } else {
            token::transfer(
                CpiContext::new(self.token_program.clone(), cpi_accounts),
                amount,
            )
        }
    }

    fn mint_to(&mut self, mint: &Pubkey, to: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        require!(self.signs_as_pool(authority), PoolErrorCode::InvalidMintAuthority);

        let cpi_accounts = MintTo {
            mint: self.account(mint)?,
            to: self.account(to)?,
            authority: self.account(authority)?,
        };
        let signer_seeds: &[&[&[u8]]] = &[self.pool_seeds];
        token::mint_to(
            CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer_seeds),
            amount,
        )
    }

    fn burn(&mut self, from: &Pubkey, mint: &Pubkey, authority: &Pubkey, amount: u64) -> Result<()> {
        let cpi_accounts = Burn {
            mint: self.account(mint)?,
            from: self.account(from)?,
            authority: self.account(authority)?,
        };
        token::burn(
            CpiContext::new(self.token_program.clone(), cpi_accounts),
            amount,
        )
    }
}

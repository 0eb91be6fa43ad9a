#![allow(dead_code)]

use anchor_lang::{prelude::*, solana_program::program_error::ProgramError};
use liquidity_pool::{
    derivation::{self, VaultRole},
    errors::PoolErrorCode,
    instructions::{
        execute_swap, open_reserves, provide_liquidity, withdraw_liquidity, SwapDirection,
        SwapOutcome, Withdrawal,
    },
    ledger::{MemoryLedger, TokenLedger},
    math::ShareIssue,
    state::PoolState,
    validation::{Depositor, PoolKeys, Trader},
};

pub const FUNDING: u64 = 1_000_000_000_000;

/// An active pool on an in-memory ledger with one funded user, plus a
/// third mint that does not belong to the pool.
pub struct Harness {
    pub ledger: MemoryLedger,
    pub pool: PoolState,
    pub keys: PoolKeys,
    pub minter: Pubkey,
    pub foreign_mint: Pubkey,
    pub user: Depositor,
    pub user_foreign_account: Pubkey,
}

impl Harness {
    pub fn new() -> Self {
        let mut ledger = MemoryLedger::new();
        let minter = Pubkey::new_unique();
        let mint_x = Pubkey::new_unique();
        let mint_y = Pubkey::new_unique();
        let foreign_mint = Pubkey::new_unique();
        for mint in [mint_x, mint_y, foreign_mint] {
            ledger.create_mint(mint, Some(minter), 9).unwrap();
        }

        let (address, bump) = derivation::pool_address(mint_x, mint_y).unwrap();
        let mut pool = PoolState::default();
        pool.record(mint_x, mint_y, Pubkey::new_unique(), bump).unwrap();

        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        ledger.create_account(vault_a, pool.token_a, address).unwrap();
        ledger.create_account(vault_b, pool.token_b, address).unwrap();

        let share_mint = Pubkey::new_unique();
        ledger.create_mint(share_mint, Some(address), 9).unwrap();
        open_reserves(&ledger, &mut pool, address, vault_a, vault_b, share_mint).unwrap();

        let keys = PoolKeys::for_pool(&pool, address);
        let mut harness = Self {
            ledger,
            pool,
            keys,
            minter,
            foreign_mint,
            user: Depositor {
                authority: Pubkey::default(),
                token_a: Pubkey::default(),
                token_b: Pubkey::default(),
                shares: Pubkey::default(),
            },
            user_foreign_account: Pubkey::new_unique(),
        };
        harness.user = harness.new_depositor(FUNDING);

        let (foreign_account, authority) = (harness.user_foreign_account, harness.user.authority);
        harness
            .ledger
            .create_account(foreign_account, foreign_mint, authority)
            .unwrap();
        harness
            .ledger
            .mint_to(&foreign_mint, &foreign_account, &minter, FUNDING)
            .unwrap();
        harness
    }

    /// A new user holding `funding` of each pool asset and an empty share account.
    pub fn new_depositor(&mut self, funding: u64) -> Depositor {
        let depositor = Depositor {
            authority: Pubkey::new_unique(),
            token_a: Pubkey::new_unique(),
            token_b: Pubkey::new_unique(),
            shares: Pubkey::new_unique(),
        };
        let ledger = &mut self.ledger;
        ledger
            .create_account(depositor.token_a, self.keys.token_a_mint, depositor.authority)
            .unwrap();
        ledger
            .create_account(depositor.token_b, self.keys.token_b_mint, depositor.authority)
            .unwrap();
        ledger
            .create_account(depositor.shares, self.keys.lp_token_mint, depositor.authority)
            .unwrap();
        ledger
            .mint_to(&self.keys.token_a_mint, &depositor.token_a, &self.minter, funding)
            .unwrap();
        ledger
            .mint_to(&self.keys.token_b_mint, &depositor.token_b, &self.minter, funding)
            .unwrap();
        depositor
    }

    pub fn trader(&self) -> Trader {
        Trader {
            authority: self.user.authority,
            token_a: self.user.token_a,
            token_b: self.user.token_b,
        }
    }

    pub fn add(&mut self, deposit_a: u64, deposit_b: u64) -> Result<ShareIssue> {
        let depositor = self.user;
        self.add_as(&depositor, deposit_a, deposit_b)
    }

    pub fn add_as(&mut self, depositor: &Depositor, deposit_a: u64, deposit_b: u64) -> Result<ShareIssue> {
        let keys = self.keys;
        self.add_with(&keys, depositor, deposit_a, deposit_b)
    }

    pub fn add_with(
        &mut self,
        keys: &PoolKeys,
        depositor: &Depositor,
        deposit_a: u64,
        deposit_b: u64,
    ) -> Result<ShareIssue> {
        let pool = &self.pool;
        self.ledger.atomically(|ledger| {
            provide_liquidity(ledger, pool, keys, depositor, deposit_a, deposit_b)
        })
    }

    pub fn remove(&mut self, burn_shares: u64) -> Result<Withdrawal> {
        let depositor = self.user;
        self.remove_as(&depositor, burn_shares)
    }

    pub fn remove_as(&mut self, depositor: &Depositor, burn_shares: u64) -> Result<Withdrawal> {
        let keys = self.keys;
        self.remove_with(&keys, depositor, burn_shares)
    }

    pub fn remove_with(
        &mut self,
        keys: &PoolKeys,
        depositor: &Depositor,
        burn_shares: u64,
    ) -> Result<Withdrawal> {
        let pool = &self.pool;
        self.ledger.atomically(|ledger| {
            withdraw_liquidity(ledger, pool, keys, depositor, burn_shares)
        })
    }

    pub fn swap(&mut self, amount_in: u64, direction: SwapDirection) -> Result<SwapOutcome> {
        let (keys, trader) = (self.keys, self.trader());
        self.swap_with(&keys, &trader, amount_in, direction)
    }

    pub fn swap_with(
        &mut self,
        keys: &PoolKeys,
        trader: &Trader,
        amount_in: u64,
        direction: SwapDirection,
    ) -> Result<SwapOutcome> {
        let pool = &self.pool;
        self.ledger.atomically(|ledger| {
            execute_swap(ledger, pool, keys, trader, amount_in, direction)
        })
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.ledger.balance(account).unwrap()
    }

    pub fn reserves(&self) -> (u64, u64) {
        (
            self.balance(&self.keys.token_a_vault),
            self.balance(&self.keys.token_b_vault),
        )
    }

    pub fn total_shares(&self) -> u64 {
        self.ledger.supply(&self.keys.lp_token_mint).unwrap()
    }

    /// Every balance the pool's operations could touch.
    pub fn snapshot(&self) -> Vec<u64> {
        vec![
            self.balance(&self.keys.token_a_vault),
            self.balance(&self.keys.token_b_vault),
            self.balance(&self.user.token_a),
            self.balance(&self.user.token_b),
            self.balance(&self.user.shares),
            self.balance(&self.user_foreign_account),
            self.total_shares(),
        ]
    }
}

pub fn assert_pool_error<T: std::fmt::Debug>(result: Result<T>, expected: PoolErrorCode) {
    let err = result.expect_err("operation should fail");
    assert_eq!(
        ProgramError::from(err),
        ProgramError::Custom(expected.into())
    );
}

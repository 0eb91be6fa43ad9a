use anchor_lang::prelude::*;

use crate::{
    constants::{POOL_SEED, SHARE_DECIMALS},
    derivation::{self, VaultRole},
    errors::PoolErrorCode,
};

/// Byte offsets of the fixed-layout fields, discriminator included.
/// Off-chain readers filter on the discriminator and decode at these offsets.
pub const TOKEN_A_OFFSET: usize = 8;
pub const TOKEN_B_OFFSET: usize = TOKEN_A_OFFSET + 32;
pub const TOKEN_A_VAULT_OFFSET: usize = TOKEN_B_OFFSET + 32;
pub const TOKEN_B_VAULT_OFFSET: usize = TOKEN_A_VAULT_OFFSET + 32;
pub const LP_TOKEN_MINT_OFFSET: usize = TOKEN_B_VAULT_OFFSET + 32;
pub const OWNER_OFFSET: usize = LP_TOKEN_MINT_OFFSET + 32;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum PoolStatus {
    #[default]
    Uninitialized,
    RecordCreated,
    Active,
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct PoolState {
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub lp_token_mint: Pubkey,
    pub owner: Pubkey,
    pub bump: u8,
    pub token_a_vault_bump: u8,
    pub token_b_vault_bump: u8,
    pub status: PoolStatus,
}

/// Share mint as seen when reserves are attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareMintInfo {
    pub key: Pubkey,
    pub mint_authority: Option<Pubkey>,
    pub supply: u64,
    pub decimals: u8,
}

impl PoolState {
    pub fn is_active(&self) -> bool {
        self.status == PoolStatus::Active
    }

    /// Writes the canonical pair for a fresh record. Vaults and the share
    /// mint are attached later by `attach_reserves`.
    pub fn record(&mut self, mint_x: Pubkey, mint_y: Pubkey, owner: Pubkey, bump: u8) -> Result<()> {
        require!(
            self.status == PoolStatus::Uninitialized,
            PoolErrorCode::AlreadyInitialized
        );
        let (token_a, token_b) = derivation::sort_mints(mint_x, mint_y)?;

        self.token_a = token_a;
        self.token_b = token_b;
        self.owner = owner;
        self.bump = bump;
        self.status = PoolStatus::RecordCreated;
        Ok(())
    }

    /// Binds both vaults and the share mint, moving the pool to `Active`.
    pub fn attach_reserves(
        &mut self,
        pool_address: Pubkey,
        token_a_vault: Pubkey,
        token_b_vault: Pubkey,
        share_mint: ShareMintInfo,
    ) -> Result<()> {
        match self.status {
            PoolStatus::Uninitialized => return err!(PoolErrorCode::PoolNotInitialized),
            PoolStatus::Active => return err!(PoolErrorCode::AlreadyInitialized),
            PoolStatus::RecordCreated => {}
        }

        let (expected_a, bump_a) = derivation::vault_address(VaultRole::TokenA, &self.token_a);
        let (expected_b, bump_b) = derivation::vault_address(VaultRole::TokenB, &self.token_b);
        require_keys_eq!(token_a_vault, expected_a, PoolErrorCode::AccountMismatch);
        require_keys_eq!(token_b_vault, expected_b, PoolErrorCode::AccountMismatch);

        require_keys_neq!(share_mint.key, self.token_a, PoolErrorCode::AccountMismatch);
        require_keys_neq!(share_mint.key, self.token_b, PoolErrorCode::AccountMismatch);
        require!(
            share_mint.mint_authority == Some(pool_address),
            PoolErrorCode::InvalidMintAuthority
        );
        require!(share_mint.supply == 0, PoolErrorCode::NonZeroShareSupply);
        require!(
            share_mint.decimals == SHARE_DECIMALS,
            PoolErrorCode::InvalidShareDecimals
        );

        self.token_a_vault = token_a_vault;
        self.token_b_vault = token_b_vault;
        self.token_a_vault_bump = bump_a;
        self.token_b_vault_bump = bump_b;
        self.lp_token_mint = share_mint.key;
        self.status = PoolStatus::Active;
        Ok(())
    }

    pub fn signer_seeds(&self) -> [&[u8]; 4] {
        [
            POOL_SEED,
            self.token_a.as_ref(),
            self.token_b.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::{
        solana_program::program_error::ProgramError, AccountSerialize, Discriminator,
    };

    fn recorded_pool() -> (PoolState, Pubkey) {
        let mint_x = Pubkey::new_unique();
        let mint_y = Pubkey::new_unique();
        let (address, bump) = derivation::pool_address(mint_x, mint_y).unwrap();
        let mut pool = PoolState::default();
        pool.record(mint_x, mint_y, Pubkey::new_unique(), bump).unwrap();
        (pool, address)
    }

    fn share_mint_for(pool_address: Pubkey) -> ShareMintInfo {
        ShareMintInfo {
            key: Pubkey::new_unique(),
            mint_authority: Some(pool_address),
            supply: 0,
            decimals: SHARE_DECIMALS,
        }
    }

    #[test]
    fn record_stores_sorted_pair() {
        let mint_x = Pubkey::new_unique();
        let mint_y = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut pool = PoolState::default();

        pool.record(mint_y, mint_x, owner, 254).unwrap();

        assert!(pool.token_a < pool.token_b);
        assert_eq!(pool.owner, owner);
        assert_eq!(pool.bump, 254);
        assert_eq!(pool.status, PoolStatus::RecordCreated);
        assert!(!pool.is_active());
    }

    #[test]
    fn record_twice_is_rejected() {
        let (mut pool, _) = recorded_pool();
        let before = pool.clone();

        let result = pool.record(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), 1);

        assert!(result.is_err());
        assert_eq!(pool, before);
    }

    #[test]
    fn attach_reserves_activates_pool() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        let share_mint = share_mint_for(address);

        pool.attach_reserves(address, vault_a, vault_b, share_mint).unwrap();

        assert!(pool.is_active());
        assert_eq!(pool.lp_token_mint, share_mint.key);
        assert_eq!(
            derivation::vault_address_with_bump(VaultRole::TokenA, &pool.token_a, pool.token_a_vault_bump)
                .unwrap(),
            vault_a
        );
    }

    #[test]
    fn attach_reserves_requires_pool_mint_authority() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        let mut share_mint = share_mint_for(address);
        share_mint.mint_authority = Some(Pubkey::new_unique());

        assert!(pool.attach_reserves(address, vault_a, vault_b, share_mint).is_err());
        assert_eq!(pool.status, PoolStatus::RecordCreated);
    }

    #[test]
    fn attach_reserves_rejects_foreign_vault() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (foreign, _) = derivation::vault_address(VaultRole::TokenB, &Pubkey::new_unique());

        let result = pool.attach_reserves(address, vault_a, foreign, share_mint_for(address));

        assert!(result.is_err());
        assert_eq!(pool.status, PoolStatus::RecordCreated);
    }

    #[test]
    fn attach_reserves_rejects_existing_supply_and_second_call() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        let mut share_mint = share_mint_for(address);
        share_mint.supply = 1;
        assert!(pool.attach_reserves(address, vault_a, vault_b, share_mint).is_err());

        share_mint.supply = 0;
        pool.attach_reserves(address, vault_a, vault_b, share_mint).unwrap();
        assert!(pool.attach_reserves(address, vault_a, vault_b, share_mint).is_err());
    }

    #[test]
    fn attach_reserves_requires_share_decimals() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        let mut share_mint = share_mint_for(address);
        share_mint.decimals = 6;

        let err = pool
            .attach_reserves(address, vault_a, vault_b, share_mint)
            .unwrap_err();

        assert_eq!(
            ProgramError::from(err),
            ProgramError::Custom(PoolErrorCode::InvalidShareDecimals.into())
        );
        assert_eq!(pool.status, PoolStatus::RecordCreated);
    }

    #[test]
    fn attach_reserves_before_record_is_rejected() {
        let mut pool = PoolState::default();
        let result = pool.attach_reserves(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            share_mint_for(Pubkey::new_unique()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn serialized_layout_uses_fixed_offsets() {
        let (mut pool, address) = recorded_pool();
        let (vault_a, _) = derivation::vault_address(VaultRole::TokenA, &pool.token_a);
        let (vault_b, _) = derivation::vault_address(VaultRole::TokenB, &pool.token_b);
        let share_mint = share_mint_for(address);
        pool.attach_reserves(address, vault_a, vault_b, share_mint).unwrap();

        let mut data = Vec::new();
        pool.try_serialize(&mut data).unwrap();

        let field = |offset: usize| Pubkey::try_from(&data[offset..offset + 32]).unwrap();
        assert_eq!(&data[..8], &PoolState::discriminator());
        assert_eq!(field(TOKEN_A_OFFSET), pool.token_a);
        assert_eq!(field(TOKEN_B_OFFSET), pool.token_b);
        assert_eq!(field(TOKEN_A_VAULT_OFFSET), vault_a);
        assert_eq!(field(TOKEN_B_VAULT_OFFSET), vault_b);
        assert_eq!(field(LP_TOKEN_MINT_OFFSET), share_mint.key);
        assert_eq!(field(OWNER_OFFSET), pool.owner);
        assert_eq!(data.len(), 8 + PoolState::INIT_SPACE);
    }
}

use anchor_lang::prelude::*;

pub mod constants;
pub mod derivation;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod quote;
pub mod state;
pub mod validation;

use instructions::*;

declare_id!("6B3R49vpRz7Kx5zjxBNa5mLGhDwJQGGfaWhhKdA5TAy");

#[program]
pub mod liquidity_pool {
    use super::*;

    pub fn create_pool(ctx: Context<CreatePool>) -> Result<()> {
        instructions::create_pool(ctx)
    }

    pub fn initialize_reserves(ctx: Context<InitializeReserves>) -> Result<()> {
        instructions::initialize_reserves(ctx)
    }

    pub fn add_liquidity(ctx: Context<Liquidity>, deposit_a: u64, deposit_b: u64) -> Result<()> {
        instructions::add_liquidity(ctx, deposit_a, deposit_b)
    }

    pub fn remove_liquidity(ctx: Context<Liquidity>, burn_shares: u64) -> Result<()> {
        instructions::remove_liquidity(ctx, burn_shares)
    }

    pub fn swap_exact(ctx: Context<Swap>, amount_in: u64, direction: SwapDirection) -> Result<()> {
        instructions::swap_exact(ctx, amount_in, direction)
    }
}

pub mod initialization;
pub mod liquidity;
pub mod swap;

pub use initialization::*;
pub use liquidity::*;
pub use swap::*;

pub mod pool_state;

pub use pool_state::*;

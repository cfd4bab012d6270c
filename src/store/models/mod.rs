pub mod state;
pub mod user_bot;

pub use state::*;
pub use user_bot::*;

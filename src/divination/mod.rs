//! Liu Yao hexagram engine.
//!
//! Turns six three-coin throws into lines, trigrams and hexagrams. Everything
//! here is pure: no I/O, no shared state, identical input gives identical
//! output.

pub mod engine;
pub mod tables;
pub mod types;
pub mod validate;

pub use engine::*;
pub use tables::TrigramKind;
pub use types::*;
pub use validate::CoinThrows;

use thiserror::Error;

/// Caller contract violations on coin-throw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DivinationError {
    #[error("Six coin throws are required, got {0}")]
    WrongThrowCount(usize),

    #[error("Throw {throw} needs exactly 3 coins, got {coins}")]
    WrongCoinCount { throw: usize, coins: usize },

    #[error("Throw {throw} has coin value {value}; only 0 (tails) and 1 (heads) are allowed")]
    InvalidCoinValue { throw: usize, value: u8 },
}

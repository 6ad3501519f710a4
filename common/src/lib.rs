//! fxgate Common Types
//!
//! This crate contains shared types used across fxgate, including currency
//! codes, directional pairs, trade records, and the clock abstraction that
//! keeps expiry logic testable.

pub mod clock;
pub mod currency;
pub mod trade;

pub use clock::*;
pub use currency::*;
pub use trade::*;

//! Koenigsberg rules engine library.
//!
//! Exposes the board representation, move generation, resolver, and protocol
//! modules for use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod dice;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod resolve;

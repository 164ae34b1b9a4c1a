//! Core types and trait definitions for the Odonto dental chart.
//!
//! This crate is deliberately free of database and I/O dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod backend;
pub mod chart;
pub mod condition;
pub mod error;
pub mod surface;
pub mod tooth;
pub mod wire;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;

//! Core types and trait definitions for the officiating manager.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; the auto-assignment planner in
//! [`engine`] is a pure function over catalog snapshots.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod classify;
pub mod engine;
pub mod error;
pub mod meet;
pub mod official;
pub mod organization;
pub mod store;

pub use error::{Error, Fault, Result};

//! Core types, rules and trait definitions for the Staffbell HR notifier.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! birthday and salary rules are pure functions of an [`employee::Employee`]
//! and an explicit "today"; everything that touches storage goes through the
//! [`store::StaffStore`] trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod delivery;
pub mod employee;
pub mod error;
pub mod notification;
pub mod rules;
pub mod scan;
pub mod store;

pub use error::{Error, Result};

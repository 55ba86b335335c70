// SPDX-License-Identifier: MIT

//! arbiter-rs evaluates declarative decision trees against data records.
//!
//! - `engine`: action abstraction and error types
//! - `arbiter`: conditions, decision node evaluation, built-in actions,
//!   configuration and the HTTP server

pub mod arbiter;
pub mod engine;

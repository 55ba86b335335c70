// SPDX-License-Identifier: MIT

pub mod action;
pub mod error;

pub use action::{Action, ActionExecutor, ActionKind, ActionResult};
pub use error::{ArbiterError, Result};

// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod export;
pub mod fitbit;
pub mod pkce;
pub mod session;
pub mod sleep;

pub use fitbit::{FitbitClient, SleepService};
pub use pkce::PkcePair;
pub use session::{SessionState, SharedSession, TokenPair};

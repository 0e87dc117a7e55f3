//! Session domain module.
//!
//! This module defines the auth-gated navigation state machine.

pub mod state_machine;

pub use state_machine::{SessionAction, SessionEvent, SessionState, SessionStateMachine};

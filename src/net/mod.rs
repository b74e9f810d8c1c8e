//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, in-flight limit)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bounded in-flight requests prevent resource exhaustion
//! - Address errors are reported before any socket is opened

pub mod listener;

pub use listener::{bind, limit_in_flight, InFlightLimit, ListenerError};

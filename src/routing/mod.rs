//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (pattern, handler) pairs
//!     → registry.rs (compile once, keep registration order)
//!     → Freeze as immutable Router
//!
//! Incoming Request (method, path)
//!     → canonical.rs (decode path, "<METHOD> <PATH>")
//!     → router.rs (scan entries in order)
//!     → matcher.rs (search pattern in key)
//!     → Return: matched handler or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: first registered pattern that matches wins
//! - Patterns are searched for, not anchored, unless they anchor themselves

pub mod canonical;
pub mod handler;
pub mod matcher;
pub mod registry;
pub mod router;

pub use canonical::{canonical_key, DecodedPath};
pub use handler::{BoxedHandler, Handler};
pub use matcher::PatternError;
pub use registry::{InvalidPatternPolicy, Registry, RouteEntry};
pub use router::{Resolution, Router};

//! Pattern-routed HTTP file server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net (listener, in-flight limit)
//!                      ──▶ http (server, request ID, timeout)
//!                           ──▶ routing ("<METHOD> <PATH>" against ordered patterns)
//!                                ──▶ files (read / create / update handlers)
//!     Client Response ◀──────────────────────────────────────────────┘
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Handlers
pub mod files;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Registry, Router};

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load .env → Load config → Validate → Read credentials → Start loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → monitor loop exits between awaits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No drain step: an in-flight cycle is simply abandoned

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::spawn_signal_listener;

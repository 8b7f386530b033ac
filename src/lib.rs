//! Connectivity health monitor library.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod monitor;
pub mod notify;
pub mod observability;
pub mod resilience;

pub use config::schema::MonitorConfig;
pub use health::HealthState;
pub use lifecycle::Shutdown;
pub use monitor::{Monitor, MonitorSession};

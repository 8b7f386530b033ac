//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!
//! environment (.env or process env)
//!     → credentials.rs (bot token, chat id)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets never live in the config file

pub mod credentials;
pub mod loader;
pub mod schema;
pub mod validation;

pub use credentials::{ChatId, CredentialsError, TelegramCredentials};
pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AlertConfig;
pub use schema::LogFormat;
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProbeConfig;
pub use schema::TelegramConfig;
pub use schema::ThresholdsConfig;

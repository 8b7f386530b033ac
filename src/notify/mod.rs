//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! prior state, new state
//!     → gate.rs (self-transition? cooldown for this exact pair?)
//!     → message.rs (compose summary text)
//!     → sender.rs trait → telegram.rs (Bot API delivery)
//! ```
//!
//! # Design Decisions
//! - Cooldown gates notification only, never state tracking
//! - Delivery failures are logged, not retried within the cooldown

pub mod gate;
pub mod message;
pub mod sender;
pub mod telegram;

pub use gate::{AlertLedger, Transition};
pub use message::compose_alert;
pub use sender::NotificationSender;
pub use telegram::{TelegramClient, TelegramError, TelegramSender};

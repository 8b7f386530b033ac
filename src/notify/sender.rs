//! Outbound notification seam.

use std::future::Future;

/// Delivers one alert message.
///
/// Implementations never error: every failure (transport, non-2xx,
/// timeout) is logged and reported as `false`, and the call returns in
/// bounded time.
pub trait NotificationSender {
    fn send(&self, text: &str) -> impl Future<Output = bool> + Send;
}

//! Notification gating and emission.
//!
//! Whether to notify is a pure function of the clock, the last-notified
//! instant, and the enabled flag; the engine threads the durable pieces in
//! and out of [`NotifyState`](crate::state::NotifyState). Presentation is
//! someone else's job: this module stops at emitting an event through the
//! [`Notifier`] trait.

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::info;

/// Minimum spacing between notifications.
pub const NOTIFICATION_INTERVAL: Duration = Duration::hours(24);

/// Decide whether a notification should be shown now.
///
/// True when notifications are enabled and either none was ever shown or the
/// last one is at least 24 hours old.
#[must_use]
pub fn should_notify(
    now: OffsetDateTime,
    last_notified: Option<OffsetDateTime>,
    enabled: bool,
) -> bool {
    if !enabled {
        return false;
    }

    match last_notified {
        None => true,
        Some(last) => now - last >= NOTIFICATION_INTERVAL,
    }
}

/// The day-0 summary carried by a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationEvent {
    /// Short condition description.
    pub description: String,
    /// Daily maximum temperature.
    pub max_temp: f64,
    /// Daily minimum temperature.
    pub min_temp: f64,
    /// Numeric condition code.
    pub condition_id: i64,
}

/// Sink for notification events.
///
/// The display layer supplies its own implementation; the default
/// [`LogNotifier`] just records the event in the log stream.
pub trait Notifier: Send + Sync {
    /// Deliver one notification event.
    fn notify(&self, event: &NotificationEvent);
}

/// A notifier that writes events to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &NotificationEvent) {
        info!(
            "Forecast: {} - high {:.0} / low {:.0} (condition {})",
            event.description, event.max_temp, event.min_temp, event.condition_id
        );
    }
}

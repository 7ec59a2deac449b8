//! Single-slot, self-dismissing notifications.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timers::{TimerSlot, TimerTask, Timers};

/// How long a notification stays fully visible.
pub const DEFAULT_DISPLAY: Duration = Duration::from_millis(3000);

/// How long the fade-out lasts before the notification is gone.
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

/// Tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

/// Where a notification is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Visible,
    Fading,
}

/// A message shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub phase: NotificationPhase,
    /// Identifies this instance; a newer notification always has a larger seq.
    pub seq: u64,
}

/// Display and fade durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub display: Duration,
    pub fade: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY,
            fade: DEFAULT_FADE,
        }
    }
}

/// Holds the one notification currently on screen.
///
/// Showing a notification replaces the current one and reschedules the
/// notification timer slot, so a superseded notification's timers never
/// fire. Timer tasks also carry the seq they were scheduled for and are
/// ignored when it no longer matches.
#[derive(Debug, Default)]
pub struct NotificationChannel {
    current: Option<Notification>,
    next_seq: u64,
    timing: NotificationTiming,
}

impl NotificationChannel {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            current: None,
            next_seq: 1,
            timing,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Show a notification, replacing whatever is on screen.
    ///
    /// Returns the new notification's seq.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        timers: &mut Timers,
        now: Duration,
    ) -> u64 {
        let seq = self.next_seq.max(1);
        self.next_seq = seq + 1;

        let message = message.into();
        if let Some(previous) = &self.current {
            tracing::debug!(previous = previous.seq, seq, "replacing notification");
        }
        tracing::debug!(seq, ?kind, %message, "showing notification");

        self.current = Some(Notification {
            message,
            kind,
            phase: NotificationPhase::Visible,
            seq,
        });
        timers.schedule(
            TimerSlot::Notification,
            now,
            self.timing.display,
            TimerTask::DismissNotification { seq },
        );
        seq
    }

    /// Start fading notification `seq` out. Returns whether anything changed.
    pub fn begin_fade(&mut self, seq: u64, timers: &mut Timers, now: Duration) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.seq != seq || current.phase != NotificationPhase::Visible {
            tracing::trace!(seq, current = current.seq, "ignoring stale dismiss");
            return false;
        }

        current.phase = NotificationPhase::Fading;
        timers.schedule(
            TimerSlot::Notification,
            now,
            self.timing.fade,
            TimerTask::ClearNotification { seq },
        );
        true
    }

    /// Remove notification `seq`. Returns whether anything changed.
    pub fn clear(&mut self, seq: u64) -> bool {
        match &self.current {
            Some(current) if current.seq == seq => {
                self.current = None;
                tracing::debug!(seq, "notification cleared");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run(channel: &mut NotificationChannel, timers: &mut Timers, now: Duration) {
        while let Some(due) = timers.pop_due(now) {
            match due.task {
                TimerTask::DismissNotification { seq } => {
                    channel.begin_fade(seq, timers, due.deadline);
                }
                TimerTask::ClearNotification { seq } => {
                    channel.clear(seq);
                }
                TimerTask::NavigateHome => {}
            }
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut channel = NotificationChannel::new(NotificationTiming::default());
        let mut timers = Timers::new();

        let seq = channel.show("Item added to bag.", NotificationKind::Success, &mut timers, ms(0));
        assert_eq!(channel.current().unwrap().phase, NotificationPhase::Visible);

        run(&mut channel, &mut timers, ms(2999));
        assert_eq!(channel.current().unwrap().phase, NotificationPhase::Visible);

        run(&mut channel, &mut timers, ms(3000));
        let current = channel.current().unwrap();
        assert_eq!(current.phase, NotificationPhase::Fading);
        assert_eq!(current.seq, seq);

        run(&mut channel, &mut timers, ms(3299));
        assert!(channel.current().is_some());
        run(&mut channel, &mut timers, ms(3300));
        assert!(channel.current().is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn test_new_notification_supersedes_old() {
        let mut channel = NotificationChannel::new(NotificationTiming::default());
        let mut timers = Timers::new();

        channel.show("first", NotificationKind::Success, &mut timers, ms(0));
        let second = channel.show("second", NotificationKind::Error, &mut timers, ms(2000));

        // The first notification's deadlines pass without effect.
        run(&mut channel, &mut timers, ms(3300));
        let current = channel.current().unwrap();
        assert_eq!(current.seq, second);
        assert_eq!(current.message, "second");
        assert_eq!(current.phase, NotificationPhase::Visible);

        run(&mut channel, &mut timers, ms(5300));
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_stale_seq_is_ignored() {
        let mut channel = NotificationChannel::new(NotificationTiming::default());
        let mut timers = Timers::new();

        let first = channel.show("first", NotificationKind::Success, &mut timers, ms(0));
        let second = channel.show("second", NotificationKind::Success, &mut timers, ms(10));

        assert!(!channel.begin_fade(first, &mut timers, ms(3000)));
        assert!(!channel.clear(first));
        assert_eq!(channel.current().unwrap().seq, second);
        assert!(second > first);
    }

    #[test]
    fn test_fade_schedules_clear() {
        let mut channel = NotificationChannel::new(NotificationTiming {
            display: ms(50),
            fade: ms(20),
        });
        let mut timers = Timers::new();

        let seq = channel.show("hi", NotificationKind::Success, &mut timers, ms(0));
        assert_eq!(timers.deadline(&TimerSlot::Notification), Some(ms(50)));

        assert!(channel.begin_fade(seq, &mut timers, ms(50)));
        assert_eq!(timers.deadline(&TimerSlot::Notification), Some(ms(70)));
        assert!(!channel.begin_fade(seq, &mut timers, ms(55)));
    }
}

//! Notification sink contract and desktop backend.
//!
//! # Responsibility
//! - Define the opaque fire-and-forget sink the reminder loop posts to.
//! - Deliver reminders through the operating system's notification service.
//!
//! # Invariants
//! - Delivery is never confirmed and never retried; a failed post is
//!   logged and otherwise ignored.
//! - Sink calls carry no user data beyond the task name in the body.

use log::warn;
use notify_rust::{Notification, Timeout};
use std::time::Duration;

/// Fixed title of every reminder notification.
pub const REMINDER_TITLE: &str = "Gentle Reminder";
/// How long a reminder stays on screen.
pub const REMINDER_TIMEOUT: Duration = Duration::from_secs(10);

/// External notification sink: accepts (title, message, timeout) and
/// returns nothing. Implementations must not block the caller for longer
/// than delivery itself takes.
pub trait NotificationSink {
    fn notify(&self, title: &str, message: &str, timeout: Duration);
}

/// Sink backed by the desktop environment's notification service.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, timeout: Duration) {
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let result = Notification::new()
            .summary(title)
            .body(message)
            .timeout(Timeout::Milliseconds(millis))
            .show();

        if let Err(err) = result {
            warn!("event=notify_post module=notify status=error error={err}");
        }
    }
}

/// Posts the reminder for one fired task in the fixed payload shape:
/// title [`REMINDER_TITLE`], body `Task: <name>`, timeout
/// [`REMINDER_TIMEOUT`].
pub fn send_task_reminder(sink: &dyn NotificationSink, task_name: &str) {
    sink.notify(
        REMINDER_TITLE,
        &format!("Task: {task_name}"),
        REMINDER_TIMEOUT,
    );
}

#[cfg(test)]
mod tests {
    use super::{send_task_reminder, NotificationSink, REMINDER_TITLE};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        posts: Mutex<Vec<(String, String, Duration)>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, title: &str, message: &str, timeout: Duration) {
            self.posts
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string(), timeout));
        }
    }

    #[test]
    fn reminder_payload_matches_fixed_shape() {
        let sink = RecordingSink::default();
        send_task_reminder(&sink, "Water plants");

        let posts = sink.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        let (title, message, timeout) = &posts[0];
        assert_eq!(title, REMINDER_TITLE);
        assert_eq!(message, "Task: Water plants");
        assert_eq!(*timeout, Duration::from_secs(10));
    }
}

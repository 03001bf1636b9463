//! Notification slot allocation
//!
//! Single-notification mode reuses a fixed slot so each new notification
//! overwrites the previous one; multi-notification mode draws a fresh
//! pseudo-random 32-bit id per call. Random ids carry an accepted,
//! low-probability collision risk; no collision detection is performed.

use rand::Rng;

use crate::message::Message;
use crate::resolver;
use crate::settings::NotificationSettings;

/// The fixed slot used whenever multiple notifications are disabled
pub const DEFAULT_NOTIFICATION_ID: i32 = 0;

/// Allocate the notification slot for a message.
///
/// A vetoed build (see [`resolver::resolve`]) also maps to the fixed slot,
/// matching the rest of the pipeline which short-circuits on veto anyway.
pub fn allocate(message: &Message, settings: &NotificationSettings, foreground: bool) -> i32 {
    let resolved = match resolver::resolve(message, settings, foreground) {
        Some(resolved) => resolved,
        None => return DEFAULT_NOTIFICATION_ID,
    };

    if resolved.multiple_notifications {
        rand::thread_rng().gen()
    } else {
        DEFAULT_NOTIFICATION_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(multiple: bool) -> NotificationSettings {
        NotificationSettings::builder()
            .display_enabled(true)
            .callback_target("app://inbox")
            .multiple_notifications(multiple)
            .build()
    }

    #[test]
    fn test_fixed_slot_when_multiple_disabled() {
        let message = Message::new("m-1", "Hello");
        let settings = settings(false);

        for _ in 0..10 {
            assert_eq!(allocate(&message, &settings, false), DEFAULT_NOTIFICATION_ID);
        }
    }

    #[test]
    fn test_fixed_slot_on_veto() {
        let message = Message::new("m-1", ""); // blank body vetoes
        assert_eq!(
            allocate(&message, &settings(true), false),
            DEFAULT_NOTIFICATION_ID
        );
    }

    #[test]
    fn test_random_ids_when_multiple_enabled() {
        let message = Message::new("m-1", "Hello");
        let settings = settings(true);

        // Not required to differ, but 20 consecutive identical draws from a
        // 32-bit space would indicate a broken generator.
        let ids: Vec<i32> = (0..20)
            .map(|_| allocate(&message, &settings, false))
            .collect();
        let first = ids[0];
        assert!(ids.iter().any(|id| *id != first));
    }
}

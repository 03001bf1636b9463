//! Settings resolution - the display veto gate
//!
//! Every construction step derives its veto decision through this module.
//! The function is pure: the same message + settings + foreground state
//! always yields the same outcome, so callers may re-derive it freely and
//! must treat a `None` result as terminal for the whole build.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::message::Message;
use crate::platform::IconRef;
use crate::settings::NotificationSettings;
use crate::util::is_blank;

/// Settings that survived the veto gate, ready for construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSettings {
    pub default_title: String,
    pub default_icon: IconRef,
    pub auto_cancel: bool,
    pub multiple_notifications: bool,
    pub callback_target: String,
    pub intent_flags: u32,
    pub pending_intent_flags: u32,
}

/// Decide whether a notification may be displayed at all.
///
/// Returns `None` (veto) when any of the following holds:
/// - the display-notification feature is disabled
/// - no callback target is configured
/// - the message body is blank
/// - the application is in foreground and foreground suppression is on
///
/// A veto is a normal decision, not an error; it logs at trace level only.
pub fn resolve(
    message: &Message,
    settings: &NotificationSettings,
    foreground: bool,
) -> Option<ResolvedSettings> {
    if !settings.display_enabled {
        trace!(message_id = %message.message_id, "Display disabled, vetoing notification");
        return None;
    }

    let callback_target = match settings.callback_target.as_deref() {
        Some(target) if !is_blank(Some(target)) => target.to_string(),
        _ => {
            trace!(message_id = %message.message_id, "No callback target configured, vetoing notification");
            return None;
        }
    };

    if message.has_blank_body() {
        trace!(message_id = %message.message_id, "Blank message body, vetoing notification");
        return None;
    }

    if foreground && settings.foreground_suppressed {
        trace!(message_id = %message.message_id, "App in foreground with suppression on, vetoing notification");
        return None;
    }

    Some(ResolvedSettings {
        default_title: settings.default_title.clone(),
        default_icon: settings.default_icon.clone(),
        auto_cancel: settings.auto_cancel,
        multiple_notifications: settings.multiple_notifications,
        callback_target,
        intent_flags: settings.intent_flags,
        pending_intent_flags: settings.pending_intent_flags,
    })
}

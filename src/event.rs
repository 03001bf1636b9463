//! 广播事件定义
//!
//! 引擎通过 [`Broadcaster`] 把结构化事件发布给应用层，
//! fire-and-forget，不等待确认。

use serde_json::Value;

/// 引擎产生的所有事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// 收到入站消息（payload: message）
    MessageReceived,
    /// 通知被普通点击（payload: message + callback_target + intent_flags）
    NotificationTapped,
    /// 交互动作被触发（payload: category + action_id + notification_id + message）
    NotificationActionTapped,
}

impl Event {
    /// 事件键（应用层按此订阅）
    pub fn key(&self) -> &'static str {
        match self {
            Event::MessageReceived => "message.received",
            Event::NotificationTapped => "notification.tapped",
            Event::NotificationActionTapped => "notification.action_tapped",
        }
    }
}

/// 事件 payload 字段名
pub mod param {
    pub const MESSAGE: &str = "message";
    pub const NOTIFICATION_ID: &str = "notification_id";
    pub const ACTION_ID: &str = "action_id";
    pub const CATEGORY: &str = "category";
    pub const CALLBACK_TARGET: &str = "callback_target";
    pub const INTENT_FLAGS: &str = "intent_flags";
}

/// 事件广播协作方
pub trait Broadcaster: Send + Sync {
    /// 发布事件（fire-and-forget）
    fn publish(&self, event: &str, payload: Value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_keys() {
        assert_eq!(Event::MessageReceived.key(), "message.received");
        assert_eq!(Event::NotificationTapped.key(), "notification.tapped");
        assert_eq!(
            Event::NotificationActionTapped.key(),
            "notification.action_tapped"
        );
    }
}

//! 推送消息数据模型
//!
//! `Message` 由传输层解析生成，引擎侧只读消费。
//! 构建通知时所有字段都不会被修改。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::is_blank;

/// 入站推送消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// 消息 ID（由后端分配）
    pub message_id: String,
    /// 标题（可选，为空时使用设置中的默认标题）
    pub title: Option<String>,
    /// 消息正文
    pub body: String,
    /// 交互分类 ID（可选）
    pub category: Option<String>,
    /// 图标资源名（可选）
    pub icon: Option<String>,
    /// 声音资源名（可选）
    pub sound: Option<String>,
    /// 是否请求震动
    #[serde(default)]
    pub vibrate: bool,
    /// 是否使用系统默认提示音
    #[serde(default)]
    pub default_sound: bool,
    /// 内容图片 URL（可选，用于大图样式）
    pub content_url: Option<String>,
    /// 接收时间戳
    pub received_at: DateTime<Utc>,
    /// 自定义 payload（透传给应用层）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<serde_json::Value>,
}

impl Message {
    /// 创建最小消息
    pub fn new(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            title: None,
            body: body.into(),
            category: None,
            icon: None,
            sound: None,
            vibrate: false,
            default_sound: false,
            content_url: None,
            received_at: Utc::now(),
            custom_payload: None,
        }
    }

    /// 设置标题（链式调用）
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 设置交互分类
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 设置图标资源名
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// 设置声音资源名
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// 请求震动
    pub fn with_vibrate(mut self, vibrate: bool) -> Self {
        self.vibrate = vibrate;
        self
    }

    /// 使用默认提示音
    pub fn with_default_sound(mut self, default_sound: bool) -> Self {
        self.default_sound = default_sound;
        self
    }

    /// 设置内容图片 URL
    pub fn with_content_url(mut self, url: impl Into<String>) -> Self {
        self.content_url = Some(url.into());
        self
    }

    /// 设置接收时间戳
    pub fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    /// 设置自定义 payload
    pub fn with_custom_payload(mut self, payload: serde_json::Value) -> Self {
        self.custom_payload = Some(payload);
        self
    }

    /// 正文是否为空白
    pub fn has_blank_body(&self) -> bool {
        is_blank(Some(&self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder_chain() {
        let msg = Message::new("m-1", "Hello")
            .with_title("Greeting")
            .with_category("chat")
            .with_vibrate(true)
            .with_content_url("https://example.com/pic.png");

        assert_eq!(msg.message_id, "m-1");
        assert_eq!(msg.body, "Hello");
        assert_eq!(msg.title, Some("Greeting".to_string()));
        assert_eq!(msg.category, Some("chat".to_string()));
        assert!(msg.vibrate);
        assert_eq!(msg.content_url, Some("https://example.com/pic.png".to_string()));
    }

    #[test]
    fn test_message_defaults() {
        let msg = Message::new("m-2", "body");
        assert!(msg.title.is_none());
        assert!(msg.category.is_none());
        assert!(!msg.vibrate);
        assert!(!msg.default_sound);
        assert!(msg.custom_payload.is_none());
    }

    #[test]
    fn test_has_blank_body() {
        assert!(Message::new("m", "").has_blank_body());
        assert!(Message::new("m", "   ").has_blank_body());
        assert!(!Message::new("m", "Hello").has_blank_body());
    }

    #[test]
    fn test_message_serialization_roundtrip() {
        let msg = Message::new("m-3", "body")
            .with_custom_payload(serde_json::json!({"deeplink": "/orders/42"}));

        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_message_deserialization_missing_flags() {
        // 传输层可能省略布尔字段，应落回 false
        let json = r#"{
            "message_id": "m-4",
            "title": null,
            "body": "text",
            "category": null,
            "icon": null,
            "sound": null,
            "content_url": null,
            "received_at": "2026-02-24T08:20:52Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert!(!msg.vibrate);
        assert!(!msg.default_sound);
    }
}

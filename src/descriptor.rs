//! 通知描述符 - 构建器的输出
//!
//! 完整描述一条待渲染的通知：内容、样式、声音、动作，
//! 以及每个可点击位置绑定的 pending 引用。描述符是瞬态的，
//! 由展示调用和动作路由立即消费。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::InteractiveCategory;
use crate::message::Message;
use crate::platform::IconRef;

/// 通知样式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationStyle {
    /// 大段文本样式：正文全文 + 标题
    BigText { big_text: String, big_title: String },
    /// 大图样式：图片字节 + 标题 + 摘要（正文）
    BigPicture {
        picture: Vec<u8>,
        big_title: String,
        summary: String,
    },
}

/// 声音设定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SoundSpec {
    /// 平台默认提示音
    Default,
    /// 自定义声音资源（已解析）
    Named(String),
    /// 静音
    None,
}

/// pending 引用 - 点击路由上下文的不透明令牌
///
/// 原生平台里这是一个 PendingIntent；此处抽象为携带完整
/// 路由上下文的值，动作路由器可以无损还原。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PendingReference {
    /// 普通点击（非交互）
    ContentTap {
        message: Message,
        callback_target: String,
        intent_flags: u32,
        pending_intent_flags: u32,
    },
    /// 交互动作点击
    Action {
        category: InteractiveCategory,
        action_id: String,
        notification_id: i32,
        message: Message,
    },
}

/// 已解析的动作描述符
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// 动作 ID
    pub action_id: String,
    /// 展示标题
    pub title: String,
    /// 动作图标
    pub icon: String,
    /// 绑定的路由引用
    pub reference: PendingReference,
}

/// 通知描述符
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationDescriptor {
    /// 通知槽位 ID
    pub notification_id: i32,
    /// 标题
    pub title: String,
    /// 正文
    pub body: String,
    /// 样式
    pub style: NotificationStyle,
    /// 声音
    pub sound: SoundSpec,
    /// 是否震动
    pub vibrate: bool,
    /// 小图标
    pub icon: IconRef,
    /// 动作列表（有序，无匹配分类时为空）
    pub actions: Vec<ActionDescriptor>,
    /// 普通点击的路由引用
    pub content_tap: PendingReference,
    /// 点击后自动消除
    pub auto_cancel: bool,
    /// 消息接收时间
    pub timestamp: DateTime<Utc>,
}

impl NotificationDescriptor {
    /// 描述符是否带图片样式
    pub fn has_picture(&self) -> bool {
        matches!(self.style, NotificationStyle::BigPicture { .. })
    }
}

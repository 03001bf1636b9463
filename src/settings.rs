//! 通知全局设置
//!
//! 每次展示决策前从持久化配置加载一份，构建过程中保持不变。

use serde::{Deserialize, Serialize};

use crate::config::{keys, ConfigStore};
use crate::platform::IconRef;

/// 默认通知标题
pub const DEFAULT_TITLE: &str = "Notification";

/// 默认图标资源名
pub const DEFAULT_ICON: &str = "ic_notification";

/// 通知全局设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// 是否启用通知展示
    pub display_enabled: bool,
    /// 默认标题（消息无标题时使用）
    pub default_title: String,
    /// 默认图标
    pub default_icon: IconRef,
    /// 应用在前台时是否抑制通知
    pub foreground_suppressed: bool,
    /// 点击后是否自动消除通知
    pub auto_cancel: bool,
    /// 是否允许多条并发通知（否则复用固定槽位）
    pub multiple_notifications: bool,
    /// 点击通知后的回调导航目标（未配置则不展示）
    pub callback_target: Option<String>,
    /// 透传给平台 intent 的标志位
    pub intent_flags: u32,
    /// 透传给 pending 引用的标志位
    pub pending_intent_flags: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            display_enabled: true,
            default_title: DEFAULT_TITLE.to_string(),
            default_icon: IconRef::new(DEFAULT_ICON),
            foreground_suppressed: false,
            auto_cancel: true,
            multiple_notifications: false,
            callback_target: None,
            intent_flags: 0,
            pending_intent_flags: 0,
        }
    }
}

impl NotificationSettings {
    /// 创建设置构建器
    pub fn builder() -> NotificationSettingsBuilder {
        NotificationSettingsBuilder::new()
    }

    /// 从配置存储加载设置
    ///
    /// 未配置的键使用文档化默认值，见 [`crate::config::keys`]。
    pub fn from_config(store: &dyn ConfigStore) -> Self {
        let defaults = Self::default();
        Self {
            display_enabled: store.get_bool(keys::DISPLAY_ENABLED, defaults.display_enabled),
            default_title: store.get_string(keys::DEFAULT_TITLE, &defaults.default_title),
            default_icon: IconRef::new(store.get_string(keys::DEFAULT_ICON, DEFAULT_ICON)),
            foreground_suppressed: store
                .get_bool(keys::FOREGROUND_SUPPRESSED, defaults.foreground_suppressed),
            auto_cancel: store.get_bool(keys::AUTO_CANCEL, defaults.auto_cancel),
            multiple_notifications: store
                .get_bool(keys::MULTIPLE_NOTIFICATIONS, defaults.multiple_notifications),
            callback_target: store.get_optional_string(keys::CALLBACK_TARGET),
            intent_flags: store.get_u32(keys::INTENT_FLAGS, defaults.intent_flags),
            pending_intent_flags: store
                .get_u32(keys::PENDING_INTENT_FLAGS, defaults.pending_intent_flags),
        }
    }
}

/// 设置构建器
#[derive(Debug, Default)]
pub struct NotificationSettingsBuilder {
    settings: NotificationSettings,
}

impl NotificationSettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: NotificationSettings::default(),
        }
    }

    /// 是否启用通知展示
    pub fn display_enabled(mut self, enabled: bool) -> Self {
        self.settings.display_enabled = enabled;
        self
    }

    /// 默认标题
    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.settings.default_title = title.into();
        self
    }

    /// 默认图标
    pub fn default_icon(mut self, icon: impl Into<String>) -> Self {
        self.settings.default_icon = IconRef::new(icon);
        self
    }

    /// 前台抑制
    pub fn foreground_suppressed(mut self, suppressed: bool) -> Self {
        self.settings.foreground_suppressed = suppressed;
        self
    }

    /// 自动消除
    pub fn auto_cancel(mut self, auto_cancel: bool) -> Self {
        self.settings.auto_cancel = auto_cancel;
        self
    }

    /// 多通知模式
    pub fn multiple_notifications(mut self, enabled: bool) -> Self {
        self.settings.multiple_notifications = enabled;
        self
    }

    /// 回调导航目标
    pub fn callback_target(mut self, target: impl Into<String>) -> Self {
        self.settings.callback_target = Some(target.into());
        self
    }

    /// intent 标志位
    pub fn intent_flags(mut self, flags: u32) -> Self {
        self.settings.intent_flags = flags;
        self
    }

    /// pending 引用标志位
    pub fn pending_intent_flags(mut self, flags: u32) -> Self {
        self.settings.pending_intent_flags = flags;
        self
    }

    pub fn build(self) -> NotificationSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigStore;

    #[test]
    fn test_settings_defaults() {
        let settings = NotificationSettings::default();
        assert!(settings.display_enabled);
        assert!(settings.auto_cancel);
        assert!(!settings.multiple_notifications);
        assert!(!settings.foreground_suppressed);
        assert_eq!(settings.default_title, "Notification");
        assert!(settings.callback_target.is_none());
    }

    #[test]
    fn test_settings_builder() {
        let settings = NotificationSettings::builder()
            .display_enabled(true)
            .default_title("App")
            .callback_target("app://inbox")
            .multiple_notifications(true)
            .build();

        assert_eq!(settings.default_title, "App");
        assert_eq!(settings.callback_target, Some("app://inbox".to_string()));
        assert!(settings.multiple_notifications);
    }

    #[test]
    fn test_settings_from_empty_config_uses_defaults() {
        let store = MemoryConfigStore::new();
        let settings = NotificationSettings::from_config(&store);
        assert_eq!(settings, NotificationSettings::default());
    }

    #[test]
    fn test_settings_from_config() {
        let store = MemoryConfigStore::new()
            .with(keys::DISPLAY_ENABLED, serde_json::json!(false))
            .with(keys::DEFAULT_TITLE, serde_json::json!("My App"))
            .with(keys::MULTIPLE_NOTIFICATIONS, serde_json::json!(true))
            .with(keys::CALLBACK_TARGET, serde_json::json!("app://home"));

        let settings = NotificationSettings::from_config(&store);
        assert!(!settings.display_enabled);
        assert_eq!(settings.default_title, "My App");
        assert!(settings.multiple_notifications);
        assert_eq!(settings.callback_target, Some("app://home".to_string()));
        // 未配置的键保持默认
        assert!(settings.auto_cancel);
    }
}

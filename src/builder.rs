//! 通知构建器 - 管道核心
//!
//! 把一条入站消息 + 设置快照 + 分类快照组装成展示就绪的
//! [`NotificationDescriptor`]。每个构建步骤都独立地重新推导
//! 展示否决（见 [`crate::resolver`]），任何一步否决即整体返回 None。
//!
//! 依赖外部权限 / 资源的步骤失败时只做降级（静默关闭震动、
//! 图标回落默认值、图片回落文本样式），不会中止构建。

use std::sync::Arc;

use tracing::{debug, error};

use crate::category::CategorySnapshot;
use crate::descriptor::{
    ActionDescriptor, NotificationDescriptor, NotificationStyle, PendingReference, SoundSpec,
};
use crate::error::PipelineError;
use crate::message::Message;
use crate::platform::{Capability, IconRef, PermissionChecker, ResourceResolver};
use crate::picture::PictureFetcher;
use crate::resolver::{self, ResolvedSettings};
use crate::settings::NotificationSettings;
use crate::util::{is_blank, is_not_blank};

/// 通知构建器
pub struct NotificationBuilder {
    picture_fetcher: Arc<dyn PictureFetcher>,
    permissions: Arc<dyn PermissionChecker>,
    resources: Arc<dyn ResourceResolver>,
}

impl NotificationBuilder {
    pub fn new(
        picture_fetcher: Arc<dyn PictureFetcher>,
        permissions: Arc<dyn PermissionChecker>,
        resources: Arc<dyn ResourceResolver>,
    ) -> Self {
        Self {
            picture_fetcher,
            permissions,
            resources,
        }
    }

    /// 构建通知描述符
    ///
    /// 返回 None 表示本条消息被否决，调用方应跳过展示。
    /// 分类快照在构建开始前由调用方取好，构建期间不会重读注册表。
    pub fn build(
        &self,
        message: &Message,
        settings: &NotificationSettings,
        categories: &CategorySnapshot,
        notification_id: i32,
        foreground: bool,
    ) -> Option<NotificationDescriptor> {
        let resolved = resolver::resolve(message, settings, foreground)?;

        // 1. 标题：消息标题非空白则用之，否则用默认标题
        let title = self.select_title(message, &resolved);

        // 2. 样式：有图用大图，无图 / 下载失败用大段文本
        let style = self.select_style(message, &title);

        // 3. 声音与震动（独立重推否决）
        let (sound, vibrate) = self.select_sound_and_vibrate(message, settings, foreground)?;

        // 4. 图标（独立重推否决）
        let icon = self.select_icon(message, settings, foreground)?;

        // 5. 动作：匹配到交互分类则按声明顺序生成，否则为空
        let actions = self.build_actions(message, categories, notification_id);

        // 6. 自动消除 / 时间戳
        let descriptor = NotificationDescriptor {
            notification_id,
            title,
            body: message.body.clone(),
            style,
            sound,
            vibrate,
            icon,
            actions,
            content_tap: PendingReference::ContentTap {
                message: message.clone(),
                callback_target: resolved.callback_target.clone(),
                intent_flags: resolved.intent_flags,
                pending_intent_flags: resolved.pending_intent_flags,
            },
            auto_cancel: resolved.auto_cancel,
            timestamp: message.received_at,
        };

        debug!(
            message_id = %message.message_id,
            notification_id,
            actions = descriptor.actions.len(),
            picture = descriptor.has_picture(),
            "Built notification descriptor"
        );

        Some(descriptor)
    }

    fn select_title(&self, message: &Message, resolved: &ResolvedSettings) -> String {
        match message.title.as_deref() {
            Some(title) if is_not_blank(Some(title)) => title.to_string(),
            _ => resolved.default_title.clone(),
        }
    }

    fn select_style(&self, message: &Message, title: &str) -> NotificationStyle {
        let picture = message
            .content_url
            .as_deref()
            .and_then(|url| self.picture_fetcher.fetch(url));

        match picture {
            Some(picture) => NotificationStyle::BigPicture {
                picture,
                big_title: title.to_string(),
                summary: message.body.clone(),
            },
            None => NotificationStyle::BigText {
                big_text: message.body.clone(),
                big_title: title.to_string(),
            },
        }
    }

    fn select_sound_and_vibrate(
        &self,
        message: &Message,
        settings: &NotificationSettings,
        foreground: bool,
    ) -> Option<(SoundSpec, bool)> {
        resolver::resolve(message, settings, foreground)?;

        let vibrate = if !message.vibrate {
            false
        } else if self.permissions.has_permission(Capability::Vibrate) {
            true
        } else {
            let e = PipelineError::Configuration {
                permission: Capability::Vibrate.as_str().to_string(),
            };
            error!(message_id = %message.message_id, error = %e, "Unable to vibrate");
            false
        };

        // 默认音优先：default_sound 为真或未给声音名时用平台默认音
        let sound = if message.default_sound || is_blank(message.sound.as_deref()) {
            SoundSpec::Default
        } else {
            let name = message.sound.as_deref().unwrap_or_default();
            match self.resources.resolve_sound(name) {
                Some(resolved) => SoundSpec::Named(resolved),
                None => {
                    error!(
                        message_id = %message.message_id,
                        sound = %name,
                        "Cannot resolve sound resource, notification will be silent"
                    );
                    SoundSpec::None
                }
            }
        };

        Some((sound, vibrate))
    }

    fn select_icon(
        &self,
        message: &Message,
        settings: &NotificationSettings,
        foreground: bool,
    ) -> Option<IconRef> {
        let resolved = resolver::resolve(message, settings, foreground)?;

        let icon = match message.icon.as_deref() {
            Some(name) if is_not_blank(Some(name)) => self
                .resources
                .resolve_icon(name)
                .unwrap_or(resolved.default_icon),
            _ => resolved.default_icon,
        };

        Some(icon)
    }

    fn build_actions(
        &self,
        message: &Message,
        categories: &CategorySnapshot,
        notification_id: i32,
    ) -> Vec<ActionDescriptor> {
        let category = match categories.find(message.category.as_deref()) {
            Some(category) => category,
            None => return Vec::new(),
        };

        category
            .actions
            .iter()
            .map(|action| ActionDescriptor {
                action_id: action.action_id.clone(),
                title: action.title.clone(),
                icon: action.icon.clone(),
                reference: PendingReference::Action {
                    category: category.clone(),
                    action_id: action.action_id.clone(),
                    notification_id,
                    message: message.clone(),
                },
            })
            .collect()
    }
}

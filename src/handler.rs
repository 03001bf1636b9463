//! 消息处理管道 - 入站消息的端到端入口
//!
//! 收到消息后依次：广播 message.received 事件 -> 设置解析（可否决）
//! -> 分配通知槽位 -> 构建描述符 -> 调用平台展示。展示失败只记录
//! 日志，不向外传播。
//!
//! 构建包含图片下载，会阻塞当前线程最多 max_retries 次网络往返，
//! 调用方需保证不在 UI 线程上处理消息。

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::json;
use tracing::{error, info, trace};

use crate::builder::NotificationBuilder;
use crate::category::CategoryRegistry;
use crate::event::{param, Broadcaster, Event};
use crate::message::Message;
use crate::platform::{ForegroundMonitor, NotificationDisplay, PermissionChecker, ResourceResolver};
use crate::picture::PictureFetcher;
use crate::router::ActionRouter;
use crate::settings::NotificationSettings;
use crate::{config::ConfigStore, id_allocator};

/// 消息处理器 - 持有全部协作方并驱动单条消息的展示决策
pub struct MessageHandler {
    config: Arc<dyn ConfigStore>,
    registry: Arc<CategoryRegistry>,
    builder: NotificationBuilder,
    display: Arc<dyn NotificationDisplay>,
    broadcaster: Arc<dyn Broadcaster>,
    foreground: Arc<dyn ForegroundMonitor>,
}

impl std::fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageHandler").finish_non_exhaustive()
    }
}

impl MessageHandler {
    /// 创建处理器构建器
    pub fn builder() -> MessageHandlerBuilder {
        MessageHandlerBuilder::default()
    }

    /// 处理一条入站消息
    ///
    /// 返回展示成功时的通知槽位 ID；被否决或展示失败返回 None。
    pub fn handle_message(&self, message: &Message) -> Option<i32> {
        info!(message_id = %message.message_id, "Handling inbound message");

        // 消息到达事件总是广播，与是否展示无关
        self.broadcaster.publish(
            Event::MessageReceived.key(),
            json!({ param::MESSAGE: message }),
        );

        // 每次展示决策加载一份设置快照，构建期间不再重读
        let settings = NotificationSettings::from_config(self.config.as_ref());
        let categories = self.registry.snapshot();
        let foreground = self.foreground.is_foreground();

        let notification_id = id_allocator::allocate(message, &settings, foreground);
        let descriptor =
            match self
                .builder
                .build(message, &settings, &categories, notification_id, foreground)
            {
                Some(descriptor) => descriptor,
                None => {
                    trace!(message_id = %message.message_id, "Notification vetoed, skipping display");
                    return None;
                }
            };

        match self.display.show(notification_id, &descriptor) {
            Ok(()) => {
                info!(
                    message_id = %message.message_id,
                    notification_id,
                    "Notification displayed"
                );
                Some(notification_id)
            }
            Err(e) => {
                // 平台展示失败（如安全异常）不重试
                error!(message_id = %message.message_id, error = %e, "Unable to display notification");
                None
            }
        }
    }

    /// 取与本处理器共用广播协作方的动作路由器
    pub fn action_router(&self) -> ActionRouter {
        ActionRouter::new(self.broadcaster.clone())
    }

    /// 分类注册表（配置更新入口）
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }
}

/// 处理器构建器 - 组装全部协作方
#[derive(Default)]
pub struct MessageHandlerBuilder {
    config: Option<Arc<dyn ConfigStore>>,
    registry: Option<Arc<CategoryRegistry>>,
    picture_fetcher: Option<Arc<dyn PictureFetcher>>,
    permissions: Option<Arc<dyn PermissionChecker>>,
    resources: Option<Arc<dyn ResourceResolver>>,
    display: Option<Arc<dyn NotificationDisplay>>,
    broadcaster: Option<Arc<dyn Broadcaster>>,
    foreground: Option<Arc<dyn ForegroundMonitor>>,
}

impl MessageHandlerBuilder {
    pub fn config(mut self, config: Arc<dyn ConfigStore>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn registry(mut self, registry: Arc<CategoryRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn picture_fetcher(mut self, fetcher: Arc<dyn PictureFetcher>) -> Self {
        self.picture_fetcher = Some(fetcher);
        self
    }

    pub fn permissions(mut self, permissions: Arc<dyn PermissionChecker>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn resources(mut self, resources: Arc<dyn ResourceResolver>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn display(mut self, display: Arc<dyn NotificationDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn broadcaster(mut self, broadcaster: Arc<dyn Broadcaster>) -> Self {
        self.broadcaster = Some(broadcaster);
        self
    }

    pub fn foreground(mut self, foreground: Arc<dyn ForegroundMonitor>) -> Self {
        self.foreground = Some(foreground);
        self
    }

    /// 组装处理器，缺少任何协作方时报错
    pub fn build(self) -> Result<MessageHandler> {
        let config = self.config.ok_or_else(|| anyhow!("config store is required"))?;
        let registry = self
            .registry
            .ok_or_else(|| anyhow!("category registry is required"))?;
        let picture_fetcher = self
            .picture_fetcher
            .ok_or_else(|| anyhow!("picture fetcher is required"))?;
        let permissions = self
            .permissions
            .ok_or_else(|| anyhow!("permission checker is required"))?;
        let resources = self
            .resources
            .ok_or_else(|| anyhow!("resource resolver is required"))?;
        let display = self
            .display
            .ok_or_else(|| anyhow!("notification display is required"))?;
        let broadcaster = self
            .broadcaster
            .ok_or_else(|| anyhow!("broadcaster is required"))?;
        let foreground = self
            .foreground
            .ok_or_else(|| anyhow!("foreground monitor is required"))?;

        Ok(MessageHandler {
            config,
            registry,
            builder: NotificationBuilder::new(picture_fetcher, permissions, resources),
            display,
            broadcaster,
            foreground,
        })
    }
}

//! 动作路由器 - 把点击还原为结构化事件
//!
//! pending 引用在构建时绑定了完整路由上下文；点击激活时本模块
//! 将其还原为 [`ActionDispatch`] 并通过广播协作方重新发布，
//! 应用层据此消除通知、标记消息已处理或执行导航。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::category::InteractiveCategory;
use crate::descriptor::PendingReference;
use crate::event::{param, Broadcaster, Event};
use crate::message::Message;

/// 还原后的点击分派
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionDispatch {
    /// 普通点击：只携带消息与导航目标
    ContentTap {
        message: Message,
        callback_target: String,
        intent_flags: u32,
    },
    /// 交互动作点击：携带完整分类（不只是 id）
    Action {
        category: InteractiveCategory,
        action_id: String,
        notification_id: i32,
        message: Message,
    },
}

/// 动作路由器
pub struct ActionRouter {
    broadcaster: Arc<dyn Broadcaster>,
}

impl ActionRouter {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 路由一次点击激活
    ///
    /// 还原引用中绑定的上下文，发布对应事件，并返回分派结果。
    pub fn route(&self, reference: &PendingReference) -> ActionDispatch {
        match reference {
            PendingReference::ContentTap {
                message,
                callback_target,
                intent_flags,
                ..
            } => {
                debug!(
                    message_id = %message.message_id,
                    callback_target = %callback_target,
                    "Routing notification tap"
                );

                let payload = json!({
                    param::MESSAGE: message,
                    param::CALLBACK_TARGET: callback_target,
                    param::INTENT_FLAGS: intent_flags,
                });
                self.broadcaster
                    .publish(Event::NotificationTapped.key(), payload);

                ActionDispatch::ContentTap {
                    message: message.clone(),
                    callback_target: callback_target.clone(),
                    intent_flags: *intent_flags,
                }
            }

            PendingReference::Action {
                category,
                action_id,
                notification_id,
                message,
            } => {
                if !category.actions.iter().any(|a| &a.action_id == action_id) {
                    // 引用总是由构建器绑定，理论上不会出现未知动作；
                    // 真出现时照常路由，交给应用层判断。
                    warn!(
                        category_id = %category.category_id,
                        action_id = %action_id,
                        "Triggered action id not found in bound category"
                    );
                }

                debug!(
                    category_id = %category.category_id,
                    action_id = %action_id,
                    notification_id,
                    "Routing notification action"
                );

                let payload = json!({
                    param::CATEGORY: category,
                    param::ACTION_ID: action_id,
                    param::NOTIFICATION_ID: notification_id,
                    param::MESSAGE: message,
                });
                self.broadcaster
                    .publish(Event::NotificationActionTapped.key(), payload);

                ActionDispatch::Action {
                    category: category.clone(),
                    action_id: action_id.clone(),
                    notification_id: *notification_id,
                    message: message.clone(),
                }
            }
        }
    }
}

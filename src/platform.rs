//! 平台协作方接口
//!
//! 引擎通过这些窄接口访问操作系统能力：通知渲染、权限检查、
//! 资源查找、前后台状态。生产环境由平台适配层实现，测试中用 mock。

use serde::{Deserialize, Serialize};

use crate::descriptor::NotificationDescriptor;
use crate::error::PipelineError;

/// 图标引用（平台资源的抽象句柄）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// 可检查的平台能力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// 震动权限
    Vibrate,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Vibrate => "vibrate",
        }
    }
}

/// 权限检查协作方
pub trait PermissionChecker: Send + Sync {
    /// 当前进程是否拥有指定能力
    fn has_permission(&self, capability: Capability) -> bool;
}

/// 资源查找协作方（按名称解析图标 / 声音）
pub trait ResourceResolver: Send + Sync {
    /// 解析图标资源名，找不到返回 None
    fn resolve_icon(&self, name: &str) -> Option<IconRef>;

    /// 解析声音资源名，找不到返回 None
    fn resolve_sound(&self, name: &str) -> Option<String>;
}

/// 前后台状态协作方
pub trait ForegroundMonitor: Send + Sync {
    /// 应用当前是否处于前台
    fn is_foreground(&self) -> bool;
}

/// 通知渲染协作方（平台展示原语）
pub trait NotificationDisplay: Send + Sync {
    /// 展示通知。失败（如权限不足）由调用方记录日志，不向外传播。
    fn show(&self, notification_id: i32, descriptor: &NotificationDescriptor)
        -> Result<(), PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_ref() {
        let icon = IconRef::new("ic_chat");
        assert_eq!(icon.name(), "ic_chat");
        assert_eq!(icon, IconRef::new("ic_chat"));
    }

    #[test]
    fn test_capability_as_str() {
        assert_eq!(Capability::Vibrate.as_str(), "vibrate");
    }
}

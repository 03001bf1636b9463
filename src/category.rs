//! 交互分类注册表
//!
//! 一个交互分类把 category id 映射到一组有序的快捷动作。
//! 注册表使用 copy-on-write 快照：构建线程在开始时取一次快照，
//! 之后的配置更新不会影响进行中的构建（避免 TOCTOU）。

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::is_blank;

/// 通知上的一个快捷动作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// 动作 ID（在其所属分类内唯一）
    pub action_id: String,
    /// 动作标题
    pub title: String,
    /// 动作图标资源名
    pub icon: String,
    /// 触发时是否把应用带到前台
    #[serde(default)]
    pub brings_app_to_foreground: bool,
}

impl NotificationAction {
    pub fn new(
        action_id: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            action_id: action_id.into(),
            title: title.into(),
            icon: icon.into(),
            brings_app_to_foreground: false,
        }
    }

    /// 标记为前台动作（链式调用）
    pub fn foreground(mut self) -> Self {
        self.brings_app_to_foreground = true;
        self
    }
}

/// 交互分类：category id -> 有序动作列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveCategory {
    /// 分类 ID（注册表内唯一）
    pub category_id: String,
    /// 动作列表（声明顺序即展示顺序）
    pub actions: Vec<NotificationAction>,
}

impl InteractiveCategory {
    pub fn new(category_id: impl Into<String>, actions: Vec<NotificationAction>) -> Self {
        Self {
            category_id: category_id.into(),
            actions,
        }
    }
}

/// 分类注册表
///
/// 初始状态为「未设置」哨兵：在显式配置之前，任何查找都返回 None。
/// 读写并发安全；写入整体替换分类集合，后注册的同名分类覆盖先注册的。
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    categories: RwLock<Option<Arc<Vec<InteractiveCategory>>>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换分类集合
    ///
    /// 重复的 category id 保留最后一个，维持 id 唯一性不变量。
    pub fn set_categories(&self, categories: Vec<InteractiveCategory>) {
        let mut deduped: Vec<InteractiveCategory> = Vec::with_capacity(categories.len());
        for category in categories {
            if let Some(existing) = deduped
                .iter_mut()
                .find(|c| c.category_id == category.category_id)
            {
                debug!(category_id = %category.category_id, "Duplicate category id, keeping last");
                *existing = category;
            } else {
                deduped.push(category);
            }
        }

        let mut guard = self.categories.write().expect("category registry lock poisoned");
        *guard = Some(Arc::new(deduped));
    }

    /// 清空为「未设置」状态
    pub fn clear(&self) {
        let mut guard = self.categories.write().expect("category registry lock poisoned");
        *guard = None;
    }

    /// 取当前快照（廉价 Arc 克隆，读不阻塞写）
    pub fn snapshot(&self) -> CategorySnapshot {
        let guard = self.categories.read().expect("category registry lock poisoned");
        CategorySnapshot {
            categories: guard.clone(),
        }
    }
}

/// 注册表在某一时刻的不可变快照
#[derive(Debug, Clone)]
pub struct CategorySnapshot {
    categories: Option<Arc<Vec<InteractiveCategory>>>,
}

impl CategorySnapshot {
    /// 空快照（未设置哨兵）
    pub fn unset() -> Self {
        Self { categories: None }
    }

    /// 从分类列表直接构造快照（测试和单次构建场景）
    pub fn from_categories(categories: Vec<InteractiveCategory>) -> Self {
        Self {
            categories: Some(Arc::new(categories)),
        }
    }

    /// 按 category id 精确查找
    ///
    /// 空白 id 直接短路返回 None；未设置哨兵状态下恒返回 None。
    /// 只做整串相等比较，无前缀或模糊匹配。
    pub fn find(&self, category_id: Option<&str>) -> Option<&InteractiveCategory> {
        let category_id = match category_id {
            Some(id) if !is_blank(Some(id)) => id,
            _ => return None,
        };

        let categories = self.categories.as_ref()?;
        categories.iter().find(|c| c.category_id == category_id)
    }

    /// 快照是否处于未设置状态
    pub fn is_unset(&self) -> bool {
        self.categories.is_none()
    }
}

//! 分类持久化 - 本地 JSON 文件读写
//!
//! 分类集合的序列化格式由本模块拥有，注册表核心不感知存储细节。

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::category::{CategoryRegistry, InteractiveCategory};

/// JSON 文件分类存储
#[derive(Debug, Clone)]
pub struct JsonCategoryStore {
    path: PathBuf,
}

impl JsonCategoryStore {
    /// 默认存储文件路径
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("push-pipeline")
            .join("categories.json")
    }

    /// 使用指定路径创建存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用默认路径创建存储
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取持久化的分类集合
    ///
    /// 文件不存在返回 None（对应注册表的「未设置」哨兵），
    /// 文件损坏按未设置处理并记录日志。
    pub fn load(&self) -> Result<Option<Vec<InteractiveCategory>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(categories) => Ok(Some(categories)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Category file is corrupt, treating as unset");
                Ok(None)
            }
        }
    }

    /// 写入分类集合（带文件锁 + 临时文件原子替换）
    pub fn save(&self, categories: &[InteractiveCategory]) -> Result<()> {
        use fs2::FileExt;

        // 确保目录存在
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 对目标文件加独占锁，防止并发写互相覆盖
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)?;
        lock_file.lock_exclusive()?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut temp_file = File::create(&temp_path)?;
            writeln!(temp_file, "{}", serde_json::to_string_pretty(categories)?)?;
        }

        // 原子替换
        fs::rename(&temp_path, &self.path)?;

        lock_file.unlock()?;
        Ok(())
    }

    /// 把持久化的分类加载进注册表
    ///
    /// 未设置时不动注册表（保持哨兵状态）。
    pub fn load_into(&self, registry: &CategoryRegistry) -> Result<()> {
        if let Some(categories) = self.load()? {
            registry.set_categories(categories);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::NotificationAction;

    fn sample_categories() -> Vec<InteractiveCategory> {
        vec![
            InteractiveCategory::new(
                "chat",
                vec![
                    NotificationAction::new("reply", "Reply", "ic_reply").foreground(),
                    NotificationAction::new("dismiss", "Dismiss", "ic_dismiss"),
                ],
            ),
            InteractiveCategory::new(
                "offer",
                vec![NotificationAction::new("view", "View", "ic_view").foreground()],
            ),
        ]
    }

    #[test]
    fn test_load_missing_file_is_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCategoryStore::new(dir.path().join("categories.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCategoryStore::new(dir.path().join("categories.json"));

        let categories = sample_categories();
        store.save(&categories).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, categories);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCategoryStore::new(dir.path().join("nested").join("categories.json"));
        store.save(&sample_categories()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_treated_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonCategoryStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_load_into_registry() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCategoryStore::new(dir.path().join("categories.json"));
        store.save(&sample_categories()).unwrap();

        let registry = CategoryRegistry::new();
        store.load_into(&registry).unwrap();

        let snapshot = registry.snapshot();
        assert!(snapshot.find(Some("chat")).is_some());
        assert!(snapshot.find(Some("offer")).is_some());
    }

    #[test]
    fn test_load_into_registry_keeps_sentinel_when_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCategoryStore::new(dir.path().join("categories.json"));

        let registry = CategoryRegistry::new();
        store.load_into(&registry).unwrap();
        assert!(registry.snapshot().is_unset());
    }
}

//! 持久化配置存储
//!
//! 引擎把配置视为一张只读的命名选项表，所有键都有文档化默认值。
//! 引擎自身从不写配置。

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;
use tracing::warn;

/// 配置键与默认值
///
/// | 键 | 默认值 |
/// |---|---|
/// | `notification.display.enabled` | `true` |
/// | `notification.default.title` | `"Notification"` |
/// | `notification.default.icon` | `"ic_notification"` |
/// | `notification.foreground.suppressed` | `false` |
/// | `notification.auto.cancel` | `true` |
/// | `notification.multiple.enabled` | `false` |
/// | `notification.callback.target` | 无 |
/// | `notification.intent.flags` | `0` |
/// | `notification.pending.intent.flags` | `0` |
/// | `fetch.max.retry.count` | `3` |
pub mod keys {
    pub const DISPLAY_ENABLED: &str = "notification.display.enabled";
    pub const DEFAULT_TITLE: &str = "notification.default.title";
    pub const DEFAULT_ICON: &str = "notification.default.icon";
    pub const FOREGROUND_SUPPRESSED: &str = "notification.foreground.suppressed";
    pub const AUTO_CANCEL: &str = "notification.auto.cancel";
    pub const MULTIPLE_NOTIFICATIONS: &str = "notification.multiple.enabled";
    pub const CALLBACK_TARGET: &str = "notification.callback.target";
    pub const INTENT_FLAGS: &str = "notification.intent.flags";
    pub const PENDING_INTENT_FLAGS: &str = "notification.pending.intent.flags";
    pub const MAX_RETRY_COUNT: &str = "fetch.max.retry.count";
}

/// 图片下载默认重试次数
pub const DEFAULT_MAX_RETRY_COUNT: u32 = 3;

/// 配置存储 trait
///
/// 只要求一个原始读取方法，类型化访问由默认方法提供。
pub trait ConfigStore: Send + Sync {
    /// 读取原始配置值，未配置返回 None
    fn get(&self, key: &str) -> Option<Value>;

    /// 读取布尔选项
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// 读取字符串选项
    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| default.to_string())
    }

    /// 读取可选字符串（未配置即 None）
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// 读取无符号整数选项
    fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key)
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }
}

/// 内存配置存储（测试和嵌入场景用）
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: HashMap<String, Value>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置一个选项（链式调用）
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

/// JSON 文件配置存储
///
/// 启动时整体读入一个扁平 JSON 对象，之后不再碰磁盘。
/// 文件缺失或损坏时按空配置处理（全部默认值）。
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    values: HashMap<String, Value>,
}

impl JsonConfigStore {
    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("push-pipeline")
            .join("config.json")
    }

    /// 从指定路径加载
    pub fn load(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                values: HashMap::new(),
            });
        }

        let content = fs::read_to_string(path)?;
        let parsed: Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file is not valid JSON, using defaults");
                return Ok(Self {
                    values: HashMap::new(),
                });
            }
        };

        let values = match parsed {
            Value::Object(map) => map.into_iter().collect(),
            _ => {
                warn!(path = %path.display(), "Config file is not a JSON object, using defaults");
                HashMap::new()
            }
        };

        Ok(Self { values })
    }

    /// 从默认路径加载
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path())
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

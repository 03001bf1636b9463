//! 内容图片下载
//!
//! 阻塞式下载通知大图，失败时在固定重试预算内立即重试（无退避延迟，
//! 与原有行为保持一致）。全部失败返回 None，通知退化为纯文本样式。

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, warn};

use crate::config::{keys, ConfigStore, DEFAULT_MAX_RETRY_COUNT};
use crate::error::PipelineError;
use crate::util::is_blank;

/// HTTP 请求超时（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 图片下载协作方
pub trait PictureFetcher: Send + Sync {
    /// 下载图片字节。URL 为空白或全部尝试失败时返回 None。
    fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// 阻塞式 HTTP 图片下载器
#[derive(Debug)]
pub struct HttpPictureFetcher {
    client: reqwest::blocking::Client,
    max_retries: u32,
}

impl HttpPictureFetcher {
    /// 创建下载器
    pub fn new(max_retries: u32) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            max_retries,
        })
    }

    /// 从配置存储读取重试次数创建下载器
    pub fn from_config(store: &dyn ConfigStore) -> Result<Self> {
        let max_retries = store.get_u32(keys::MAX_RETRY_COUNT, DEFAULT_MAX_RETRY_COUNT);
        Self::new(max_retries)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let bytes = response.bytes()?;
        Ok(bytes.to_vec())
    }
}

impl PictureFetcher for HttpPictureFetcher {
    fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        if is_blank(Some(url)) {
            return None;
        }

        for attempt in 1..=self.max_retries {
            match self.download(url) {
                Ok(bytes) => {
                    debug!(url = %url, attempt, bytes = bytes.len(), "Fetched notification picture");
                    return Some(bytes);
                }
                Err(e) => {
                    warn!(url = %url, attempt, error = %e, "Picture download attempt failed");
                }
            }
        }

        let fetch_error = PipelineError::Fetch {
            url: url.to_string(),
            attempts: self.max_retries,
        };
        error!(error = %fetch_error, "Giving up on notification picture");
        None
    }
}

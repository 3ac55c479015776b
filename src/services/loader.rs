//! 数据加载服务 - 业务能力层
//!
//! 只负责"取回并扁平化题目文档"，一次只读请求，不重试、不设超时

use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::Dataset;
use crate::services::flatten::flatten_document;

/// 数据来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// http(s) 地址
    Remote(String),
    /// 本地文件路径
    Local(PathBuf),
}

impl DataSource {
    /// 以 http:// 或 https:// 开头的视为远程地址，其余视为本地路径
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Remote(source.to_string())
        } else {
            DataSource::Local(PathBuf::from(source))
        }
    }
}

/// 数据加载器
pub struct DataLoader {
    label: String,
    source: DataSource,
    client: reqwest::Client,
}

impl DataLoader {
    /// 创建新的数据加载器
    pub fn new(source: &str) -> Self {
        Self {
            label: source.to_string(),
            source: DataSource::parse(source),
            client: reqwest::Client::new(),
        }
    }

    /// 加载的资源路径（原样，用于错误提示）
    pub fn source_label(&self) -> &str {
        &self.label
    }

    /// 取回原始文本
    pub async fn fetch_body(&self) -> Result<String, LoadError> {
        match &self.source {
            DataSource::Remote(url) => {
                debug!("GET {}", url);
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| LoadError::RequestFailed {
                        url: url.clone(),
                        source: e,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::BadStatus {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|e| LoadError::RequestFailed {
                    url: url.clone(),
                    source: e,
                })
            }
            DataSource::Local(path) => {
                debug!("读取本地文件 {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::ReadFailed {
                        path: path.display().to_string(),
                        source: e,
                    })
            }
        }
    }

    /// 取回、解析并扁平化
    pub async fn load(&self) -> Result<Dataset, LoadError> {
        let body = self.fetch_body().await?;
        let dataset = parse_dataset(&body, &self.label)?;
        info!("✓ 已从 {} 加载 {} 道题目", self.label, dataset.len());
        Ok(dataset)
    }
}

/// 解析 JSON 文本并扁平化为数据集
pub fn parse_dataset(body: &str, origin: &str) -> Result<Dataset, LoadError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| LoadError::JsonParseFailed {
            origin: origin.to_string(),
            source: e,
        })?;
    Ok(Dataset::new(flatten_document(document)?))
}

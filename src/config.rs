use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;
use crate::workflow::View;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_VAR: &str = "QUESTION_VIEWER_CONFIG";

/// 程序配置
///
/// 取值顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题目 JSON 的地址，http(s) 地址或本地路径
    pub data_source: String,
    /// 导出的 HTML 文件
    pub output_html: String,
    /// 单题外部文档路径前缀
    pub link_prefix: String,
    /// 单题外部文档扩展名
    pub link_extension: String,
    /// 是否启用公式排版 (MathJax)
    pub typeset_enabled: bool,
    /// 导出时激活的视图
    #[serde(deserialize_with = "deserialize_view")]
    pub initial_view: View,
    /// 导出时的科目筛选
    pub subject_filter: String,
    /// 导出时的搜索关键字
    pub search_query: String,
    /// 检查报告输出路径，不设置则只打印摘要
    pub audit_report: Option<String>,
    /// 图片目录，设置后检查题干与解析中引用的图片是否存在
    pub images_dir: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: "../extraction/questions.json".to_string(),
            output_html: "viewer.html".to_string(),
            link_prefix: "../scraped_html/cleaned/".to_string(),
            link_extension: ".html".to_string(),
            typeset_enabled: true,
            initial_view: View::Viewer,
            subject_filter: "All".to_string(),
            search_query: String::new(),
            audit_report: None,
            images_dir: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：若设置了 `QUESTION_VIEWER_CONFIG` 则先读取 TOML 文件，再应用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_toml_file(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// 解析 TOML 文本，缺少的键使用默认值
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source: e,
        })
    }

    /// 用 `lookup` 查到的变量覆盖配置
    pub fn with_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            data_source: lookup("DATA_SOURCE").unwrap_or(self.data_source),
            output_html: lookup("OUTPUT_HTML").unwrap_or(self.output_html),
            link_prefix: lookup("LINK_PREFIX").unwrap_or(self.link_prefix),
            link_extension: lookup("LINK_EXTENSION").unwrap_or(self.link_extension),
            typeset_enabled: parse_bool(&lookup, "TYPESET_ENABLED", self.typeset_enabled)?,
            initial_view: parse_view(&lookup, "INITIAL_VIEW", self.initial_view)?,
            subject_filter: lookup("SUBJECT_FILTER").unwrap_or(self.subject_filter),
            search_query: lookup("SEARCH_QUERY").unwrap_or(self.search_query),
            audit_report: lookup("AUDIT_REPORT").or(self.audit_report),
            images_dir: lookup("IMAGES_DIR").or(self.images_dir),
            verbose_logging: parse_bool(&lookup, "VERBOSE_LOGGING", self.verbose_logging)?,
        })
    }
}

fn parse_bool<F>(lookup: &F, var_name: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: "bool".to_string(),
        }),
    }
}

fn parse_view<F>(lookup: &F, var_name: &str, default: View) -> Result<View, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: "view (viewer | review)".to_string(),
        }),
    }
}

// Helper function to deserialize the view name, unknown names fail the whole file
fn deserialize_view<'de, D>(deserializer: D) -> Result<View, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

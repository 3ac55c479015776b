use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据加载错误
    #[error("数据加载错误: {0}")]
    Load(#[from] LoadError),
    /// 宿主页面错误
    #[error("页面错误: {0}")]
    Page(#[from] PageError),
    /// 视图切换错误
    #[error("视图错误: {0}")]
    View(#[from] ViewError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据加载错误
///
/// 任何一种都会让初始化整体失败，页面只显示一条错误信息
#[derive(Debug, Error)]
pub enum LoadError {
    /// 网络请求失败
    #[error("请求 {url} 失败: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("请求 {url} 返回状态码 {status}")]
    BadStatus { url: String, status: u16 },
    /// 读取本地文件失败
    #[error("读取文件 {path} 失败: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("解析 {origin} 的 JSON 失败: {source}")]
    JsonParseFailed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    /// 文档结构不符合 科目 → 试卷 → 分节 → 题目
    #[error("文档结构错误 ({location}): {reason}")]
    Shape { location: String, reason: String },
}

/// 宿主页面错误
#[derive(Debug, Error)]
pub enum PageError {
    /// 页面上没有约定的挂载点
    #[error("缺少挂载点: #{id}")]
    MissingMount { id: String },
    /// 挂载点下没有指定的子元素
    #[error("挂载点 #{mount} 下缺少子元素 #{child}")]
    MissingChild { mount: String, child: String },
}

/// 视图切换错误
#[derive(Debug, Error)]
pub enum ViewError {
    /// 未知的视图名称
    #[error("未知的视图: {name} (可选: viewer, review)")]
    UnknownView { name: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件 {path} 失败: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl LoadError {
    /// 创建结构错误
    pub fn shape(location: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Shape {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

impl PageError {
    /// 创建缺少挂载点错误
    pub fn missing_mount(id: impl Into<String>) -> Self {
        PageError::MissingMount { id: id.into() }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 页面操作结果类型
pub type PageResult<T> = Result<T, PageError>;

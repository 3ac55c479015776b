//! 宿主页面 - 基础设施层
//!
//! 持有唯一的页面资源，只暴露"按 ID 操作挂载点"的能力

use crate::error::PageResult;

/// 约定的挂载点 ID
pub mod mounts {
    /// 题目卡片容器
    pub const QUESTIONS_CONTAINER: &str = "questions-container";
    /// 复查表格的 tbody
    pub const TABLE_BODY: &str = "tableBody";
    /// 科目筛选下拉框
    pub const SUBJECT_FILTER: &str = "subjectFilter";
    /// 搜索输入框
    pub const SEARCH_INPUT: &str = "searchInput";
    /// 复查表格状态行
    pub const STATS_DISPLAY: &str = "statsDisplay";
    /// 统计栏
    pub const STATS_BAR: &str = "stats-bar";
    pub const VIEWER_SECTION: &str = "viewer-section";
    pub const REVIEW_SECTION: &str = "review-section";
    pub const VIEWER_TAB: &str = "viewer-tab";
    pub const REVIEW_TAB: &str = "review-tab";

    /// 全部挂载点
    pub const ALL: [&str; 10] = [
        QUESTIONS_CONTAINER,
        TABLE_BODY,
        SUBJECT_FILTER,
        SEARCH_INPUT,
        STATS_DISPLAY,
        STATS_BAR,
        VIEWER_SECTION,
        REVIEW_SECTION,
        VIEWER_TAB,
        REVIEW_TAB,
    ];
}

/// 宿主页面
///
/// 职责：
/// - 按 ID 定位挂载点并修改其内容、样式类与表单值
/// - 不认识 QuestionRecord
/// - 不处理业务流程
///
/// 操作不存在的挂载点返回 `PageError::MissingMount`
pub trait HostPage {
    /// 用一段标记替换挂载点的全部内容
    fn set_inner_html(&mut self, mount: &str, html: &str) -> PageResult<()>;

    /// 用纯文本替换挂载点的全部内容（自动转义）
    fn set_text(&mut self, mount: &str, text: &str) -> PageResult<()>;

    /// 读取挂载点当前的标记
    fn inner_html(&self, mount: &str) -> PageResult<String>;

    /// 清空挂载点
    fn clear(&mut self, mount: &str) -> PageResult<()>;

    /// 在挂载点末尾追加一个带 ID 的子元素
    fn append_child(&mut self, mount: &str, child_id: &str, html: String) -> PageResult<()>;

    /// 替换挂载点下指定 ID 的子元素，ID 重复时替换最后一个
    fn replace_child(&mut self, mount: &str, child_id: &str, html: String) -> PageResult<()>;

    /// 读取挂载点下指定 ID 的子元素，ID 重复时返回最后一个
    fn child_html(&self, mount: &str, child_id: &str) -> PageResult<Option<String>>;

    /// 添加或移除样式类
    fn set_class(&mut self, mount: &str, class: &str, enabled: bool) -> PageResult<()>;

    fn has_class(&self, mount: &str, class: &str) -> PageResult<bool>;

    /// 下拉框现有选项的值
    fn option_values(&self, mount: &str) -> PageResult<Vec<String>>;

    /// 向下拉框追加选项
    fn append_option(&mut self, mount: &str, value: &str, label: &str) -> PageResult<()>;

    /// 表单控件当前值
    fn value(&self, mount: &str) -> PageResult<String>;

    fn set_value(&mut self, mount: &str, value: &str) -> PageResult<()>;

    /// 对挂载点执行一次公式排版
    ///
    /// 没有排版引擎时什么都不做并返回 false
    fn typeset(&mut self, mount: &str) -> bool;
}

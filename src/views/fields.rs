//! 字段默认值
//!
//! 每个可缺失字段的占位文本集中在这里，渲染层只通过 `or_placeholder` 取值

pub const YEAR_PLACEHOLDER: &str = "Year ???";
pub const SUBJECT_PLACEHOLDER: &str = "Subject ???";
pub const ANSWER_PLACEHOLDER: &str = "N/A";
pub const SOLUTION_PLACEHOLDER: &str = "No solution available.";
/// 题干缺失时附在标题后的说明
pub const CONTENT_UNAVAILABLE_NOTE: &str = "(Full question content not available in metadata view)";

/// 表格中年份、题号缺失时的显示
pub const TABLE_EMPTY_CELL: &str = "-";
/// 表格中科目缺失时的显示
pub const TABLE_SUBJECT_FALLBACK: &str = "Other";

pub const VIEW_SOLUTION_LABEL: &str = "View Solution";
pub const HIDE_SOLUTION_LABEL: &str = "Hide Solution";

pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.unwrap_or(placeholder)
}

/// 解析面板开关按钮的文字
pub fn solution_label(open: bool) -> &'static str {
    if open {
        HIDE_SOLUTION_LABEL
    } else {
        VIEW_SOLUTION_LABEL
    }
}

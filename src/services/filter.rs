//! 复查表格筛选 - 业务能力层
//!
//! 纯函数：输入完整数据集与筛选条件，输出保持原顺序的子序列

use crate::models::QuestionRecord;

/// "全部科目" 哨兵值
pub const ALL_SUBJECTS: &str = "All";

/// 筛选条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFilter {
    /// 科目选择，`ALL_SUBJECTS` 表示不限
    pub subject: String,
    /// 搜索关键字，匹配标题或 ID（不区分大小写）
    pub query: String,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            subject: ALL_SUBJECTS.to_string(),
            query: String::new(),
        }
    }
}

impl ReviewFilter {
    pub fn new(subject: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            query: query.into(),
        }
    }

    /// 单条记录是否命中
    pub fn matches(&self, record: &QuestionRecord) -> bool {
        self.matches_subject(record) && matches_query(record, &self.query.to_lowercase())
    }

    fn matches_subject(&self, record: &QuestionRecord) -> bool {
        self.subject == ALL_SUBJECTS || record.subject() == Some(self.subject.as_str())
    }

    /// 从完整数据集重新计算筛选结果
    pub fn apply<'a>(&self, records: &'a [QuestionRecord]) -> Vec<&'a QuestionRecord> {
        let needle = self.query.to_lowercase();
        records
            .iter()
            .filter(|r| self.matches_subject(r) && matches_query(r, &needle))
            .collect()
    }
}

fn matches_query(record: &QuestionRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let in_title = record
        .title()
        .map(|t| t.to_lowercase().contains(needle))
        .unwrap_or(false);
    in_title || record.post_id.to_lowercase().contains(needle)
}

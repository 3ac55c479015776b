use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::question::QuestionRecord;

/// 完整题目数据集
///
/// 加载成功后构建一次，之后只读；筛选总是派生新的子序列
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[QuestionRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 去重并按字典序排列的科目列表（忽略空科目）
    pub fn subjects_sorted(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.subject())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 按 ID 查找记录，ID 冲突时返回最后一条
    pub fn find(&self, post_id: &str) -> Option<&QuestionRecord> {
        self.records.iter().rev().find(|r| r.post_id == post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, subject: Option<&str>) -> QuestionRecord {
        QuestionRecord {
            post_id: id.to_string(),
            subject: subject.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_subjects_sorted_and_distinct() {
        let dataset = Dataset::new(vec![
            record("1", Some("Physics")),
            record("2", Some("Math")),
            record("3", Some("Physics")),
            record("4", None),
            record("5", Some("")),
        ]);
        assert_eq!(dataset.subjects_sorted(), vec!["Math", "Physics"]);
    }

    #[test]
    fn test_find_prefers_last_on_collision() {
        let dataset = Dataset::new(vec![record("7", Some("A")), record("7", Some("B"))]);
        assert_eq!(dataset.find("7").and_then(|r| r.subject()), Some("B"));
        assert!(dataset.find("8").is_none());
    }
}

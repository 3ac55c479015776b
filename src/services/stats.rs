use std::collections::HashSet;

use crate::models::QuestionRecord;

/// 数据集统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStats {
    /// 题目总数
    pub total: usize,
    /// 不同（非空）科目数量
    pub subjects: usize,
}

/// 统计完整数据集，与当前筛选状态无关
pub fn summarize(records: &[QuestionRecord]) -> DatasetStats {
    let subjects: HashSet<&str> = records.iter().filter_map(|r| r.subject()).collect();
    DatasetStats {
        total: records.len(),
        subjects: subjects.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts_distinct_non_empty_subjects() {
        let records: Vec<QuestionRecord> = [Some("Physics"), Some("Math"), Some("Physics"), None, Some("")]
            .into_iter()
            .enumerate()
            .map(|(i, s)| QuestionRecord {
                post_id: i.to_string(),
                subject: s.map(str::to_string),
                ..Default::default()
            })
            .collect();

        assert_eq!(summarize(&records), DatasetStats { total: 5, subjects: 2 });
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), DatasetStats::default());
    }
}

//! 题目扁平化 - 业务能力层
//!
//! 科目 → 试卷 → 分节 → 题目，按文档顺序拼接成一个列表

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::models::QuestionRecord;

/// 试卷节点，缺少 `sections` 视为空
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestEntry {
    #[serde(default)]
    pub sections: Option<Vec<SectionEntry>>,
}

/// 分节节点，缺少 `questions` 视为空
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionEntry {
    #[serde(default)]
    pub questions: Option<Vec<QuestionRecord>>,
}

/// 扁平化整个文档
///
/// 顶层必须是 科目名 → 试卷数组 的对象。缺失或为 null 的 `sections` / `questions`
/// 按空处理，类型错误的节点视为结构错误。
pub fn flatten_document(document: Value) -> Result<Vec<QuestionRecord>, LoadError> {
    let Value::Object(subjects) = document else {
        return Err(LoadError::shape("$", "顶层必须是 科目 → 试卷数组 的对象"));
    };

    let mut records = Vec::new();
    for (subject, tests) in subjects {
        let tests: Vec<TestEntry> = serde_json::from_value(tests)
            .map_err(|e| LoadError::shape(format!("$.{}", subject), e.to_string()))?;
        records.extend(flatten_tests(tests));
    }

    Ok(records)
}

/// 扁平化单个科目下的全部试卷
pub fn flatten_tests(tests: Vec<TestEntry>) -> impl Iterator<Item = QuestionRecord> {
    tests
        .into_iter()
        .flat_map(|test| test.sections.unwrap_or_default())
        .flat_map(|section| section.questions.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(records: &[QuestionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.post_id.as_str()).collect()
    }

    #[test]
    fn test_flatten_preserves_nested_order() {
        let doc = json!({
            "Physics": [
                { "sections": [
                    { "questions": [{ "post_id": "1" }, { "post_id": "2" }] },
                    { "questions": [{ "post_id": "3" }] }
                ]},
                { "sections": [{ "questions": [{ "post_id": "4" }] }] }
            ],
            "Math": [
                { "sections": [{ "questions": [{ "post_id": "5" }] }] }
            ]
        });

        let records = flatten_document(doc).unwrap();
        assert_eq!(ids(&records), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_flatten_total_count() {
        // 2 个科目 × 3 套试卷 × 2 个分节 × 4 道题
        let section = json!({ "questions": [{}, {}, {}, {}] });
        let test = json!({ "sections": [section.clone(), section] });
        let tests = json!([test.clone(), test.clone(), test]);
        let doc = json!({ "A": tests.clone(), "B": tests });

        assert_eq!(flatten_document(doc).unwrap().len(), 2 * 3 * 2 * 4);
    }

    #[test]
    fn test_subject_order_follows_document_not_alphabet() {
        let doc = json!({
            "Zoology": [{ "sections": [{ "questions": [{ "post_id": "z" }] }] }],
            "Algebra": [{ "sections": [{ "questions": [{ "post_id": "a" }] }] }]
        });
        assert_eq!(ids(&flatten_document(doc).unwrap()), vec!["z", "a"]);
    }

    #[test]
    fn test_missing_sections_and_questions_are_empty() {
        let doc = json!({
            "Physics": [
                {},
                { "sections": null },
                { "sections": [{}, { "questions": null }, { "questions": [] }] },
                { "sections": [{ "questions": [{ "post_id": "1" }] }] }
            ],
            "Empty": []
        });
        assert_eq!(ids(&flatten_document(doc).unwrap()), vec!["1"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let doc = json!({
            "Physics": [{ "sections": [{ "questions": [{ "post_id": "1" }, { "post_id": "1" }] }] }]
        });
        assert_eq!(flatten_document(doc).unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        assert!(matches!(
            flatten_document(json!([1, 2, 3])),
            Err(LoadError::Shape { .. })
        ));
        assert!(matches!(
            flatten_document(json!({ "Physics": { "sections": [] } })),
            Err(LoadError::Shape { ref location, .. }) if location == "$.Physics"
        ));
        assert!(matches!(
            flatten_document(json!({ "Physics": [{ "sections": "none" }] })),
            Err(LoadError::Shape { .. })
        ));
        assert!(matches!(
            flatten_document(json!({ "Physics": [{ "sections": [{ "questions": [3] }] }] })),
            Err(LoadError::Shape { .. })
        ));
    }
}

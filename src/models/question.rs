use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 扁平化后的单道题目记录
///
/// 除了下面显式声明的字段，其余原始字段全部保留在 `extra` 中，
/// 扁平化过程只做拼接，不修改也不丢弃任何字段。
///
/// 显式字段在反序列化时已经规范化：数字转成字符串，null 视为缺失，
/// 缺失的 `post_id` 为空字符串。因此重新序列化得到的是规范化后的记录，
/// 不是原始 JSON；需要原文时应保留加载时的 `Value`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题目 ID，任何标量都统一转成字符串
    #[serde(default, deserialize_with = "deserialize_id")]
    pub post_id: String,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub question_num: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 标签原值，非数组时不渲染任何标签
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    /// 富文本题干 (HTML)
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// 选项原值 (标签 → 内容)，保持插入顺序
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text", skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    /// 其余未声明的字段
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuestionRecord {
    pub fn year(&self) -> Option<&str> {
        non_empty(self.year.as_deref())
    }

    pub fn subject(&self) -> Option<&str> {
        non_empty(self.subject.as_deref())
    }

    pub fn subtopic(&self) -> Option<&str> {
        non_empty(self.subtopic.as_deref())
    }

    pub fn question_num(&self) -> Option<&str> {
        non_empty(self.question_num.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn question(&self) -> Option<&str> {
        non_empty(self.question.as_deref())
    }

    pub fn answer(&self) -> Option<&str> {
        non_empty(self.answer.as_deref())
    }

    pub fn solution(&self) -> Option<&str> {
        non_empty(self.solution.as_deref())
    }

    /// 标签列表
    ///
    /// 只有数组形式的 `tags` 才会产生标签，其中的 null 元素被跳过
    pub fn tag_list(&self) -> Vec<String> {
        match &self.tags {
            Some(Value::Array(items)) => items.iter().cloned().filter_map(value_to_text).collect(),
            _ => Vec::new(),
        }
    }

    /// 选项列表，按文档中的顺序返回 (标签, 内容)
    pub fn option_entries(&self) -> Vec<(String, String)> {
        match &self.options {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(label, text)| (label.clone(), value_to_text(text.clone()).unwrap_or_default()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 读取额外字段的文本形式
    pub fn extra_text(&self, key: &str) -> Option<String> {
        self.extra.get(key).cloned().and_then(value_to_text)
    }
}

/// 空字符串视为缺失
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 把 JSON 标量转换为显示用文本
pub fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// Helper function to deserialize display text as either string, number or null
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

// Helper function to deserialize post_id from any scalar, missing or null becomes ""
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text).unwrap_or_default())
}

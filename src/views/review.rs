//! 复查表格行与状态行

use crate::models::QuestionRecord;
use crate::utils::html::escape_html;
use crate::views::fields::{or_placeholder, TABLE_EMPTY_CELL, TABLE_SUBJECT_FALLBACK};

/// 单题外部文档的路径约定：前缀 + ID + 扩展名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConvention {
    pub prefix: String,
    pub extension: String,
}

impl Default for LinkConvention {
    fn default() -> Self {
        Self {
            prefix: "../scraped_html/cleaned/".to_string(),
            extension: ".html".to_string(),
        }
    }
}

impl LinkConvention {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn href(&self, post_id: &str) -> String {
        format!("{}{}{}", self.prefix, post_id, self.extension)
    }
}

/// 表格行视图模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub post_id: String,
    pub href: String,
    pub year: String,
    pub question_num: String,
    pub subject: String,
    pub subtopic: Option<String>,
    pub title: String,
}

impl ReviewRow {
    pub fn from_record(record: &QuestionRecord, links: &LinkConvention) -> Self {
        Self {
            post_id: record.post_id.clone(),
            href: links.href(&record.post_id),
            year: or_placeholder(record.year(), TABLE_EMPTY_CELL).to_string(),
            question_num: or_placeholder(record.question_num(), TABLE_EMPTY_CELL).to_string(),
            subject: or_placeholder(record.subject(), TABLE_SUBJECT_FALLBACK).to_string(),
            subtopic: record.subtopic().map(str::to_string),
            title: record.title().unwrap_or_default().to_string(),
        }
    }
}

pub fn render_row(row: &ReviewRow) -> String {
    let subtopic = row
        .subtopic
        .as_deref()
        .map(|s| format!(r#"<span class="tag">{}</span>"#, escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<tr><td><a href="{}" class="link" target="_blank">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><small>{}</small></td></tr>"#,
        escape_html(&row.href),
        escape_html(&row.post_id),
        escape_html(&row.year),
        escape_html(&row.question_num),
        escape_html(&row.subject),
        subtopic,
        escape_html(&row.title),
    )
}

/// 表格行元素 ID
pub fn row_element_id(post_id: &str) -> String {
    format!("row-{}", post_id)
}

/// "Showing {rendered} of {total} questions"
pub fn status_line(rendered: usize, total: usize) -> String {
    format!("Showing {} of {} questions", rendered, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_defaults() {
        let record: QuestionRecord = serde_json::from_value(json!({ "post_id": "12", "title": "T" })).unwrap();
        let row = ReviewRow::from_record(&record, &LinkConvention::default());

        assert_eq!(row.href, "../scraped_html/cleaned/12.html");
        assert_eq!(row.year, "-");
        assert_eq!(row.question_num, "-");
        assert_eq!(row.subject, "Other");
        assert_eq!(row.subtopic, None);

        let html = render_row(&row);
        assert!(html.contains(r#"<a href="../scraped_html/cleaned/12.html" class="link" target="_blank">12</a>"#));
        assert!(html.contains("<td></td><td><small>T</small></td>"));
    }

    #[test]
    fn test_row_with_subtopic_and_custom_links() {
        let record: QuestionRecord = serde_json::from_value(json!({
            "post_id": 5,
            "year": 2019,
            "question_num": "3",
            "subject": "Physics",
            "subtopic": "Optics",
            "title": "Lens"
        }))
        .unwrap();
        let row = ReviewRow::from_record(&record, &LinkConvention::new("/pages/", ".htm"));

        let html = render_row(&row);
        assert!(html.contains(r#"href="/pages/5.htm""#));
        assert!(html.contains("<td>2019</td><td>3</td><td>Physics</td>"));
        assert!(html.contains(r#"<span class="tag">Optics</span>"#));
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(1, 3), "Showing 1 of 3 questions");
    }
}

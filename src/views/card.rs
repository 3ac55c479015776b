//! 题目卡片
//!
//! QuestionRecord → CardView → 标记，全部是纯函数，不依赖页面

use crate::models::QuestionRecord;
use crate::utils::html::escape_html;
use crate::views::fields::{
    or_placeholder, solution_label, ANSWER_PLACEHOLDER, CONTENT_UNAVAILABLE_NOTE,
    SOLUTION_PLACEHOLDER, SUBJECT_PLACEHOLDER, YEAR_PLACEHOLDER,
};

/// 题干内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    /// 完整富文本题干
    Rich(String),
    /// 只有标题时的回退内容
    TitleFallback(String),
}

/// 卡片视图模型，所有缺省值都已解析完毕
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub post_id: String,
    pub year: String,
    pub subject: String,
    pub question_num: Option<String>,
    pub title: String,
    pub subtopic: Option<String>,
    pub tags: Vec<String>,
    pub body: CardBody,
    pub options: Vec<(String, String)>,
    pub answer: String,
    pub solution: String,
}

impl CardView {
    pub fn from_record(record: &QuestionRecord) -> Self {
        let title = record.title().unwrap_or_default().to_string();
        let body = match record.question() {
            Some(html) => CardBody::Rich(html.to_string()),
            None => CardBody::TitleFallback(title.clone()),
        };

        Self {
            post_id: record.post_id.clone(),
            year: or_placeholder(record.year(), YEAR_PLACEHOLDER).to_string(),
            subject: or_placeholder(record.subject(), SUBJECT_PLACEHOLDER).to_string(),
            question_num: record.question_num().map(str::to_string),
            title,
            subtopic: record.subtopic().map(str::to_string),
            tags: record.tag_list(),
            body,
            options: record.option_entries(),
            answer: or_placeholder(record.answer(), ANSWER_PLACEHOLDER).to_string(),
            solution: or_placeholder(record.solution(), SOLUTION_PLACEHOLDER).to_string(),
        }
    }
}

/// 卡片元素 ID
pub fn card_element_id(post_id: &str) -> String {
    format!("q-{}", post_id)
}

/// 解析面板元素 ID
pub fn solution_panel_id(post_id: &str) -> String {
    format!("sol-{}", post_id)
}

/// 渲染单张卡片，`open` 决定解析面板是否展开
pub fn render_card(view: &CardView, open: bool) -> String {
    let id = escape_html(&view.post_id);

    let qnum = view
        .question_num
        .as_deref()
        .map(|n| format!(r#"<span class="qnum-badge">Q.{}</span>"#, escape_html(n)))
        .unwrap_or_default();

    let subtopic = view
        .subtopic
        .as_deref()
        .map(|s| format!(r#"<span class="subtopic-tag">{}</span>"#, escape_html(s)))
        .unwrap_or_default();

    let tags: String = view
        .tags
        .iter()
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect();

    let body = match &view.body {
        CardBody::Rich(html) => html.clone(),
        CardBody::TitleFallback(title) => format!(
            "<h3>{}</h3><p>{}</p>",
            escape_html(title),
            CONTENT_UNAVAILABLE_NOTE
        ),
    };

    let options: String = view
        .options
        .iter()
        .map(|(label, text)| {
            format!(
                r#"<div class="option-item"><span class="option-label">{}</span><div class="option-content">{}</div></div>"#,
                escape_html(label),
                text
            )
        })
        .collect();

    format!(
        r#"<div class="question-card tex2jax_process" id="{card_id}">
    <div class="card-header">
        <div class="meta-row"><span class="qid">#{id}</span><span class="year-badge">{year}</span><span class="subject-badge">{subject}</span>{qnum}</div>
        <div class="meta-row-title"><strong>{title}</strong></div>
        <div class="tags">{subtopic}{tags}</div>
    </div>
    <div class="question-text">{body}</div>
    <div class="options-container">{options}</div>
    <div class="action-buttons"><button class="btn btn-primary toggle-solution" data-id="{id}">{label}</button></div>
    <div class="{panel_class}" id="{panel_id}">
        <div class="answer-badge">Correct Answer: {answer}</div>
        <div class="solution-content">{solution}</div>
    </div>
</div>
"#,
        card_id = escape_html(&card_element_id(&view.post_id)),
        id = id,
        year = escape_html(&view.year),
        subject = escape_html(&view.subject),
        qnum = qnum,
        title = escape_html(&view.title),
        subtopic = subtopic,
        tags = tags,
        body = body,
        options = options,
        label = solution_label(open),
        panel_class = if open { "solution-panel open" } else { "solution-panel" },
        panel_id = escape_html(&solution_panel_id(&view.post_id)),
        answer = escape_html(&view.answer),
        solution = view.solution,
    )
}

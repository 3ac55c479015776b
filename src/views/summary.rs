//! 统计栏与加载失败提示

use crate::services::DatasetStats;
use crate::utils::html::escape_html;

pub fn render_stats_bar(stats: &DatasetStats) -> String {
    format!(
        "<span><strong>{}</strong> Questions</span><span><strong>{}</strong> Subjects</span>",
        stats.total, stats.subjects
    )
}

/// 加载失败时替换题目容器的提示
pub fn render_load_error(source: &str) -> String {
    let source = escape_html(source);
    format!(
        r#"<div class="error">Failed to load data. Please ensure you are running a server and '{}' exists. URL attempted: {}</div>"#,
        source, source
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_bar() {
        let html = render_stats_bar(&DatasetStats { total: 3, subjects: 2 });
        assert_eq!(
            html,
            "<span><strong>3</strong> Questions</span><span><strong>2</strong> Subjects</span>"
        );
    }

    #[test]
    fn test_load_error_names_source() {
        let html = render_load_error("../extraction/questions.json");
        assert!(html.starts_with(r#"<div class="error">"#));
        assert!(html.contains("URL attempted: ../extraction/questions.json"));
    }
}

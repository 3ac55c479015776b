//! 内存页面
//!
//! `HostPage` 的内存实现：保存所有挂载点的状态，可随时导出为独立的 HTML 文档

use std::collections::HashMap;

use tracing::debug;

use crate::error::{PageError, PageResult};
use crate::infrastructure::host_page::{mounts, HostPage};
use crate::utils::html::escape_html;

/// MathJax 脚本地址
const MATHJAX_SRC: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

/// "全部科目"选项的显示文本
const ALL_SUBJECTS_LABEL: &str = "All Subjects";

#[derive(Debug, Clone, PartialEq)]
struct SelectOption {
    value: String,
    label: String,
}

#[derive(Debug, Clone)]
struct Fragment {
    id: Option<String>,
    html: String,
}

#[derive(Debug, Clone, Default)]
struct Element {
    classes: Vec<String>,
    children: Vec<Fragment>,
    value: String,
    options: Vec<SelectOption>,
}

impl Element {
    fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn html(&self) -> String {
        self.children.iter().map(|f| f.html.as_str()).collect()
    }

    fn class_attr(&self) -> String {
        escape_html(&self.classes.join(" "))
    }
}

/// 内存页面
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: HashMap<String, Element>,
    typesetter_available: bool,
    typeset_passes: usize,
}

impl MemoryPage {
    /// 创建没有任何挂载点的空页面
    pub fn empty() -> Self {
        Self::default()
    }

    /// 创建带有全部约定挂载点的页面
    ///
    /// 初始状态：viewer 视图激活，科目下拉框只有 "All" 一个选项
    pub fn standard(typesetter_available: bool) -> Self {
        let mut page = Self {
            typesetter_available,
            ..Default::default()
        };
        for id in mounts::ALL {
            page.elements.insert(id.to_string(), Element::default());
        }

        page.elements.insert(
            mounts::VIEWER_SECTION.to_string(),
            Element::with_classes(&["view-section", "active"]),
        );
        page.elements.insert(
            mounts::REVIEW_SECTION.to_string(),
            Element::with_classes(&["view-section"]),
        );
        page.elements.insert(
            mounts::VIEWER_TAB.to_string(),
            Element::with_classes(&["nav-tab", "active"]),
        );
        page.elements.insert(
            mounts::REVIEW_TAB.to_string(),
            Element::with_classes(&["nav-tab"]),
        );

        if let Some(select) = page.elements.get_mut(mounts::SUBJECT_FILTER) {
            select.options.push(SelectOption {
                value: "All".to_string(),
                label: ALL_SUBJECTS_LABEL.to_string(),
            });
            select.value = "All".to_string();
        }

        page
    }

    /// 已执行的排版次数
    pub fn typeset_passes(&self) -> usize {
        self.typeset_passes
    }

    /// 挂载点下子元素的 ID（按插入顺序）
    pub fn child_ids(&self, mount: &str) -> PageResult<Vec<String>> {
        Ok(self
            .element(mount)?
            .children
            .iter()
            .filter_map(|f| f.id.clone())
            .collect())
    }

    fn element(&self, id: &str) -> PageResult<&Element> {
        self.elements
            .get(id)
            .ok_or_else(|| PageError::missing_mount(id))
    }

    fn element_mut(&mut self, id: &str) -> PageResult<&mut Element> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| PageError::missing_mount(id))
    }

    fn html_of(&self, id: &str) -> String {
        self.elements.get(id).map(Element::html).unwrap_or_default()
    }

    fn class_of(&self, id: &str) -> String {
        self.elements.get(id).map(Element::class_attr).unwrap_or_default()
    }

    /// 导出为完整的 HTML 文档
    pub fn to_html_document(&self, title: &str) -> String {
        let subject_options: String = self
            .elements
            .get(mounts::SUBJECT_FILTER)
            .map(|select| {
                select
                    .options
                    .iter()
                    .map(|o| {
                        format!(
                            r#"<option value="{}"{}>{}</option>"#,
                            escape_html(&o.value),
                            if o.value == select.value { " selected" } else { "" },
                            escape_html(&o.label)
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        let search_value = self
            .elements
            .get(mounts::SEARCH_INPUT)
            .map(|e| escape_html(&e.value))
            .unwrap_or_default();

        let mathjax = if self.typesetter_available {
            format!(r#"<script id="MathJax-script" async src="{}"></script>"#, MATHJAX_SRC)
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    {mathjax}
</head>
<body>
    <header>
        <h1>{title}</h1>
        <nav>
            <button id="{viewer_tab}" class="{viewer_tab_class}">Question Viewer</button>
            <button id="{review_tab}" class="{review_tab_class}">Review Table</button>
        </nav>
    </header>
    <section id="{viewer_section}" class="{viewer_section_class}">
        <div id="{stats_bar}" class="stats-bar">{stats_bar_html}</div>
        <div id="{questions}">{questions_html}</div>
    </section>
    <section id="{review_section}" class="{review_section_class}">
        <div class="filters">
            <select id="{subject_filter}">{subject_options}</select>
            <input id="{search_input}" type="text" placeholder="Search title or ID..." value="{search_value}">
            <span id="{stats_display}">{stats_display_html}</span>
        </div>
        <table>
            <thead>
                <tr><th>ID</th><th>Year</th><th>Q.No</th><th>Subject</th><th>Subtopic</th><th>Title</th></tr>
            </thead>
            <tbody id="{table_body}">{table_html}</tbody>
        </table>
    </section>
</body>
</html>
"#,
            title = escape_html(title),
            css = CSS,
            mathjax = mathjax,
            viewer_tab = mounts::VIEWER_TAB,
            viewer_tab_class = self.class_of(mounts::VIEWER_TAB),
            review_tab = mounts::REVIEW_TAB,
            review_tab_class = self.class_of(mounts::REVIEW_TAB),
            viewer_section = mounts::VIEWER_SECTION,
            viewer_section_class = self.class_of(mounts::VIEWER_SECTION),
            stats_bar = mounts::STATS_BAR,
            stats_bar_html = self.html_of(mounts::STATS_BAR),
            questions = mounts::QUESTIONS_CONTAINER,
            questions_html = self.html_of(mounts::QUESTIONS_CONTAINER),
            review_section = mounts::REVIEW_SECTION,
            review_section_class = self.class_of(mounts::REVIEW_SECTION),
            subject_filter = mounts::SUBJECT_FILTER,
            subject_options = subject_options,
            search_input = mounts::SEARCH_INPUT,
            search_value = search_value,
            stats_display = mounts::STATS_DISPLAY,
            stats_display_html = self.html_of(mounts::STATS_DISPLAY),
            table_body = mounts::TABLE_BODY,
            table_html = self.html_of(mounts::TABLE_BODY),
        )
    }
}

impl HostPage for MemoryPage {
    fn set_inner_html(&mut self, mount: &str, html: &str) -> PageResult<()> {
        let element = self.element_mut(mount)?;
        element.children = vec![Fragment {
            id: None,
            html: html.to_string(),
        }];
        Ok(())
    }

    fn set_text(&mut self, mount: &str, text: &str) -> PageResult<()> {
        self.set_inner_html(mount, &escape_html(text))
    }

    fn inner_html(&self, mount: &str) -> PageResult<String> {
        Ok(self.element(mount)?.html())
    }

    fn clear(&mut self, mount: &str) -> PageResult<()> {
        self.element_mut(mount)?.children.clear();
        Ok(())
    }

    fn append_child(&mut self, mount: &str, child_id: &str, html: String) -> PageResult<()> {
        self.element_mut(mount)?.children.push(Fragment {
            id: Some(child_id.to_string()),
            html,
        });
        Ok(())
    }

    fn replace_child(&mut self, mount: &str, child_id: &str, html: String) -> PageResult<()> {
        let element = self.element_mut(mount)?;
        let slot = element
            .children
            .iter_mut()
            .rev()
            .find(|f| f.id.as_deref() == Some(child_id))
            .ok_or_else(|| PageError::MissingChild {
                mount: mount.to_string(),
                child: child_id.to_string(),
            })?;
        slot.html = html;
        Ok(())
    }

    fn child_html(&self, mount: &str, child_id: &str) -> PageResult<Option<String>> {
        Ok(self
            .element(mount)?
            .children
            .iter()
            .rev()
            .find(|f| f.id.as_deref() == Some(child_id))
            .map(|f| f.html.clone()))
    }

    fn set_class(&mut self, mount: &str, class: &str, enabled: bool) -> PageResult<()> {
        let element = self.element_mut(mount)?;
        let present = element.classes.iter().any(|c| c == class);
        if enabled && !present {
            element.classes.push(class.to_string());
        } else if !enabled && present {
            element.classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn has_class(&self, mount: &str, class: &str) -> PageResult<bool> {
        Ok(self.element(mount)?.classes.iter().any(|c| c == class))
    }

    fn option_values(&self, mount: &str) -> PageResult<Vec<String>> {
        Ok(self
            .element(mount)?
            .options
            .iter()
            .map(|o| o.value.clone())
            .collect())
    }

    fn append_option(&mut self, mount: &str, value: &str, label: &str) -> PageResult<()> {
        self.element_mut(mount)?.options.push(SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        });
        Ok(())
    }

    fn value(&self, mount: &str) -> PageResult<String> {
        Ok(self.element(mount)?.value.clone())
    }

    fn set_value(&mut self, mount: &str, value: &str) -> PageResult<()> {
        self.element_mut(mount)?.value = value.to_string();
        Ok(())
    }

    fn typeset(&mut self, mount: &str) -> bool {
        if !self.typesetter_available {
            debug!("排版引擎不可用，跳过 #{}", mount);
            return false;
        }
        self.typeset_passes += 1;
        true
    }
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; color: #222; }
nav { display: flex; gap: .5rem; margin-bottom: 1rem; }
.nav-tab { border: 1px solid #ccc; background: #f6f6f6; padding: .4rem .9rem; cursor: pointer; }
.nav-tab.active { background: #2f6fde; color: #fff; border-color: #2f6fde; }
.view-section { display: none; }
.view-section.active { display: block; }
.stats-bar { display: flex; gap: 1.5rem; margin-bottom: 1rem; }
.question-card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }
.meta-row { display: flex; gap: .5rem; align-items: center; font-size: .85rem; }
.year-badge, .subject-badge, .qnum-badge, .tag, .subtopic-tag { background: #eef; border-radius: 4px; padding: 0 .4rem; }
.subtopic-tag { background: #efe; }
.option-item { display: flex; gap: .5rem; margin: .25rem 0; }
.option-label { font-weight: bold; }
.solution-panel { display: none; border-top: 1px dashed #ccc; margin-top: .75rem; padding-top: .75rem; }
.solution-panel.open { display: block; }
.answer-badge { font-weight: bold; margin-bottom: .5rem; }
.error { color: #b00020; padding: 1rem; border: 1px solid #b00020; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #eee; padding: .35rem; text-align: left; }
.filters { display: flex; gap: .75rem; align-items: center; margin-bottom: .75rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mount_is_error() {
        let mut page = MemoryPage::empty();
        let err = page.set_text(mounts::STATS_DISPLAY, "x").unwrap_err();
        assert!(matches!(err, PageError::MissingMount { ref id } if id == "statsDisplay"));
    }

    #[test]
    fn test_standard_page_initial_state() {
        let page = MemoryPage::standard(false);
        assert!(page.has_class(mounts::VIEWER_SECTION, "active").unwrap());
        assert!(!page.has_class(mounts::REVIEW_SECTION, "active").unwrap());
        assert_eq!(page.option_values(mounts::SUBJECT_FILTER).unwrap(), vec!["All"]);
        assert_eq!(page.value(mounts::SUBJECT_FILTER).unwrap(), "All");
    }

    #[test]
    fn test_children_last_id_wins() {
        let mut page = MemoryPage::standard(false);
        page.append_child(mounts::QUESTIONS_CONTAINER, "q-1", "first".into()).unwrap();
        page.append_child(mounts::QUESTIONS_CONTAINER, "q-1", "second".into()).unwrap();
        page.replace_child(mounts::QUESTIONS_CONTAINER, "q-1", "third".into()).unwrap();

        assert_eq!(
            page.child_html(mounts::QUESTIONS_CONTAINER, "q-1").unwrap().as_deref(),
            Some("third")
        );
        assert_eq!(page.inner_html(mounts::QUESTIONS_CONTAINER).unwrap(), "firstthird");
    }

    #[test]
    fn test_set_text_escapes() {
        let mut page = MemoryPage::standard(false);
        page.set_text(mounts::STATS_DISPLAY, "<b>").unwrap();
        assert_eq!(page.inner_html(mounts::STATS_DISPLAY).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn test_typeset_without_engine_is_noop() {
        let mut page = MemoryPage::standard(false);
        assert!(!page.typeset(mounts::QUESTIONS_CONTAINER));
        assert_eq!(page.typeset_passes(), 0);

        let mut page = MemoryPage::standard(true);
        assert!(page.typeset(mounts::QUESTIONS_CONTAINER));
        assert_eq!(page.typeset_passes(), 1);
    }

    #[test]
    fn test_document_export_reflects_state() {
        let mut page = MemoryPage::standard(true);
        page.append_option(mounts::SUBJECT_FILTER, "Math", "Math").unwrap();
        page.set_value(mounts::SUBJECT_FILTER, "Math").unwrap();
        page.set_value(mounts::SEARCH_INPUT, "prob \"x\"").unwrap();

        let html = page.to_html_document("Questions");
        assert!(html.contains(r#"<option value="Math" selected>Math</option>"#));
        assert!(html.contains(r#"value="prob &quot;x&quot;""#));
        assert!(html.contains("MathJax-script"));
        assert!(html.contains(r#"id="viewer-section" class="view-section active""#));
    }
}

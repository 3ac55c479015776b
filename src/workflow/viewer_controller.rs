//! 页面控制器 - 流程层
//!
//! 核心职责：持有应用状态，把加载、渲染、筛选、视图切换串成完整流程
//!
//! 流程顺序：
//! 1. 加载并扁平化数据（唯一的异步步骤）
//! 2. 渲染全部卡片 → 统计栏 → 科目选项 → 复查表格
//! 3. 之后的交互都是同步调用：展开解析、修改筛选、切换视图

use std::collections::HashSet;

use tracing::{debug, error, info};

use crate::error::{AppResult, LoadError, PageResult};
use crate::infrastructure::{mounts, HostPage};
use crate::models::{Dataset, QuestionRecord};
use crate::services::{summarize, DataLoader, DatasetStats, ReviewFilter};
use crate::views::{
    card_element_id, render_card, render_load_error, render_row, render_stats_bar,
    row_element_id, status_line, CardView, LinkConvention, ReviewRow,
};
use crate::workflow::view::View;

/// 初始化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 加载成功并完成首轮渲染
    Loaded(DatasetStats),
    /// 加载失败，页面只显示错误提示
    Failed { source: String },
}

/// 加载成功后的应用状态
#[derive(Debug)]
struct LoadedState {
    dataset: Dataset,
    stats: DatasetStats,
    filter: ReviewFilter,
    open_solutions: HashSet<String>,
}

/// 页面控制器
///
/// - 唯一持有页面与数据集
/// - 渲染函数通过参数拿到数据，不访问任何全局状态
/// - 所有交互处理都是同步的，一次只处理一个事件
pub struct ViewerController<P: HostPage> {
    page: P,
    links: LinkConvention,
    active_view: View,
    state: Option<LoadedState>,
}

impl<P: HostPage> ViewerController<P> {
    /// 创建新的页面控制器
    pub fn new(page: P, links: LinkConvention) -> Self {
        Self {
            page,
            links,
            active_view: View::default(),
            state: None,
        }
    }

    /// 加载数据并完成首轮渲染
    ///
    /// 加载失败不是错误：页面显示提示后返回 `LoadOutcome::Failed`；
    /// 只有页面操作本身失败（缺少挂载点）才返回 Err
    pub async fn initialize(&mut self, loader: &DataLoader) -> AppResult<LoadOutcome> {
        info!("📥 正在加载题目数据: {}", loader.source_label());
        let result = loader.load().await;
        self.mount(result, loader.source_label())
    }

    /// 根据加载结果渲染页面
    pub fn mount(
        &mut self,
        result: Result<Dataset, LoadError>,
        source_label: &str,
    ) -> AppResult<LoadOutcome> {
        match result {
            Ok(dataset) => Ok(LoadOutcome::Loaded(self.mount_dataset(dataset)?)),
            Err(e) => {
                error!("❌ 无法加载题目数据: {}", e);
                self.page
                    .set_inner_html(mounts::QUESTIONS_CONTAINER, &render_load_error(source_label))?;
                Ok(LoadOutcome::Failed {
                    source: source_label.to_string(),
                })
            }
        }
    }

    fn mount_dataset(&mut self, dataset: Dataset) -> PageResult<DatasetStats> {
        let stats = summarize(dataset.records());

        self.render_cards(&dataset)?;
        self.page
            .set_inner_html(mounts::STATS_BAR, &render_stats_bar(&stats))?;

        self.init_review_filters(&dataset)?;
        let all: Vec<&QuestionRecord> = dataset.records().iter().collect();
        render_review_table(&mut self.page, &self.links, &all, dataset.len())?;

        info!(
            "✓ 渲染完成: {} 道题目, {} 个科目",
            stats.total, stats.subjects
        );

        self.state = Some(LoadedState {
            dataset,
            stats,
            filter: ReviewFilter::default(),
            open_solutions: HashSet::new(),
        });
        Ok(stats)
    }

    /// 渲染全部卡片，完成后执行一次公式排版
    fn render_cards(&mut self, dataset: &Dataset) -> PageResult<()> {
        self.page.clear(mounts::QUESTIONS_CONTAINER)?;

        for record in dataset.records() {
            let view = CardView::from_record(record);
            self.page.append_child(
                mounts::QUESTIONS_CONTAINER,
                &card_element_id(&record.post_id),
                render_card(&view, false),
            )?;
        }

        if self.page.typeset(mounts::QUESTIONS_CONTAINER) {
            debug!("✓ 公式排版已触发");
        }
        Ok(())
    }

    /// 用去重排序后的科目填充下拉框，跳过已存在的选项
    fn init_review_filters(&mut self, dataset: &Dataset) -> PageResult<()> {
        let existing = self.page.option_values(mounts::SUBJECT_FILTER)?;
        for subject in dataset.subjects_sorted() {
            if !existing.contains(&subject) {
                self.page
                    .append_option(mounts::SUBJECT_FILTER, &subject, &subject)?;
            }
        }
        Ok(())
    }

    // ========== 交互处理 ==========

    /// 展开 / 收起某道题的解析
    ///
    /// 返回切换后的展开状态；数据未加载或没有这道题时返回 None
    pub fn toggle_solution(&mut self, post_id: &str) -> AppResult<Option<bool>> {
        let Some(state) = self.state.as_mut() else {
            return Ok(None);
        };
        let Some(record) = state.dataset.find(post_id) else {
            debug!("没有 ID 为 {} 的题目，忽略", post_id);
            return Ok(None);
        };

        let open = if state.open_solutions.remove(post_id) {
            false
        } else {
            state.open_solutions.insert(post_id.to_string());
            true
        };

        let html = render_card(&CardView::from_record(record), open);
        self.page
            .replace_child(mounts::QUESTIONS_CONTAINER, &card_element_id(post_id), html)?;

        debug!("题目 {} 解析 {}", post_id, if open { "展开" } else { "收起" });
        Ok(Some(open))
    }

    /// 科目下拉框变化
    ///
    /// 返回筛选后渲染的行数
    pub fn on_subject_change(&mut self, subject: &str) -> AppResult<usize> {
        self.page.set_value(mounts::SUBJECT_FILTER, subject)?;
        match self.state.as_mut() {
            Some(state) => state.filter.subject = subject.to_string(),
            None => return Ok(0),
        }
        self.refresh_review()
    }

    /// 搜索框输入
    ///
    /// 返回筛选后渲染的行数
    pub fn on_search_input(&mut self, query: &str) -> AppResult<usize> {
        self.page.set_value(mounts::SEARCH_INPUT, query)?;
        match self.state.as_mut() {
            Some(state) => state.filter.query = query.to_string(),
            None => return Ok(0),
        }
        self.refresh_review()
    }

    /// 从完整数据集重新筛选并渲染表格
    fn refresh_review(&mut self) -> AppResult<usize> {
        let Some(state) = self.state.as_ref() else {
            return Ok(0);
        };
        let filtered = state.filter.apply(state.dataset.records());
        debug!(
            "筛选 科目={} 关键字={:?}: {} 条",
            state.filter.subject,
            state.filter.query,
            filtered.len()
        );
        Ok(render_review_table(
            &mut self.page,
            &self.links,
            &filtered,
            state.dataset.len(),
        )?)
    }

    /// 按名称切换视图（"viewer" / "review"）
    pub fn switch_view(&mut self, name: &str) -> AppResult<View> {
        let target: View = name.parse()?;
        self.activate(target)?;
        Ok(target)
    }

    /// 激活指定视图，其余视图与标签全部取消激活
    pub fn activate(&mut self, target: View) -> AppResult<()> {
        for view in View::ALL {
            let active = view == target;
            self.page.set_class(view.section_id(), "active", active)?;
            self.page.set_class(view.tab_id(), "active", active)?;
        }
        self.active_view = target;
        Ok(())
    }

    // ========== 状态查询 ==========

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.state.as_ref().map(|s| &s.dataset)
    }

    /// 完整数据集的统计，不受筛选影响
    pub fn stats(&self) -> Option<DatasetStats> {
        self.state.as_ref().map(|s| s.stats)
    }

    pub fn filter(&self) -> Option<&ReviewFilter> {
        self.state.as_ref().map(|s| &s.filter)
    }

    pub fn is_solution_open(&self, post_id: &str) -> bool {
        self.state
            .as_ref()
            .map(|s| s.open_solutions.contains(post_id))
            .unwrap_or(false)
    }
}

/// 清空并重建表格，更新状态行，返回渲染的行数
fn render_review_table<P: HostPage>(
    page: &mut P,
    links: &LinkConvention,
    records: &[&QuestionRecord],
    total: usize,
) -> PageResult<usize> {
    page.clear(mounts::TABLE_BODY)?;
    for record in records {
        let row = ReviewRow::from_record(record, links);
        page.append_child(
            mounts::TABLE_BODY,
            &row_element_id(&record.post_id),
            render_row(&row),
        )?;
    }
    page.set_text(mounts::STATS_DISPLAY, &status_line(records.len(), total))?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::MemoryPage;
    use crate::services::parse_dataset;

    const EXAMPLE: &str = r#"{"Physics":[{"sections":[{"questions":[{"post_id":"1","title":"A","subject":"Physics"},{"post_id":"2","title":"B","subject":"Physics"}]}]}],"Math":[{"sections":[{"questions":[{"post_id":"3","title":"C","subject":"Math"}]}]}]}"#;

    fn loaded(typeset: bool) -> ViewerController<MemoryPage> {
        let mut controller =
            ViewerController::new(MemoryPage::standard(typeset), LinkConvention::default());
        let outcome = controller
            .mount(parse_dataset(EXAMPLE, "inline"), "inline")
            .unwrap();
        assert!(matches!(outcome, LoadOutcome::Loaded(_)));
        controller
    }

    #[test]
    fn test_initial_render() {
        let controller = loaded(true);
        let page = controller.page();

        assert_eq!(
            page.child_ids(mounts::QUESTIONS_CONTAINER).unwrap(),
            vec!["q-1", "q-2", "q-3"]
        );
        assert_eq!(
            page.child_ids(mounts::TABLE_BODY).unwrap(),
            vec!["row-1", "row-2", "row-3"]
        );
        assert_eq!(
            page.inner_html(mounts::STATS_DISPLAY).unwrap(),
            "Showing 3 of 3 questions"
        );
        assert!(page
            .inner_html(mounts::STATS_BAR)
            .unwrap()
            .contains("<strong>3</strong> Questions"));
        assert_eq!(
            page.option_values(mounts::SUBJECT_FILTER).unwrap(),
            vec!["All", "Math", "Physics"]
        );
        assert_eq!(page.typeset_passes(), 1);
        assert_eq!(controller.stats(), Some(DatasetStats { total: 3, subjects: 2 }));
    }

    #[test]
    fn test_subject_filter_updates_table_not_stats() {
        let mut controller = loaded(false);
        assert_eq!(controller.on_subject_change("Math").unwrap(), 1);

        let page = controller.page();
        assert_eq!(page.child_ids(mounts::TABLE_BODY).unwrap(), vec!["row-3"]);
        assert_eq!(
            page.inner_html(mounts::STATS_DISPLAY).unwrap(),
            "Showing 1 of 3 questions"
        );
        assert_eq!(page.value(mounts::SUBJECT_FILTER).unwrap(), "Math");
        assert!(page
            .inner_html(mounts::STATS_BAR)
            .unwrap()
            .contains("<strong>3</strong> Questions"));
        // 卡片不受筛选影响
        assert_eq!(page.child_ids(mounts::QUESTIONS_CONTAINER).unwrap().len(), 3);
    }

    #[test]
    fn test_filter_recomputes_from_full_dataset() {
        let mut controller = loaded(false);
        controller.on_subject_change("Math").unwrap();
        controller.on_search_input("a").unwrap();
        assert_eq!(controller.on_subject_change("All").unwrap(), 1);
        assert_eq!(controller.on_search_input("").unwrap(), 3);
        assert_eq!(
            controller.page().child_ids(mounts::TABLE_BODY).unwrap(),
            vec!["row-1", "row-2", "row-3"]
        );
    }

    #[test]
    fn test_toggle_solution_round_trip() {
        let mut controller = loaded(false);
        let original = controller
            .page()
            .child_html(mounts::QUESTIONS_CONTAINER, "q-2")
            .unwrap()
            .unwrap();

        assert_eq!(controller.toggle_solution("2").unwrap(), Some(true));
        let opened = controller
            .page()
            .child_html(mounts::QUESTIONS_CONTAINER, "q-2")
            .unwrap()
            .unwrap();
        assert!(opened.contains("solution-panel open"));
        assert!(opened.contains("Hide Solution"));
        assert!(controller.is_solution_open("2"));
        assert!(!controller.is_solution_open("1"));

        assert_eq!(controller.toggle_solution("2").unwrap(), Some(false));
        let closed = controller
            .page()
            .child_html(mounts::QUESTIONS_CONTAINER, "q-2")
            .unwrap()
            .unwrap();
        assert_eq!(closed, original);
    }

    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        let mut controller = loaded(false);
        assert_eq!(controller.toggle_solution("999").unwrap(), None);
    }

    #[test]
    fn test_switch_view() {
        let mut controller = loaded(false);
        assert_eq!(controller.active_view(), View::Viewer);

        controller.switch_view("review").unwrap();
        controller.switch_view("review").unwrap();
        let page = controller.page();
        assert!(page.has_class(mounts::REVIEW_SECTION, "active").unwrap());
        assert!(page.has_class(mounts::REVIEW_TAB, "active").unwrap());
        assert!(!page.has_class(mounts::VIEWER_SECTION, "active").unwrap());
        assert!(!page.has_class(mounts::VIEWER_TAB, "active").unwrap());
        assert_eq!(controller.active_view(), View::Review);

        let err = controller.switch_view("settings").unwrap_err();
        assert!(matches!(err, AppError::View(_)));
        assert_eq!(controller.active_view(), View::Review);
    }

    #[test]
    fn test_load_failure_renders_only_error() {
        let mut controller =
            ViewerController::new(MemoryPage::standard(true), LinkConvention::default());
        let outcome = controller
            .mount(parse_dataset("not json", "../extraction/questions.json"), "../extraction/questions.json")
            .unwrap();

        assert_eq!(
            outcome,
            LoadOutcome::Failed {
                source: "../extraction/questions.json".to_string()
            }
        );
        let page = controller.page();
        assert!(page
            .inner_html(mounts::QUESTIONS_CONTAINER)
            .unwrap()
            .contains("URL attempted: ../extraction/questions.json"));
        assert_eq!(page.inner_html(mounts::TABLE_BODY).unwrap(), "");
        assert_eq!(page.inner_html(mounts::STATS_BAR).unwrap(), "");
        assert_eq!(page.option_values(mounts::SUBJECT_FILTER).unwrap(), vec!["All"]);
        assert_eq!(page.typeset_passes(), 0);
        assert!(controller.dataset().is_none());
    }

    #[test]
    fn test_missing_mount_surfaces_as_error() {
        let mut controller = ViewerController::new(MemoryPage::empty(), LinkConvention::default());
        let err = controller
            .mount(parse_dataset(EXAMPLE, "inline"), "inline")
            .unwrap_err();
        assert!(matches!(err, AppError::Page(_)));
    }

    #[test]
    fn test_filter_options_are_not_duplicated() {
        let mut page = MemoryPage::standard(false);
        page.append_option(mounts::SUBJECT_FILTER, "Math", "Math").unwrap();
        let mut controller = ViewerController::new(page, LinkConvention::default());
        controller
            .mount(parse_dataset(EXAMPLE, "inline"), "inline")
            .unwrap();
        controller
            .mount(parse_dataset(EXAMPLE, "inline"), "inline")
            .unwrap();

        assert_eq!(
            controller.page().option_values(mounts::SUBJECT_FILTER).unwrap(),
            vec!["All", "Math", "Physics"]
        );
    }

    #[test]
    fn test_handlers_before_load_are_noops() {
        let mut controller =
            ViewerController::new(MemoryPage::standard(false), LinkConvention::default());
        assert_eq!(controller.on_search_input("x").unwrap(), 0);
        assert_eq!(controller.toggle_solution("1").unwrap(), None);
    }
}

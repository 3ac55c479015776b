use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::MemoryPage;
use crate::services::{AuditReport, Auditor, DataLoader, ALL_SUBJECTS};
use crate::utils::logging::{
    log_audit_summary, log_dataset_loaded, log_export_finished, log_startup,
};
use crate::views::LinkConvention;
use crate::workflow::{LoadOutcome, View, ViewerController};

/// 导出页面的标题
const PAGE_TITLE: &str = "Question Viewer";

/// 应用主结构
pub struct App {
    config: Config,
}

/// 单次运行的结果
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: LoadOutcome,
    pub view: View,
    /// 复查表格最终渲染的行数，加载失败时为 None
    pub rendered_rows: Option<usize>,
    pub audit: Option<AuditReport>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑：加载 → 渲染 → 应用初始筛选与视图 → 检查 → 导出
    pub async fn run(&self) -> Result<RunSummary> {
        let loader = DataLoader::new(&self.config.data_source);
        let page = MemoryPage::standard(self.config.typeset_enabled);
        let links = LinkConvention::new(&self.config.link_prefix, &self.config.link_extension);
        let mut controller = ViewerController::new(page, links);

        let outcome = controller.initialize(&loader).await?;

        let mut rendered_rows = None;
        let mut audit = None;
        match &outcome {
            LoadOutcome::Loaded(stats) => {
                log_dataset_loaded(stats);
                rendered_rows = Some(self.apply_initial_filter(&mut controller, stats.total)?);
                controller.activate(self.config.initial_view)?;
                audit = Some(self.audit(&controller).await?);
            }
            LoadOutcome::Failed { source } => {
                warn!("⚠️ 数据加载失败，只导出错误提示页面: {}", source);
            }
        }

        let html = controller.page().to_html_document(PAGE_TITLE);
        tokio::fs::write(&self.config.output_html, html)
            .await
            .with_context(|| format!("无法写入页面: {}", self.config.output_html))?;

        let view = controller.active_view();
        log_export_finished(&self.config.output_html, view.name(), rendered_rows);

        Ok(RunSummary {
            outcome,
            view,
            rendered_rows,
            audit,
        })
    }

    /// 应用配置中的初始筛选，返回复查表格行数
    fn apply_initial_filter(
        &self,
        controller: &mut ViewerController<MemoryPage>,
        total: usize,
    ) -> Result<usize> {
        let mut rows = total;
        if self.config.subject_filter != ALL_SUBJECTS {
            rows = controller.on_subject_change(&self.config.subject_filter)?;
        }
        if !self.config.search_query.is_empty() {
            rows = controller.on_search_input(&self.config.search_query)?;
        }
        Ok(rows)
    }

    /// 数据完整性检查，按配置写出 JSON 报告
    async fn audit(&self, controller: &ViewerController<MemoryPage>) -> Result<AuditReport> {
        let auditor = Auditor::new(self.config.images_dir.as_ref().map(PathBuf::from))
            .context("无法创建数据检查器")?;
        let report = controller
            .dataset()
            .map(|dataset| auditor.run(dataset.records()))
            .unwrap_or_default();
        log_audit_summary(&report);

        if let Some(path) = &self.config.audit_report {
            let json = serde_json::to_string_pretty(&report)?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("无法写入检查报告: {}", path))?;
            info!("📝 检查报告已保存至: {}", path);
        }

        Ok(report)
    }
}

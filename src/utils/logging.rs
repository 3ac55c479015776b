//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::{info, warn};

use crate::config::Config;
use crate::services::audit::AuditReport;
use crate::services::DatasetStats;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 题目浏览器启动");
    info!("📂 数据来源: {}", config.data_source);
    info!("📄 导出文件: {}", config.output_html);
    info!("{}", "=".repeat(60));
}

/// 记录数据集加载信息
pub fn log_dataset_loaded(stats: &DatasetStats) {
    info!("✓ 共 {} 道题目, {} 个科目", stats.total, stats.subjects);
}

/// 记录检查摘要
pub fn log_audit_summary(report: &AuditReport) {
    let s = &report.summary;
    info!("\n{}", "─".repeat(60));
    info!("🔎 数据完整性检查");
    info!("题目总数: {}", s.total_questions);
    info!("重复 post_id: {}", s.duplicate_post_ids);
    info!("重复 global_idx: {}", s.duplicate_global_indices);
    info!("缺失字段: {}", s.missing_fields);
    info!("空答案: {}", s.empty_answers);
    info!("答案与选项不一致: {}", s.inconsistent_choices);
    info!("缺失图片: {}", s.missing_images);
    info!("疑似占位题干: {}", s.placeholders);
    info!("{}", "─".repeat(60));

    for line in report.details.duplicates.iter().take(5) {
        warn!("  {}", truncate_text(line, 80));
    }
}

/// 打印导出完成信息
pub fn log_export_finished(output_path: &str, view: &str, rendered_rows: Option<usize>) {
    info!("\n{}", "=".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🖥️ 当前视图: {}", view);
    if let Some(rows) = rendered_rows {
        info!("📋 复查表格行数: {}", rows);
    }
    info!("✅ 页面已导出至: {}", output_path);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

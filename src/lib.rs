//! # Question Viewer
//!
//! 把嵌套的题目 JSON（科目 → 试卷 → 分节 → 题目）扁平化，渲染成题目卡片与可筛选的复查表格
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有页面资源，只暴露"按 ID 操作挂载点"的能力
//! - `HostPage` - 宿主页面能力
//! - `MemoryPage` - 内存实现，可导出为独立 HTML
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 加载、扁平化、统计、筛选、完整性检查
//! - 全部不接触页面
//!
//! ### ③ 视图层（Views）
//! - `views/` - 视图模型 → 标记的纯函数，所有占位文本集中在 `views::fields`
//!
//! ### ④ 流程层（Workflow）
//! - `ViewerController` - 持有应用状态，处理加载与全部交互
//! - `View` - viewer / review 两个互斥视图
//!
//! `App` 负责按配置驱动一次完整运行并导出页面。
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunSummary};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HostPage, MemoryPage};
pub use models::{Dataset, QuestionRecord};
pub use services::{DataLoader, ReviewFilter};
pub use workflow::{LoadOutcome, View, ViewerController};

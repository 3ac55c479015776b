//! 视图层：视图模型 → 标记
//!
//! 这里的函数都不接触页面，可以脱离宿主单独测试

pub mod card;
pub mod fields;
pub mod review;
pub mod summary;

pub use card::{card_element_id, render_card, solution_panel_id, CardBody, CardView};
pub use review::{render_row, row_element_id, status_line, LinkConvention, ReviewRow};
pub use summary::{render_load_error, render_stats_bar};

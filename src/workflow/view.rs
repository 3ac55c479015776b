//! 顶层视图
//!
//! 两个互斥视图：卡片浏览 (viewer) 与复查表格 (review)

use std::fmt::Display;
use std::str::FromStr;

use crate::error::ViewError;
use crate::infrastructure::mounts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// 卡片浏览，页面初始视图
    #[default]
    Viewer,
    /// 复查表格
    Review,
}

impl View {
    pub const ALL: [View; 2] = [View::Viewer, View::Review];

    pub fn name(self) -> &'static str {
        match self {
            View::Viewer => "viewer",
            View::Review => "review",
        }
    }

    /// 视图对应的区块挂载点
    pub fn section_id(self) -> &'static str {
        match self {
            View::Viewer => mounts::VIEWER_SECTION,
            View::Review => mounts::REVIEW_SECTION,
        }
    }

    /// 视图对应的导航标签挂载点
    pub fn tab_id(self) -> &'static str {
        match self {
            View::Viewer => mounts::VIEWER_TAB,
            View::Review => mounts::REVIEW_TAB,
        }
    }
}

impl FromStr for View {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(View::Viewer),
            "review" => Ok(View::Review),
            other => Err(ViewError::UnknownView {
                name: other.to_string(),
            }),
        }
    }
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for view in View::ALL {
            assert_eq!(view.name().parse::<View>().unwrap(), view);
        }
        assert!("Viewer".parse::<View>().is_err());
    }

    #[test]
    fn test_ids() {
        assert_eq!(View::Review.section_id(), "review-section");
        assert_eq!(View::Viewer.tab_id(), "viewer-tab");
    }
}

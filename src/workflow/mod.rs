pub mod view;
pub mod viewer_controller;

pub use view::View;
pub use viewer_controller::{LoadOutcome, ViewerController};

pub mod html;
pub mod logging;

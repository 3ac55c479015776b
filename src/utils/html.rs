//! HTML 转义工具
//!
//! 纯文本字段插入标记前必须经过转义；富文本字段（题干、选项、解析）原样插入

/// 转义文本，可同时用于元素内容与双引号属性值
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

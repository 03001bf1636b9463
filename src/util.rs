//! 小工具函数

/// 判断字符串是否为空白（None、空串或纯空格）
pub fn is_blank(value: Option<&str>) -> bool {
    match value {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

/// 判断字符串是否非空白
pub fn is_not_blank(value: Option<&str>) -> bool {
    !is_blank(value)
}

//! SQL 辅助函数

use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符，转义符为 `\`
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 构造 `LIKE '%input%' ESCAPE '\'` 表达式
pub fn contains_like(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input))).escape('\\')
}

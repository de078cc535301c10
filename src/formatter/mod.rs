//! 解题结果格式化
//!
//! 流程：公式提取（占位符保护）→ 标记转换 → 公式还原

pub mod markup;
pub mod math_scanner;

pub use math_scanner::{MathDelimiter, MathExpression, MathTable, PLACEHOLDER_KEYWORD};

/// 把解题服务返回的原始文本转换为可直接展示的标记
///
/// 对任意输入都有结果，不会失败。
pub fn format_solution(raw: &str) -> String {
    let (stripped, table) = math_scanner::extract(raw);
    let transformed = markup::transform(&stripped);
    math_scanner::restore(&transformed, &table)
}

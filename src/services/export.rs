//! 纯文本导出 - 业务能力层
//!
//! 把已渲染的解题标记还原成可以复制粘贴的纯文本

use regex::Regex;

use crate::error::AppResult;

/// 把渲染后的标记转换为纯文本
///
/// # 参数
/// - `markup`: 格式化器输出的标记
///
/// # 返回
/// `<br>` 变为换行，块级标签前后各补一个换行，其余标签去掉，实体解码
pub fn plain_text(markup: &str) -> AppResult<String> {
    let line_break = Regex::new(r"(?i)<br\s*/?>")?;
    let block_tag = Regex::new(r"(?i)</?(?:div|pre)\b[^>]*>")?;
    let any_tag = Regex::new(r"<[^>]*>")?;

    let text = line_break.replace_all(markup, "\n");
    let text = block_tag.replace_all(&text, "\n");
    let text = any_tag.replace_all(&text, "");

    Ok(decode_entities(&text))
}

/// 解码格式化器会产生的几个实体，`&amp;` 放在最后
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

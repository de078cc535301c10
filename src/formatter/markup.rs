//! 类 Markdown 标记转换
//!
//! 只作用于公式以外的文本。规则顺序不能调换：
//! 转义 → 换行 → `**粗体**` → `*斜体*` → ```` ```代码块``` ```` → `` `行内代码` ``

/// 成对标记包裹规则
struct WrapRule {
    marker: &'static str,
    tag: &'static str,
    /// 内容是否允许跨行
    spans_lines: bool,
}

const STRONG: WrapRule = WrapRule {
    marker: "**",
    tag: "strong",
    spans_lines: false,
};

const EMPHASIS: WrapRule = WrapRule {
    marker: "*",
    tag: "em",
    spans_lines: false,
};

const FENCED_CODE: WrapRule = WrapRule {
    marker: "```",
    tag: "pre",
    spans_lines: true,
};

const INLINE_CODE: WrapRule = WrapRule {
    marker: "`",
    tag: "code",
    spans_lines: false,
};

/// 依次应用全部规则，每条规则对整个字符串只扫描一遍
pub fn transform(text: &str) -> String {
    let text = escape_html(text);
    let text = replace_newlines(&text);
    let text = wrap_pairs(&text, &STRONG);
    let text = wrap_pairs(&text, &EMPHASIS);
    let text = wrap_pairs(&text, &FENCED_CODE);
    wrap_pairs(&text, &INLINE_CODE)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn replace_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

/// 把 `marker…marker` 替换为 `<tag>…</tag>`，取最近的结束标记
///
/// 某个起始标记找不到结束标记时，同一行（或跨行规则下的整段文本）
/// 后面的起始标记也不可能找到，直接跳过。
/// 行尾位置每行只查找一次，同一行内的起始标记共用。
fn wrap_pairs(text: &str, rule: &WrapRule) -> String {
    let marker = rule.marker;
    let mut wrapped = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut search = 0;
    // 当前行的行尾，open < line_limit 时仍然有效
    let mut line_limit = 0;

    while let Some(pos) = text[search..].find(marker) {
        let open = search + pos;
        let body = open + marker.len();
        let limit = if rule.spans_lines {
            text.len()
        } else {
            if open >= line_limit {
                line_limit = line_end(text, body);
            }
            line_limit
        };

        match text[body..limit].find(marker) {
            Some(len) => {
                wrapped.push_str(&text[cursor..open]);
                wrapped.push('<');
                wrapped.push_str(rule.tag);
                wrapped.push('>');
                wrapped.push_str(&text[body..body + len]);
                wrapped.push_str("</");
                wrapped.push_str(rule.tag);
                wrapped.push('>');
                cursor = body + len + marker.len();
                search = cursor;
            }
            None if rule.spans_lines => break,
            None if limit == text.len() => break,
            None => search = limit,
        }
    }

    wrapped.push_str(&text[cursor..]);
    wrapped
}

fn line_end(text: &str, from: usize) -> usize {
    text[from..]
        .find(|c: char| c == '\n' || c == '\r')
        .map_or(text.len(), |pos| from + pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_newlines_become_line_breaks() {
        assert_eq!(transform("Step 1\nStep 2"), "Step 1<br>Step 2");
        assert_eq!(transform("a\r\nb\n\nc"), "a<br>b<br><br>c");
    }

    #[test]
    fn test_strong_runs_before_emphasis() {
        assert_eq!(
            transform("**bold** and *it*"),
            "<strong>bold</strong> and <em>it</em>"
        );
        assert_eq!(transform("**a** **b**"), "<strong>a</strong> <strong>b</strong>");
    }

    #[test]
    fn test_shortest_match_wins() {
        assert_eq!(transform("*a* b *c*"), "<em>a</em> b <em>c</em>");
        assert_eq!(transform("***a**"), "<strong>*a</strong>");
    }

    #[test]
    fn test_empty_pairs_are_wrapped() {
        assert_eq!(transform("****"), "<strong></strong>");
        assert_eq!(transform("a ** b"), "a <em></em> b");
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        // 换行先变成 <br>，之后就不再算跨行
        assert_eq!(transform("*a\nb*"), "<em>a<br>b</em>");
        assert_eq!(transform("*a\r*b*"), "*a\r<em>b</em>");
    }

    #[test]
    fn test_unpaired_marker_stays() {
        assert_eq!(transform("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(transform("`tick"), "`tick");
    }

    #[test]
    fn test_fenced_block_spans_lines() {
        assert_eq!(transform("```\nlet x = 1;\n```"), "<pre><br>let x = 1;<br></pre>");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(transform("run `cargo` now"), "run <code>cargo</code> now");
    }

    #[test]
    fn test_code_content_is_not_protected() {
        assert_eq!(transform("`*x*`"), "<code><em>x</em></code>");
    }

    #[test]
    fn test_later_line_gets_its_own_limit() {
        assert_eq!(transform("*a*\r*b\r*"), "<em>a</em>\r*b\r*");
        assert_eq!(transform("**x** y\r**z**"), "<strong>x</strong> y\r<strong>z</strong>");
    }

    #[test]
    fn test_long_marker_runs_scale_linearly() {
        // 2 万个与 40 万个标记的耗时比应接近 20 倍，平方级会到 400 倍
        let small = "**".repeat(10_000);
        let large = "**".repeat(200_000);

        let started = Instant::now();
        let small_out = transform(&small);
        let small_time = started.elapsed();

        let started = Instant::now();
        let large_out = transform(&large);
        let large_time = started.elapsed();

        assert_eq!(small_out, "<strong></strong>".repeat(5_000));
        assert_eq!(large_out.len(), "<strong></strong>".len() * 100_000);
        assert!(
            large_time < Duration::from_secs(2) || large_time < small_time * 100,
            "耗时增长过快: {:?} -> {:?}",
            small_time,
            large_time
        );
    }

    #[test]
    fn test_adversarial_mix_finishes_quickly() {
        let text = "a * b ` c ** d\n".repeat(30_000) + "*` tail";

        let started = Instant::now();
        let out = transform(&text);

        assert!(out.ends_with("*` tail"));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(transform("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(transform("<script>"), "&lt;script&gt;");
    }
}

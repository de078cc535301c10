//! 数学公式扫描器
//!
//! 把 `$$…$$`、`\[…\]`、`\(…\)` 三种公式整体替换为占位符，
//! 等标记转换完成后再原样放回，保证公式内容逐字节不变。

/// 占位符关键字
pub const PLACEHOLDER_KEYWORD: &str = "MATH_EXPR_";

/// 公式定界符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathDelimiter {
    /// `$$…$$`
    Block,
    /// `\[…\]`，独立成行显示
    Display,
    /// `\(…\)`，行内显示
    Inline,
}

impl MathDelimiter {
    const ALL: [MathDelimiter; 3] = [
        MathDelimiter::Block,
        MathDelimiter::Display,
        MathDelimiter::Inline,
    ];

    /// 起始定界符
    pub fn open(self) -> &'static str {
        match self {
            MathDelimiter::Block => "$$",
            MathDelimiter::Display => "\\[",
            MathDelimiter::Inline => "\\(",
        }
    }

    /// 结束定界符
    pub fn close(self) -> &'static str {
        match self {
            MathDelimiter::Block => "$$",
            MathDelimiter::Display => "\\]",
            MathDelimiter::Inline => "\\)",
        }
    }

    /// 还原时输出的标记，原始定界符保留在容器内部供排版引擎识别
    fn render(self, content: &str) -> String {
        match self {
            MathDelimiter::Block => format!("$${}$$", content),
            MathDelimiter::Display => {
                format!("<div class=\"math-display\">\\[{}\\]</div>", content)
            }
            MathDelimiter::Inline => {
                format!("<span class=\"math-inline\">\\({}\\)</span>", content)
            }
        }
    }
}

/// 被保护的一段公式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathExpression {
    /// 按出现顺序从 0 开始编号
    pub index: usize,
    pub delimiter: MathDelimiter,
    /// 定界符之间的原始内容
    pub content: String,
}

/// 一次提取的结果：占位符关键字 + 按顺序排列的公式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathTable {
    keyword: String,
    expressions: Vec<MathExpression>,
}

impl MathTable {
    pub fn expressions(&self) -> &[MathExpression] {
        &self.expressions
    }

    /// 本次使用的占位符关键字，通常就是 `MATH_EXPR_`
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn placeholder(&self, index: usize) -> String {
        format!("{}{}", self.keyword, index)
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

/// 从左到右扫描，把每个完整的公式替换为占位符
///
/// 最早出现的起始定界符优先，由其后最近的同类结束定界符闭合（可跨行）。
/// 没有配对的定界符按普通文本保留。
pub fn extract(text: &str) -> (String, MathTable) {
    let keyword = unique_keyword(text);
    let mut stripped = String::with_capacity(text.len());
    let mut expressions = Vec::new();

    // 每种定界符下一个起始位置的缓存，None 表示后面不会再有可配对的
    let mut next_open: [Option<usize>; 3] =
        MathDelimiter::ALL.map(|delimiter| text.find(delimiter.open()));
    let mut cursor = 0;

    loop {
        for (slot, delimiter) in next_open.iter_mut().zip(MathDelimiter::ALL) {
            if matches!(slot, Some(pos) if *pos < cursor) {
                *slot = text[cursor..].find(delimiter.open()).map(|pos| cursor + pos);
            }
        }

        let earliest = next_open
            .iter()
            .enumerate()
            .filter_map(|(kind, slot)| slot.map(|pos| (pos, kind)))
            .min();
        let Some((start, kind)) = earliest else {
            break;
        };

        let delimiter = MathDelimiter::ALL[kind];
        let body = start + delimiter.open().len();
        match text[body..].find(delimiter.close()) {
            Some(len) => {
                let index = expressions.len();
                stripped.push_str(&text[cursor..start]);
                stripped.push_str(&keyword);
                stripped.push_str(&index.to_string());
                expressions.push(MathExpression {
                    index,
                    delimiter,
                    content: text[body..body + len].to_string(),
                });
                cursor = body + len + delimiter.close().len();
            }
            // 后面的同类起始定界符只会看到更短的剩余文本，同样无法配对
            None => next_open[kind] = None,
        }
    }

    stripped.push_str(&text[cursor..]);
    (
        stripped,
        MathTable {
            keyword,
            expressions,
        },
    )
}

/// 把占位符还原为带定界符的原始公式
///
/// 占位符按编号顺序依次消费，紧跟在占位符后面的数字不会被误读为编号的一部分。
pub fn restore(text: &str, table: &MathTable) -> String {
    if table.is_empty() {
        return text.to_string();
    }

    let mut restored = String::with_capacity(text.len());
    let mut pending = table.expressions.iter().peekable();
    let mut cursor = 0;

    while let Some(pos) = text[cursor..].find(&table.keyword) {
        let Some(expression) = pending.peek() else {
            break;
        };
        let start = cursor + pos;
        let digits = start + table.keyword.len();
        let index = expression.index.to_string();

        if text[digits..].starts_with(&index) {
            restored.push_str(&text[cursor..start]);
            restored.push_str(&expression.delimiter.render(&expression.content));
            cursor = digits + index.len();
            pending.next();
        } else {
            restored.push_str(&text[cursor..digits]);
            cursor = digits;
        }
    }

    restored.push_str(&text[cursor..]);
    restored
}

/// 选一个在原文中不存在的关键字，避免与原文字面量冲突
///
/// 原文中关键字后面最多跟着 n 段 `X_`，取 n + 1 段即可保证不出现。
fn unique_keyword(text: &str) -> String {
    let suffixes = text
        .match_indices(PLACEHOLDER_KEYWORD)
        .map(|(pos, _)| {
            let mut rest = &text[pos + PLACEHOLDER_KEYWORD.len()..];
            let mut runs = 0;
            while let Some(next) = rest.strip_prefix("X_") {
                rest = next;
                runs += 1;
            }
            runs + 1
        })
        .max()
        .unwrap_or(0);

    let mut keyword = PLACEHOLDER_KEYWORD.to_string();
    keyword.push_str(&"X_".repeat(suffixes));
    keyword
}

//! 展示层 - 业务能力层
//!
//! 定义解题流程需要的两个输出端：
//! - `PresentationSink`：解答区域的显示/隐藏、渲染、公式排版、滚动
//! - `ErrorReporter`：向用户展示错误信息
//!
//! 命令行下的实现：`HtmlPageSink` 把结果写成加载 MathJax 的 HTML 页面，
//! `ConsoleReporter` 把错误打印到 stderr

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::RenderError;
use crate::services::export::plain_text;

/// 解答展示区域
pub trait PresentationSink {
    fn show_solution_area(&self);
    fn hide_solution_area(&self);
    fn show_content(&self);
    fn hide_content(&self);
    fn show_loading(&self);
    fn hide_loading(&self);

    /// 替换解答区域的内容
    fn render(&self, markup: &str);

    /// 对已渲染内容执行公式排版
    fn typeset(&self) -> Result<(), RenderError>;

    fn scroll_into_view(&self);
}

/// 错误提示
pub trait ErrorReporter {
    /// 展示错误信息，直到用户关闭
    fn report(&self, message: &str);
}

/// 解答区域当前的可见状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub area_visible: bool,
    pub content_visible: bool,
    pub loading: bool,
    pub markup: Option<String>,
}

/// 把解答写入 HTML 页面的展示端
pub struct HtmlPageSink {
    output_path: PathBuf,
    state: RefCell<ViewState>,
}

impl HtmlPageSink {
    /// 创建新的 HTML 展示端
    ///
    /// # 参数
    /// - `output_path`: 排版时写入的页面路径
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            state: RefCell::new(ViewState::default()),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 当前可见状态的快照
    pub fn view(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// 生成完整的 HTML 页面
    pub fn page(markup: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<title>解题结果</title>
<script>
window.MathJax = {{
  tex: {{
    inlineMath: [['\\(', '\\)']],
    displayMath: [['$$', '$$'], ['\\[', '\\]']]
  }}
}};
</script>
<script async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
</head>
<body>
<!-- 生成时间: {} -->
<div id="solution-content">{}</div>
</body>
</html>
"#,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            markup
        )
    }

    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        f(&mut self.state.borrow_mut());
    }
}

impl PresentationSink for HtmlPageSink {
    fn show_solution_area(&self) {
        self.update(|s| s.area_visible = true);
    }

    fn hide_solution_area(&self) {
        self.update(|s| s.area_visible = false);
    }

    fn show_content(&self) {
        self.update(|s| s.content_visible = true);
    }

    fn hide_content(&self) {
        self.update(|s| s.content_visible = false);
    }

    fn show_loading(&self) {
        info!("⏳ 正在解题，请稍候...");
        self.update(|s| s.loading = true);
    }

    fn hide_loading(&self) {
        self.update(|s| s.loading = false);
    }

    fn render(&self, markup: &str) {
        debug!("渲染解答，长度 {} 字节", markup.len());
        self.update(|s| s.markup = Some(markup.to_string()));
    }

    fn typeset(&self) -> Result<(), RenderError> {
        let page = match &self.state.borrow().markup {
            Some(markup) => Self::page(markup),
            None => return Err(RenderError::NothingRendered),
        };

        fs::write(&self.output_path, page).map_err(|source| RenderError::PageWriteFailed {
            path: self.output_path.display().to_string(),
            source,
        })?;

        debug!("页面已写入: {}", self.output_path.display());
        Ok(())
    }

    fn scroll_into_view(&self) {
        let state = self.state.borrow();
        let Some(markup) = state.markup.as_deref() else {
            return;
        };

        match plain_text(markup) {
            Ok(text) => {
                println!("\n{}", "=".repeat(60));
                println!("{}", text);
                println!("{}\n", "=".repeat(60));
            }
            Err(e) => warn!("导出纯文本失败: {}", e),
        }
        info!("📄 完整页面: {}", self.output_path.display());
    }
}

/// 控制台错误提示
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    reported: RefCell<Vec<String>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已上报过的错误信息
    pub fn reported(&self) -> Vec<String> {
        self.reported.borrow().clone()
    }
}

impl ErrorReporter for ConsoleReporter {
    fn report(&self, message: &str) {
        error!("❌ {}", message);
        eprintln!("错误: {}", message);
        self.reported.borrow_mut().push(message.to_string());
    }
}

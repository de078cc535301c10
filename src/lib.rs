//! # Math Solver
//!
//! 一个提交数学题（图片或文本）并展示格式化解题过程的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责"把题目发出去、把响应拿回来"
//! - `HttpSolverClient` - 远程解题服务（`/solve` multipart、`/solve_text` JSON）
//! - `LlmSolver` - 直接调用多模态 LLM，行为与远程服务一致
//!
//! ### ② 格式化层（Formatter）
//! - `formatter/` - 纯函数，把原始解答变成可展示的标记
//! - `math_scanner` - 公式提取与还原（`$$`、`\[ \]`、`\( \)`）
//! - `markup` - 转义、换行、粗体、斜体、代码
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 展示与导出能力
//! - `PresentationSink` / `ErrorReporter` - 解答区域与错误提示
//! - `plain_text` - 复制用的纯文本导出
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `SubmissionCtx` - 上下文封装（序号 + 模式 + 状态）
//! - `SolveSession` - 流程编排（校验 → 请求 → 分类 → 渲染/上报）
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, Backend, ProblemInput};
pub use clients::{HttpSolverClient, LlmSolver, SolverService};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use formatter::format_solution;
pub use models::{ImageUpload, ServiceResponse, Submission, SubmissionMode};
pub use services::{ConsoleReporter, ErrorReporter, HtmlPageSink, PresentationSink};
pub use workflow::{RequestState, SolveSession, SubmissionCtx};

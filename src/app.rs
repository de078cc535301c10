use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::clients::{HttpSolverClient, LlmSolver, SolverService};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_image, Submission, SubmissionMode};
use crate::services::{ConsoleReporter, ErrorReporter, HtmlPageSink};
use crate::utils::logging::log_startup;
use crate::workflow::{RequestState, SolveSession, SubmissionCtx};

/// 解题后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// 远程解题服务（`/solve`、`/solve_text`）
    Http,
    /// 直接调用多模态 LLM
    Llm,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Backend::Http => "HTTP 解题服务",
            Backend::Llm => "LLM",
        }
    }
}

/// 用户输入的题目
#[derive(Debug, Clone)]
pub enum ProblemInput {
    /// 题目图片及补充说明
    Image { path: PathBuf, comment: String },
    /// 题目文本
    Text(String),
}

impl ProblemInput {
    pub fn mode(&self) -> SubmissionMode {
        match self {
            ProblemInput::Image { .. } => SubmissionMode::Image,
            ProblemInput::Text(_) => SubmissionMode::Text,
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    backend: Backend,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, backend: Backend) -> Self {
        log_startup(&config, backend.name());
        Self { config, backend }
    }

    /// 运行应用主逻辑
    ///
    /// # 返回
    /// 返回本次提交的最终状态
    pub async fn run(&self, input: ProblemInput) -> Result<RequestState> {
        let ctx = match self.backend {
            Backend::Http => self.solve_with(HttpSolverClient::new(&self.config), input).await,
            Backend::Llm => self.solve_with(LlmSolver::new(&self.config), input).await,
        };

        print_final_state(&ctx);
        Ok(ctx.state)
    }

    async fn solve_with<S: SolverService>(&self, service: S, input: ProblemInput) -> SubmissionCtx {
        let session = SolveSession::new(
            service,
            HtmlPageSink::new(&self.config.output_html),
            ConsoleReporter::new(),
            &self.config,
        );

        let mode = input.mode();
        let submission = match acquire_submission(input, self.config.max_image_bytes).await {
            Ok(submission) => submission,
            Err(e) => {
                // 读取或校验失败时不进入解题流程
                session.reporter().report(&e.user_message());
                return SubmissionCtx::new(0, mode);
            }
        };

        session.submit(&submission).await
    }
}

/// 读取输入并检查前置条件，失败时返回校验错误
async fn acquire_submission(input: ProblemInput, max_image_bytes: u64) -> AppResult<Submission> {
    let submission = match input {
        ProblemInput::Image { path, comment } => {
            info!("📁 读取图片: {}", path.display());
            let upload = load_image(&path, max_image_bytes).await?;
            Submission::image(Some(upload), comment)
        }
        ProblemInput::Text(text) => Submission::text(text),
    };
    submission.check()?;
    Ok(submission)
}

fn print_final_state(ctx: &SubmissionCtx) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 处理完成: {} 完成时间: {}",
        ctx,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    match ctx.state {
        RequestState::Success => info!("✅ 状态: {}", ctx.state),
        state => warn!("❌ 状态: {}", state),
    }
    info!("{}", "=".repeat(60));
}
